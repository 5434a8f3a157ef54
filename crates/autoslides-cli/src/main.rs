use anyhow::{Context, Result, anyhow, bail};
use autoslides_config::Config;
use autoslides_engine::preprocess::{preprocess, truncated_frontmatter};
use autoslides_engine::{ConvertError, DeckOptions, Layout, convert};
use clap::Parser;
use std::{
    path::{Path, PathBuf},
    process,
};

#[derive(Parser, Debug, Default, PartialEq, Eq)]
#[command(name = "autoslides-cli")]
#[command(version, about = "Paginate markdown notes into slides", long_about = None)]
struct Cli {
    /// Markdown file to convert
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Deck file to write (default: <stem>.slides.md)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file to read instead of ~/.config/autoslides/config.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Height budget of one slide, in lines
    #[arg(long, value_name = "N", value_parser = positive)]
    lines: Option<usize>,

    /// Characters per rendered line
    #[arg(long, value_name = "N", value_parser = positive)]
    line_width: Option<usize>,
}

fn positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("expected a positive integer, got '{value}'")),
    }
}

fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let config_path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(Config::config_path);
    log::info!("Config path: {}", config_path.display());

    match Config::load_from_path(&config_path)? {
        Some(config) => Ok(config),
        None if explicit.is_some() => bail!("Config file '{}' not found", config_path.display()),
        None => Ok(Config::default()),
    }
}

/// `<stem>.slides.md`, next to the source unless an output directory is set.
fn default_output(source: &Path, output_dir: Option<&Path>) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "deck".to_string());
    let file_name = format!("{stem}.slides.md");
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => source.with_file_name(file_name),
    }
}

/// 1-based line in `markdown` of a byte offset into its preprocessed form.
fn source_line(markdown: &str, offset: usize) -> usize {
    let body = truncated_frontmatter(markdown);
    let skipped = markdown.matches('\n').count() - body.matches('\n').count();
    let processed = preprocess(markdown);
    let before = processed.get(..offset).unwrap_or(&processed);
    skipped + before.matches('\n').count() + 1
}

fn describe(err: &ConvertError, markdown: &str, source: &Path) -> String {
    match err.offset() {
        Some(offset) => format!(
            "{}:{}: {err}",
            source.display(),
            source_line(markdown, offset)
        ),
        None => format!("{}: {err}", source.display()),
    }
}

fn run(args: Cli) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let options = DeckOptions {
        layout: Layout::new(
            args.line_width.unwrap_or(config.line_width),
            args.lines.unwrap_or(config.lines),
        ),
        title_level: config.title_level,
    };
    log::debug!("Deck options: {options:?}");

    let markdown = std::fs::read_to_string(&args.source)
        .with_context(|| format!("Failed to read {}", args.source.display()))?;
    let deck = convert(&markdown, &options)
        .map_err(|err| anyhow!(describe(&err, &markdown, &args.source)))?;

    let output = args
        .output
        .unwrap_or_else(|| default_output(&args.source, config.output_dir.as_deref()));
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&output, deck.to_string())
        .with_context(|| format!("Failed to write {}", output.display()))?;

    log::info!("Wrote {} slides to {}", deck.len(), output.display());
    Ok(())
}

fn main() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Cli::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
