//! Protection of multi-line TeX environments.
//!
//! A display math block is paginated by splitting it on `\\`. Environments such
//! as `bmatrix` use `\\` for their own rows, so they are lifted out behind a
//! placeholder before the split and put back afterwards.
//!
//! Only one level is supported: an environment nested inside another
//! environment of the same name is matched up to the inner `\end`, which leaves
//! the outer one split incorrectly.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{NoExpand, Regex};

/// Environments protected from line splitting, in extraction order.
pub const PROTECTED_ENVIRONMENTS: [&str; 8] = [
    "bmatrix", "pmatrix", "vmatrix", "Vmatrix", "Bmatrix", "matrix", "array", "cases",
];

/// Marks a split point while protected environments are restored.
const LINE_MARKER: &str = "\u{1E}";

/// Result of lifting one environment out of a TeX string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEnvironments {
    pub environment: String,
    /// The literal `\begin{env}…\end{env}` blocks, in source order.
    pub blocks: Vec<String>,
    /// The input with every block replaced by [`Self::placeholder`].
    pub replaced: String,
}

impl ExtractedEnvironments {
    pub fn placeholder(&self) -> String {
        placeholder(&self.environment)
    }

    /// Put the extracted blocks back, first placeholder first.
    pub fn restore(&self, text: &str) -> String {
        let placeholder = self.placeholder();
        let mut restored = text.to_string();
        for block in &self.blocks {
            restored = restored.replacen(&placeholder, block, 1);
        }
        restored
    }
}

fn placeholder(environment: &str) -> String {
    format!("$${environment}$$")
}

fn compile_environment(environment: &str) -> Regex {
    let escaped = regex::escape(environment);
    Regex::new(&format!(r"(?s)\\begin\{{{escaped}\}}.*?\\end\{{{escaped}\}}"))
        .expect("Invalid environment regex")
}

/// The `\begin{env}…\end{env}` matcher; compiled once for protected names.
fn environment_pattern(environment: &str) -> Cow<'static, Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        PROTECTED_ENVIRONMENTS
            .iter()
            .map(|environment| compile_environment(environment))
            .collect()
    });
    match PROTECTED_ENVIRONMENTS
        .iter()
        .position(|protected| *protected == environment)
    {
        Some(index) => Cow::Borrowed(&patterns[index]),
        None => Cow::Owned(compile_environment(environment)),
    }
}

/// Find every shortest, non-overlapping `\begin{env}…\end{env}` in `tex`
/// (across newlines) and replace each with a placeholder.
pub fn extract_environments(tex: &str, environment: &str) -> ExtractedEnvironments {
    let pattern = environment_pattern(environment);

    let blocks = pattern
        .find_iter(tex)
        .map(|m| m.as_str().to_string())
        .collect();
    let replaced = pattern
        .replace_all(tex, NoExpand(&placeholder(environment)))
        .into_owned();

    ExtractedEnvironments {
        environment: environment.to_string(),
        blocks,
        replaced,
    }
}

/// Split a TeX expression on `\\` without cutting through protected
/// environments. Lines are trimmed; empty lines are dropped.
pub fn split_math_lines(tex: &str) -> Vec<String> {
    let mut working = tex.to_string();
    let mut extracted = Vec::with_capacity(PROTECTED_ENVIRONMENTS.len());
    for environment in PROTECTED_ENVIRONMENTS {
        let mut env = extract_environments(&working, environment);
        working = std::mem::take(&mut env.replaced);
        extracted.push(env);
    }

    // Safe now: no protected environment is left in the string.
    working = working.replace("\\\\", LINE_MARKER);

    // Reverse order: a later block may contain an earlier one's placeholder.
    for env in extracted.iter().rev() {
        working = env.restore(&working);
    }

    working
        .split(LINE_MARKER)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
