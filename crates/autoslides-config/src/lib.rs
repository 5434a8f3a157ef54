use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value in config file at {config_path}: {field} must be at least 1")]
    InvalidValue {
        config_path: PathBuf,
        field: &'static str,
    },
}

/// Layout settings read from `config.toml`. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Characters assumed to fit on one rendered slide line.
    pub line_width: usize,
    /// Height budget of one slide, in estimated lines.
    pub lines: usize,
    /// Deepest heading level that still gets its own title slide.
    pub title_level: u8,
    /// Directory decks are written to when no output file is given.
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_width: 50,
            lines: 6,
            title_level: 3,
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;
        config.validate(config_path)?;

        // Expand shell variables and tilde in the output directory
        config.output_dir = config
            .output_dir
            .map(|dir| Self::expand_path(&dir).unwrap_or(dir));

        Ok(Some(config))
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/autoslides");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn validate(&self, config_path: &Path) -> Result<(), ConfigError> {
        let zero_field = if self.line_width == 0 {
            Some("line_width")
        } else if self.lines == 0 {
            Some("lines")
        } else {
            None
        };
        match zero_field {
            Some(field) => Err(ConfigError::InvalidValue {
                config_path: config_path.to_path_buf(),
                field,
            }),
            None => Ok(()),
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, content).unwrap();
        (temp_dir, config_file)
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/autoslides/config.toml"));
    }

    #[test]
    fn test_missing_keys_take_defaults() {
        let config: Config = toml::from_str("lines = 8\n").unwrap();

        assert_eq!(
            config,
            Config {
                lines: 8,
                ..Config::default()
            }
        );
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_full_config() {
        let (_temp_dir, config_file) = write_config(
            "line_width = 72\nlines = 10\ntitle_level = 2\noutput_dir = \"/tmp/decks\"\n",
        );

        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(
            loaded_config,
            Config {
                line_width: 72,
                lines: 10,
                title_level: 2,
                output_dir: Some(PathBuf::from("/tmp/decks")),
            }
        );
    }

    #[test]
    fn test_zero_lines_is_rejected() {
        let (_temp_dir, config_file) = write_config("lines = 0\n");

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { field: "lines", .. }));
    }

    #[test]
    fn test_zero_line_width_is_rejected() {
        let (_temp_dir, config_file) = write_config("line_width = 0\nlines = 0\n");

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "line_width",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let (_temp_dir, config_file) = write_config("lines = \"six\"\n");

        let err = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }

    #[test]
    fn test_output_dir_with_env_var() {
        unsafe {
            env::set_var("AUTOSLIDES_TEST_DECKS", "/custom/decks");
        }
        let (_temp_dir, config_file) = write_config("output_dir = \"$AUTOSLIDES_TEST_DECKS/out\"\n");

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.output_dir, Some(PathBuf::from("/custom/decks/out")));
        unsafe {
            env::remove_var("AUTOSLIDES_TEST_DECKS");
        }
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/decks");
        let expanded = Config::expand_path(&path).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().ends_with("decks"));
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }
}
