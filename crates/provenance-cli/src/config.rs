//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Separator used when joining key paths
    #[serde(default = "default_separator")]
    pub separator: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (key=value lines) format
    Quiet,
}

impl Config {
    /// Default configuration file path under `home`.
    pub fn path_in(home: &Path) -> PathBuf {
        home.join(".provenance").join("config.toml")
    }

    /// Load configuration from the default path, or defaults if it doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_in(dirs::home_dir().as_deref())
    }

    /// Load configuration from under `home`; defaults when there is no home directory.
    pub fn load_in(home: Option<&Path>) -> Result<Self> {
        match home {
            Some(home) => Self::load_from(Self::path_in(home)),
            None => {
                tracing::debug!("No home directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from a specific file, or defaults if it doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Check settings that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.settings.separator.is_empty() {
            return Err(CliError::Config("separator cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            separator: default_separator(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_separator() -> String {
    ".".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.settings.separator, ".");
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\nformat = \"json\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
        assert_eq!(config.settings.separator, ".");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_from("/nonexistent/provenance/config.toml").unwrap();
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_no_home_directory_uses_defaults() {
        let config = Config::load_in(None).unwrap();
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert_eq!(config.settings.separator, ".");
    }

    #[test]
    fn test_load_in_home() {
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir(home.path().join(".provenance")).unwrap();
        std::fs::write(
            home.path().join(".provenance").join("config.toml"),
            "[settings]\nseparator = \"/\"\n",
        )
        .unwrap();

        let config = Config::load_in(Some(home.path())).unwrap();
        assert_eq!(config.settings.separator, "/");
    }

    #[test]
    fn test_empty_separator_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[settings]\nseparator = \"\"").unwrap();

        let result = Config::load_from(file.path());
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_malformed_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[settings\ncolor = ").unwrap();

        assert!(matches!(Config::load_from(file.path()), Err(CliError::Toml(_))));
    }
}
