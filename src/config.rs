//! Generator configuration handling
//!
//! Every field defaults to the values the published assets are built with, so
//! a plain run with no config file produces the canonical images.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Payload encoded into both assets
pub const DEFAULT_PAYLOAD: &str = "https://scipi.ro";
/// Logo composited into the centre of both assets
pub const DEFAULT_LOGO: &str = "public/fav.png";
/// Output path of the styled dark variant
pub const DEFAULT_STYLED_OUTPUT: &str = "public/qr_scipi_dark.png";
/// Output path of the simple dark variant
pub const DEFAULT_SIMPLE_OUTPUT: &str = "public/qr_scipi_dark_simple.png";
/// Smallest QR version the encoder will pick
pub const DEFAULT_MIN_VERSION: i16 = 4;

const CONFIG_CANDIDATES: [&str; 3] = ["scipi-qr.toml", "scipi-qr.yaml", "scipi-qr.yml"];

/// Top-level configuration for a generation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Text encoded into the QR symbols
    pub payload: String,
    /// Logo image path
    pub logo: PathBuf,
    /// Where the styled dark variant is written
    pub styled_output: PathBuf,
    /// Where the simple dark variant is written
    pub simple_output: PathBuf,
    /// Minimum QR version; larger versions are used only if the payload does not fit
    pub min_version: i16,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            payload: DEFAULT_PAYLOAD.to_string(),
            logo: PathBuf::from(DEFAULT_LOGO),
            styled_output: PathBuf::from(DEFAULT_STYLED_OUTPUT),
            simple_output: PathBuf::from(DEFAULT_SIMPLE_OUTPUT),
            min_version: DEFAULT_MIN_VERSION,
            logging: LoggingOptions::default(),
        }
    }
}

impl AssetConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No scipi-qr.toml / scipi-qr.yaml found, using defaults");
            Self::default()
        };

        config.logging.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Look for a configuration file in the working directory.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        Ok(CONFIG_CANDIDATES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists()))
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Reject values the encoder cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.payload.is_empty() {
            return Err(Error::Config("payload must not be empty".to_string()));
        }
        if !(1..=40).contains(&self.min_version) {
            return Err(Error::Config(format!(
                "min_version must be between 1 and 40, got {}",
                self.min_version
            )));
        }
        if self.styled_output == self.simple_output {
            return Err(Error::Config(format!(
                "styled and simple outputs must differ, both are {}",
                self.styled_output.display()
            )));
        }
        Ok(())
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `SCIPI_QR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("SCIPI_QR_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("SCIPI_QR_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("SCIPI_QR_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {}
            }
        }
        if let Ok(rotation) = env::var("SCIPI_QR_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::parse(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_published_assets() {
        let config = AssetConfig::default();
        assert_eq!(config.payload, "https://scipi.ro");
        assert_eq!(config.logo, PathBuf::from("public/fav.png"));
        assert_eq!(
            config.styled_output,
            PathBuf::from("public/qr_scipi_dark.png")
        );
        assert_eq!(
            config.simple_output,
            PathBuf::from("public/qr_scipi_dark_simple.png")
        );
        assert_eq!(config.min_version, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scipi-qr.toml");
        fs::write(&path, "logo = \"assets/logo.png\"\n[logging]\nlevel = \"debug\"\n").unwrap();

        let config = AssetConfig::from_file(&path).unwrap();
        assert_eq!(config.logo, PathBuf::from("assets/logo.png"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.payload, DEFAULT_PAYLOAD);
        assert_eq!(config.min_version, DEFAULT_MIN_VERSION);
    }

    #[test]
    fn test_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scipi-qr.yaml");
        fs::write(&path, "styled_output: out/styled.png\nlogging:\n  rotation: daily\n").unwrap();

        let config = AssetConfig::from_file(&path).unwrap();
        assert_eq!(config.styled_output, PathBuf::from("out/styled.png"));
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scipi-qr.ini");
        fs::write(&path, "payload = x").unwrap();

        assert!(matches!(
            AssetConfig::from_file(&path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AssetConfig::default();
        config.min_version = 41;
        assert!(config.validate().is_err());

        let mut config = AssetConfig::default();
        config.payload.clear();
        assert!(config.validate().is_err());

        let mut config = AssetConfig::default();
        config.simple_output = config.styled_output.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rotation_parse() {
        assert_eq!(LogRotation::parse("HOURLY"), Some(LogRotation::Hourly));
        assert_eq!(LogRotation::parse("weekly"), None);
    }
}
