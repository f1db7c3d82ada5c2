//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority)                              │
//! │     --data ./shop.json   --preset weekly   --title "..."               │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     REKAP_DATA_PATH, REKAP_OUTPUT_DIR, REKAP_PRESET,                   │
//! │     REKAP_TITLE, REKAP_CURRENCY_SYMBOL                                 │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config PATH, or the platform config dir:                         │
//! │     ~/.config/rekap/rekap.toml (Linux)                                 │
//! │     ~/Library/Application Support/id.rekap.rekap/rekap.toml (macOS)    │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [data]
//! path = "rekap.json"
//!
//! [report]
//! title = "Sales Recap Report"
//! default_preset = "monthly"
//! dimensions = ["channel", "product", "admin"]
//! output_dir = "."
//!
//! [currency]
//! symbol = "Rp"
//! grouping_separator = "."
//! symbol_spacing = true
//! ```

use std::path::PathBuf;

use rekap_core::aggregate::Dimension;
use rekap_core::error::ValidationError;
use rekap_core::format::CurrencyFormat;
use rekap_core::window::Preset;
use rekap_report::DEFAULT_TITLE;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "rekap.toml";

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where the snapshot lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    /// JSON snapshot document.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("rekap.json")
}

impl Default for DataSettings {
    fn default() -> Self {
        DataSettings {
            path: default_data_path(),
        }
    }
}

/// Report defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_title")]
    pub title: String,

    /// Used when neither `--preset` nor a custom range is given.
    #[serde(default)]
    pub default_preset: Preset,

    /// Rollups shown in reports and exports.
    #[serde(default = "default_dimensions")]
    pub dimensions: Vec<Dimension>,

    /// Directory PDF exports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_dimensions() -> Vec<Dimension> {
    Dimension::STANDARD.to_vec()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ReportSettings {
    fn default() -> Self {
        ReportSettings {
            title: default_title(),
            default_preset: Preset::default(),
            dimensions: default_dimensions(),
            output_dir: default_output_dir(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RekapConfig {
    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub report: ReportSettings,

    #[serde(default)]
    pub currency: CurrencyFormat,
}

impl RekapConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, else the platform default)
    /// 3. Environment variables
    ///
    /// A missing default file is fine; a missing explicit file is not.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
                    path: path.clone(),
                    source,
                })?;
                config = Self::from_toml(&contents)?;
            } else if explicit {
                return Err(ConfigError::NotFound(path));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.report.title.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "report.title".into(),
            });
        }

        if self.report.dimensions.is_empty() {
            return Err(ValidationError::Required {
                field: "report.dimensions".into(),
            });
        }

        Ok(())
    }

    /// Applies `REKAP_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("REKAP_DATA_PATH") {
            debug!(path = %path, "Overriding data path from environment");
            self.data.path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("REKAP_OUTPUT_DIR") {
            self.report.output_dir = PathBuf::from(dir);
        }

        if let Some(preset) = lookup("REKAP_PRESET") {
            match preset.parse() {
                Ok(parsed) => self.report.default_preset = parsed,
                Err(e) => warn!(preset = %preset, error = %e, "Ignoring REKAP_PRESET"),
            }
        }

        if let Some(title) = lookup("REKAP_TITLE") {
            self.report.title = title;
        }

        if let Some(symbol) = lookup("REKAP_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("id", "rekap", "rekap")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RekapConfig::default();
        assert_eq!(config.data.path, PathBuf::from("rekap.json"));
        assert_eq!(config.report.title, "Sales Recap Report");
        assert_eq!(config.report.default_preset, Preset::Monthly);
        assert_eq!(config.report.dimensions, Dimension::STANDARD.to_vec());
        assert_eq!(config.currency.symbol, "Rp");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file() {
        let config = RekapConfig::from_toml(
            r#"
            [report]
            default_preset = "weekly"
            dimensions = ["channel", "payment"]

            [currency]
            symbol = "IDR"
            "#,
        )
        .unwrap();

        assert_eq!(config.report.default_preset, Preset::Weekly);
        assert_eq!(config.report.dimensions, vec![Dimension::Channel, Dimension::Payment]);
        assert_eq!(config.report.title, DEFAULT_TITLE);
        assert_eq!(config.currency.symbol, "IDR");
        assert_eq!(config.currency.grouping_separator, '.');
        assert_eq!(config.data.path, PathBuf::from("rekap.json"));
    }

    #[test]
    fn test_bad_file() {
        let result = RekapConfig::from_toml("[report]\ndefault_preset = \"fortnightly\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("REKAP_DATA_PATH", "/srv/shop.json"),
            ("REKAP_PRESET", "tahunan"),
            ("REKAP_TITLE", "Rekap Penjualan"),
            ("REKAP_CURRENCY_SYMBOL", "IDR"),
        ]
        .into_iter()
        .collect();

        let mut config = RekapConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.data.path, PathBuf::from("/srv/shop.json"));
        assert_eq!(config.report.default_preset, Preset::Yearly);
        assert_eq!(config.report.title, "Rekap Penjualan");
        assert_eq!(config.currency.symbol, "IDR");
        assert_eq!(config.report.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_unknown_preset_override_is_ignored() {
        let mut config = RekapConfig::default();
        config.apply_overrides(|key| (key == "REKAP_PRESET").then(|| "sometimes".to_string()));
        assert_eq!(config.report.default_preset, Preset::Monthly);
    }

    #[test]
    fn test_validation() {
        let mut config = RekapConfig::default();
        config.report.title = "  ".into();
        assert!(matches!(config.validate(), Err(ValidationError::Required { .. })));

        let mut config = RekapConfig::default();
        config.report.dimensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rekap.toml");
        std::fs::write(&path, "[data]\npath = \"toko.json\"\n").unwrap();

        let config = RekapConfig::load(Some(path)).unwrap();
        // REKAP_DATA_PATH is not set in the test environment
        if std::env::var("REKAP_DATA_PATH").is_err() {
            assert_eq!(config.data.path, PathBuf::from("toko.json"));
        }
    }

    #[test]
    fn test_explicit_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = RekapConfig::load(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
