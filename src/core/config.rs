use anyhow::{Context, Result, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

use super::timezone::{DEFAULT_UTC_OFFSET_HOURS, TimezoneFormatter};

pub const DEFAULT_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_STATIC_DIR: &str = "static";
pub const DEFAULT_BASE_URL: &str = "https://economia.awesomeapi.com.br";
pub const DEFAULT_CURRENCY_PAIR: &str = "USD-BRL";

pub const DEFAULT_CONFIG: &str = r#"---
server:
  address: "0.0.0.0:8000"
  static_dir: "static"

provider:
  base_url: "https://economia.awesomeapi.com.br"
  currency_pair: "USD-BRL"
  create_date: convert

utc_offset_hours: -3
"#;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub address: String,
    pub static_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            address: DEFAULT_ADDRESS.to_string(),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}

/// How the naive `create_date` of the latest quote is read.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CreateDateMode {
    /// The value is UTC and gets shifted into the display offset.
    #[default]
    Convert,
    /// The value is already in the display offset; only the layout changes.
    Relabel,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub currency_pair: String,
    pub create_date: CreateDateMode,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            currency_pair: DEFAULT_CURRENCY_PAIR.to_string(),
            create_date: CreateDateMode::default(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub utc_offset_hours: i32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server: ServerConfig::default(),
            provider: ProviderConfig::default(),
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to built-in defaults when
    /// it does not exist.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("br", "cambio", "cambio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config.validate()?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.provider.base_url.trim().is_empty(),
            "Provider base_url must not be empty"
        );
        ensure!(
            !self.provider.currency_pair.trim().is_empty(),
            "Provider currency_pair must not be empty"
        );
        TimezoneFormatter::from_offset_hours(self.utc_offset_hours)?;
        Ok(())
    }

    pub fn formatter(&self) -> Result<TimezoneFormatter> {
        TimezoneFormatter::from_offset_hours(self.utc_offset_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
server:
  address: "127.0.0.1:9000"
  static_dir: "/srv/cambio"
provider:
  base_url: "http://example.com/rates"
  currency_pair: "EUR-BRL"
  create_date: relabel
utc_offset_hours: -4
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.server.address, "127.0.0.1:9000");
        assert_eq!(config.server.static_dir, "/srv/cambio");
        assert_eq!(config.provider.base_url, "http://example.com/rates");
        assert_eq!(config.provider.currency_pair, "EUR-BRL");
        assert_eq!(config.provider.create_date, CreateDateMode::Relabel);
        assert_eq!(config.utc_offset_hours, -4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml_str = r#"
provider:
  base_url: "http://localhost:1234"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(config.server, ServerConfig::default());
        assert_eq!(config.provider.base_url, "http://localhost:1234");
        assert_eq!(config.provider.currency_pair, "USD-BRL");
        assert_eq!(config.provider.create_date, CreateDateMode::Convert);
        assert_eq!(config.utc_offset_hours, -3);
    }

    #[test]
    fn test_default_config_text_matches_defaults() {
        let config: AppConfig = serde_yaml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "utc_offset_hours: 1\n").unwrap();

        let config = AppConfig::load_from_path(file.path()).unwrap();
        assert_eq!(config.utc_offset_hours, 1);
        assert_eq!(config.provider, ProviderConfig::default());
    }

    #[test]
    fn test_load_from_missing_path() {
        let result = AppConfig::load_from_path("/definitely/not/here.yaml");
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "utc_offset_hours: 30\n").unwrap();
        let result = AppConfig::load_from_path(file.path());
        assert_eq!(result.unwrap_err().to_string(), "Invalid UTC offset: 30 hours");

        let mut config = AppConfig::default();
        config.provider.base_url = " ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_create_date_mode() {
        let result: Result<AppConfig, serde_yaml::Error> =
            serde_yaml::from_str("provider:\n  create_date: guess\n");
        assert!(result.is_err());
    }
}
