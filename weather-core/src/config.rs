use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::model::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_CITY: &str = "London";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org/data/2.5"
/// default_city = "London"
///
/// [location]
/// lat = 51.5
/// lon = -0.12
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Provider credential (OpenWeatherMap `appid`).
    pub api_key: Option<String>,

    /// Provider endpoint root, without the trailing `/weather` or `/forecast`.
    pub base_url: String,

    /// City loaded when a session starts.
    pub default_city: String,

    pub timeout_secs: u64,

    /// Fixed coordinates reported when the current location is requested.
    pub location: Option<Coordinates>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            location: None,
        }
    }
}

impl Config {
    /// Returns the API key or an error hinting at `weather configure`.
    pub fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `weather configure` and enter your OpenWeatherMap API key."
                )
            })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file yet.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Rejects values that would make every request fail.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(anyhow!(
                "`timeout_secs` must be at least 1 (default is {DEFAULT_TIMEOUT_SECS})"
            ));
        }
        Ok(())
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_openweather_and_london() {
        let cfg = Config::default();

        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.default_city, "London");
        assert_eq!(cfg.timeout(), Duration::from_secs(10));
        assert!(cfg.location.is_none());
    }

    #[test]
    fn api_key_errors_when_missing_or_blank() {
        let mut cfg = Config::default();
        let err = cfg.api_key().unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
        assert!(err.to_string().contains("Hint: run `weather configure`"));

        cfg.set_api_key("   ".into());
        assert!(cfg.api_key().is_err());

        cfg.set_api_key("KEY".into());
        assert_eq!(cfg.api_key().unwrap(), "KEY");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg = Config::from_toml(
            r#"
            api_key = "abc"
            default_city = "Paris"
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.api_key.as_deref(), Some("abc"));
        assert_eq!(cfg.default_city, "Paris");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::from_toml("timeout_secs = 0").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));

        let cfg = Config::from_toml("timeout_secs = 3").expect("valid toml");
        assert_eq!(cfg.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn location_table_is_parsed() {
        let cfg = Config::from_toml(
            r#"
            [location]
            lat = 48.85
            lon = 2.35
            "#,
        )
        .expect("valid toml");

        assert_eq!(cfg.location, Some(Coordinates::new(48.85, 2.35)));
    }

    #[test]
    fn toml_round_trip_keeps_fields() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.location = Some(Coordinates::new(1.0, 2.0));

        let text = toml::to_string_pretty(&cfg).expect("serializable");
        let back = Config::from_toml(&text).expect("parsable");

        assert_eq!(back.api_key.as_deref(), Some("KEY"));
        assert_eq!(back.location, cfg.location);
    }
}
