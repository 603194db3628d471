use crate::{
    Config, CurrentWeather, ForecastSeries, Location, error::ProviderError,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The external weather API, as seen by a session.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, location: &Location) -> Result<CurrentWeather, ProviderError>;

    async fn forecast(&self, location: &Location) -> Result<ForecastSeries, ProviderError>;
}

/// Construct the HTTP provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenWeatherProvider::from_config(config)?;
    Ok(Box::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured"));
    }

    #[test]
    fn provider_from_config_rejects_zero_timeout() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.timeout_secs = 0;

        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }
}
