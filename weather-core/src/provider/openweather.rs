use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{
    config::Config,
    error::ProviderError,
    model::{CurrentWeather, ForecastPoint, ForecastSeries, Location},
};

use super::WeatherProvider;

/// OpenWeatherMap-shaped REST provider (`/weather` and `/forecast`).
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self::with_client(api_key, base_url, Client::new())
    }

    pub fn with_client(api_key: String, base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;
        let api_key = config.api_key()?.to_owned();
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(api_key, config.base_url.clone(), http))
    }

    fn query_params(&self, location: &Location) -> Vec<(&'static str, String)> {
        let mut params = match location {
            Location::City(name) => vec![("q", name.clone())],
            Location::Coordinates(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));
        params
    }

    async fn get_json(&self, endpoint: &str, location: &Location) -> Result<String, ProviderError> {
        let url = format!("{}/{endpoint}", self.base_url);
        debug!(%url, %location, "requesting provider");

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(location))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            debug!(%status, body = %truncate_body(&body), "provider returned non-OK status");
            return Err(ProviderError::NotFound { status: status.as_u16() });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    // Absent for coordinates outside any country.
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    sys: OwSys,
    #[serde(default)]
    visibility: u32,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwWeather>, what: &str) -> Result<OwWeather, ProviderError> {
    weather
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::MalformedResponse(format!("{what} has no weather conditions")))
}

fn parse_current(body: &str) -> Result<CurrentWeather, ProviderError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    let condition = first_condition(parsed.weather, "current weather")?;

    Ok(CurrentWeather {
        city_name: parsed.name,
        country_code: parsed.sys.country,
        observed_at: parsed.dt,
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        description: condition.description,
        icon_code: condition.icon,
        humidity_pct: parsed.main.humidity,
        wind_speed_ms: parsed.wind.speed,
        pressure_hpa: parsed.main.pressure,
        visibility_meters: parsed.visibility,
        sunrise: parsed.sys.sunrise,
        sunset: parsed.sys.sunset,
    })
}

fn parse_forecast(body: &str) -> Result<ForecastSeries, ProviderError> {
    let parsed: OwForecastResponse = serde_json::from_str(body)?;

    let points = parsed
        .list
        .into_iter()
        .map(|entry| {
            let condition = first_condition(entry.weather, "forecast entry")?;
            Ok(ForecastPoint {
                epoch_seconds: entry.dt,
                temperature_c: entry.main.temp,
                description: condition.description,
                icon_code: condition.icon,
            })
        })
        .collect::<Result<Vec<_>, ProviderError>>()?;

    Ok(ForecastSeries::new(points))
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, location: &Location) -> Result<CurrentWeather, ProviderError> {
        let body = self.get_json("weather", location).await?;
        parse_current(&body)
    }

    async fn forecast(&self, location: &Location) -> Result<ForecastSeries, ProviderError> {
        let body = self.get_json("forecast", location).await?;
        parse_forecast(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
