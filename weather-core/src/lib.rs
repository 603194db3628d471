//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The weather provider boundary and its OpenWeatherMap client
//! - The session that turns searches and location requests into state
//! - Pure formatting helpers for whatever renders that state
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod format;
pub mod geolocation;
pub mod model;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::{GeolocationError, ProviderError};
pub use geolocation::{FixedLocation, Geolocator, NoGeolocation};
pub use model::{
    Coordinates, CurrentWeather, ForecastPoint, ForecastSeries, Location, SessionState,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use session::WeatherSession;
