//! One-shot location lookup.
//!
//! A [`Geolocator`] resolves once, to coordinates or to an error; it is never
//! polled again, so there is nothing to cancel.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, error::GeolocationError, model::Coordinates};

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinates);

#[async_trait]
impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// Used when no location source is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Explicit coordinates win over the configured `location`; with neither,
/// geolocation is unsupported.
pub fn geolocator_from(config: &Config, explicit: Option<Coordinates>) -> Box<dyn Geolocator> {
    match explicit.or(config.location) {
        Some(coords) => Box::new(FixedLocation(coords)),
        None => Box::new(NoGeolocation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn explicit_coordinates_take_precedence() {
        let mut cfg = Config::default();
        cfg.location = Some(Coordinates::new(1.0, 1.0));

        let geo = geolocator_from(&cfg, Some(Coordinates::new(2.0, 3.0)));
        assert_eq!(geo.locate().await, Ok(Coordinates::new(2.0, 3.0)));
    }

    #[tokio::test]
    async fn configured_location_is_used_as_fallback() {
        let mut cfg = Config::default();
        cfg.location = Some(Coordinates::new(1.0, 1.0));

        let geo = geolocator_from(&cfg, None);
        assert_eq!(geo.locate().await, Ok(Coordinates::new(1.0, 1.0)));
    }

    #[tokio::test]
    async fn without_any_source_geolocation_is_unsupported() {
        let geo = geolocator_from(&Config::default(), None);
        assert_eq!(geo.locate().await, Err(GeolocationError::Unsupported));
    }
}
