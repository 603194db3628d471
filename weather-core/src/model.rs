use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// What a provider call is made for.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    City(String),
    Coordinates(Coordinates),
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Location::City(name) => f.write_str(name),
            Location::Coordinates(c) => write!(f, "{:.4},{:.4}", c.lat, c.lon),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city_name: String,
    pub country_code: String,
    pub observed_at: i64,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub description: String,
    pub icon_code: String,
    pub humidity_pct: u8,
    pub wind_speed_ms: f64,
    pub pressure_hpa: u32,
    pub visibility_meters: u32,
    pub sunrise: i64,
    pub sunset: i64,
}

/// One 3-hour provider sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub epoch_seconds: i64,
    pub temperature_c: f64,
    pub description: String,
    pub icon_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Everything the view needs to draw one frame.
///
/// `loading == true` always comes with `error == None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    /// Raw contents of the search box.
    pub current_query: String,
    pub active_city_label: String,
    pub loading: bool,
    pub error: Option<String>,
    pub current: Option<CurrentWeather>,
    pub forecast: Option<ForecastSeries>,
}

impl SessionState {
    pub fn new(default_city: impl Into<String>) -> Self {
        Self {
            active_city_label: default_city.into(),
            ..Self::default()
        }
    }

    /// Weather is shown only once nothing is in flight.
    pub fn displayable(&self) -> Option<&CurrentWeather> {
        if self.loading { None } else { self.current.as_ref() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_carries_default_label_only() {
        let state = SessionState::new("London");

        assert_eq!(state.active_city_label, "London");
        assert!(state.current_query.is_empty());
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(state.current.is_none());
        assert!(state.forecast.is_none());
    }

    #[test]
    fn location_display() {
        assert_eq!(Location::City("Paris".into()).to_string(), "Paris");
        assert_eq!(
            Location::Coordinates(Coordinates::new(51.5, -0.12)).to_string(),
            "51.5000,-0.1200"
        );
    }
}
