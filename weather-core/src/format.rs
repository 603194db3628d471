//! Pure helpers the view uses to turn session data into display strings.

use chrono::{DateTime, Local, TimeZone};

use crate::model::{ForecastPoint, ForecastSeries};

/// Provider samples per day (one every 3 hours).
pub const SAMPLES_PER_DAY: usize = 8;
/// Number of days shown in the forecast strip.
pub const FORECAST_DAYS: usize = 5;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

pub fn icon_url(icon_code: &str) -> String {
    format!("{ICON_BASE_URL}/{icon_code}@2x.png")
}

/// One point per day: every 8th sample, at most 5, in provider order.
pub fn daily_forecast(series: &ForecastSeries) -> Vec<&ForecastPoint> {
    series
        .points
        .iter()
        .step_by(SAMPLES_PER_DAY)
        .take(FORECAST_DAYS)
        .collect()
}

/// `Friday, October 16, 2026` in the local time zone.
pub fn format_date(epoch_seconds: i64) -> String {
    format_date_in(epoch_seconds, &Local)
}

pub fn format_date_in<Tz: TimeZone>(epoch_seconds: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    with_tz(epoch_seconds, tz)
        .map(|dt| dt.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_default()
}

/// `Fri, Oct 16` in the local time zone.
pub fn format_short_date(epoch_seconds: i64) -> String {
    format_short_date_in(epoch_seconds, &Local)
}

pub fn format_short_date_in<Tz: TimeZone>(epoch_seconds: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    with_tz(epoch_seconds, tz)
        .map(|dt| dt.format("%a, %b %-d").to_string())
        .unwrap_or_default()
}

/// `07:05 AM` in the local time zone.
pub fn format_time(epoch_seconds: i64) -> String {
    format_time_in(epoch_seconds, &Local)
}

pub fn format_time_in<Tz: TimeZone>(epoch_seconds: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    with_tz(epoch_seconds, tz)
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_default()
}

pub fn round_temp(celsius: f64) -> i64 {
    celsius.round() as i64
}

/// Meters to kilometers with one decimal, e.g. `10000` -> `10.0`.
pub fn visibility_km(meters: u32) -> String {
    format!("{:.1}", f64::from(meters) / 1000.0)
}

fn with_tz<Tz: TimeZone>(epoch_seconds: i64, tz: &Tz) -> Option<DateTime<Tz>> {
    DateTime::from_timestamp(epoch_seconds, 0).map(|utc| utc.with_timezone(tz))
}
