use weather_core::{SessionState, format};

/// Renders a session the way the app screen lays it out: loading notice,
/// error line, then current conditions and the five-day strip.
pub fn render(state: &SessionState) -> String {
    let mut out = String::new();

    if state.loading {
        out.push_str("Loading weather data...\n");
    }

    if let Some(error) = &state.error {
        out.push_str(&format!("❌ {error}\n"));
    }

    let Some(w) = state.displayable() else {
        return out;
    };

    out.push_str(&format!("{}, {}\n", w.city_name, w.country_code));
    out.push_str(&format!("{}\n", format::format_date(w.observed_at)));
    out.push_str(&format!(
        "{}°C  (feels like {}°C)  {}\n",
        format::round_temp(w.temperature_c),
        format::round_temp(w.feels_like_c),
        w.description
    ));
    out.push_str(&format!("{}\n\n", format::icon_url(&w.icon_code)));

    let details = [
        ("Humidity", format!("{}%", w.humidity_pct)),
        ("Wind Speed", format!("{} m/s", w.wind_speed_ms)),
        ("Pressure", format!("{} hPa", w.pressure_hpa)),
        ("Visibility", format!("{} km", format::visibility_km(w.visibility_meters))),
        ("Sunrise", format::format_time(w.sunrise)),
        ("Sunset", format::format_time(w.sunset)),
    ];
    for (label, value) in details {
        out.push_str(&format!("  {label:<11} {value}\n"));
    }

    if let Some(forecast) = &state.forecast {
        out.push_str("\n5-Day Forecast\n");
        for point in format::daily_forecast(forecast) {
            out.push_str(&format!(
                "  {:<12} {:>4}°C  {}\n",
                format::format_short_date(point.epoch_seconds),
                format::round_temp(point.temperature_c),
                point.description
            ));
        }
    }

    out
}
