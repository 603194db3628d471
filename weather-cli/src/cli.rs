use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, CustomType, InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;
use weather_core::{
    Config, Coordinates, WeatherSession, geolocation::geolocator_from,
    provider::provider_from_config,
};

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API key, endpoint, default city and fixed location.
    Configure,

    /// Show weather for a city (the configured default when omitted).
    Show {
        /// City name, e.g. "London" or "Paris,FR".
        city: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show weather for the current location.
    Here {
        /// Latitude; defaults to the configured location.
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Longitude; defaults to the configured location.
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Search repeatedly; `:here` uses the current location, `:quit` exits.
    Interactive,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Print the raw session state as JSON.
    #[arg(long)]
    json: bool,
}

const HERE: &str = ":here";
const QUIT: &str = ":quit";

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, output } => {
                let config = Config::load()?;
                let session = build_session(&config)?;

                match city {
                    Some(city) => session.request_by_city_name(&city).await,
                    None => session.initialize().await,
                }
                print_state(&session, &output)
            }
            Command::Here { lat, lon, output } => {
                let config = Config::load()?;
                let session = build_session(&config)?;
                let explicit = lat.zip(lon).map(|(lat, lon)| Coordinates::new(lat, lon));
                let geolocator = geolocator_from(&config, explicit);

                session.request_current_location(geolocator.as_ref()).await;
                print_state(&session, &output)
            }
            Command::Interactive => interactive().await,
        }
    }
}

fn build_session(config: &Config) -> anyhow::Result<WeatherSession> {
    let provider = provider_from_config(config)?;
    Ok(WeatherSession::from_config(Arc::from(provider), config))
}

fn print_state(session: &WeatherSession, output: &OutputArgs) -> anyhow::Result<()> {
    let state = session.state();
    if output.json {
        let json =
            serde_json::to_string_pretty(&state).context("Failed to serialize session state")?;
        println!("{json}");
    } else {
        print!("{}", view::render(&state));
    }
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()?;
    config.set_api_key(api_key.trim().to_string());

    let base_url = Text::new("API base URL:")
        .with_default(&config.base_url)
        .prompt()?;
    config.base_url = base_url.trim().to_string();

    let default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()?;
    config.default_city = default_city.trim().to_string();

    let fixed = Confirm::new("Set a fixed location for `weather here`?")
        .with_default(config.location.is_some())
        .prompt()?;
    config.location = if fixed {
        let lat = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please enter a number")
            .prompt()?;
        let lon = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please enter a number")
            .prompt()?;
        Some(Coordinates::new(lat, lon))
    } else {
        None
    };

    let path = config.save()?;
    println!("Configuration saved to {}", path.display());
    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    let session = build_session(&config)?;
    let geolocator = geolocator_from(&config, None);

    session.initialize().await;
    print!("{}", view::render(&session.state()));

    loop {
        let input = match Text::new("City:")
            .with_help_message("`:here` for current location, `:quit` to exit")
            .prompt()
        {
            Ok(input) => input,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };

        match input.trim() {
            QUIT => break,
            HERE => session.request_current_location(geolocator.as_ref()).await,
            _ => {
                session.set_query(input.as_str());
                session.submit_query().await;
            }
        }

        println!();
        print!("{}", view::render(&session.state()));
    }

    debug!("leaving interactive mode");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn here_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["weather", "here", "--lat", "-33.87", "--lon", "151.21"])
            .expect("valid args");

        match cli.command {
            Command::Here { lat, lon, .. } => {
                assert_eq!(lat, Some(-33.87));
                assert_eq!(lon, Some(151.21));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn here_requires_both_coordinates() {
        assert!(Cli::try_parse_from(["weather", "here", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn show_city_is_optional() {
        let cli = Cli::try_parse_from(["weather", "show", "--json"]).expect("valid args");
        match cli.command {
            Command::Show { city, output } => {
                assert!(city.is_none());
                assert!(output.json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
