use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Password, Select};
use serde::Serialize;

use skycast_core::{
    Config, Coordinates, FixedGeolocator, ForecastEntry, Session, WeatherReport,
    provider::source_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key, response language and home coordinates.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name.
        city: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show weather for coordinates; falls back to the configured home position.
    Locate {
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, clap::Args)]
pub struct OutputArgs {
    /// Also print the 3-hourly forecast for this day (YYYY-MM-DD).
    #[arg(long, value_parser = parse_day)]
    day: Option<String>,

    /// Print the report as JSON instead of text.
    #[arg(long)]
    json: bool,
}

fn parse_day(value: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("'{value}' is not a YYYY-MM-DD date"))?;
    Ok(date.format("%Y-%m-%d").to_string())
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, output } => {
                let config = Config::load()?;
                let source = source_from_config(&config)?;

                tracing::debug!("Looking up weather for {}", city);

                let mut session = Session::new();
                session.search(&source, &city).await;

                print_session(&mut session, &config, &output)
            }
            Command::Locate { lat, lon, output } => {
                let config = Config::load()?;
                let source = source_from_config(&config)?;

                let position = match (lat, lon) {
                    (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
                    _ => config.home,
                };
                tracing::debug!("Looking up weather at {:?}", position);

                let mut session = Session::new();
                session.search_from_geolocation(&source, &FixedGeolocator::new(position)).await;

                print_session(&mut session, &config, &output)
            }
        }
    }
}

fn print_session(session: &mut Session, config: &Config, output: &OutputArgs) -> Result<()> {
    if let Some(message) = session.error() {
        bail!("{message}");
    }

    if let Some(day) = &output.day {
        session.select_day(day);
    }

    let report = session
        .report()
        .ok_or_else(|| anyhow!("No weather data received"))?;

    if output.json {
        println!("{}", report_json(session)?);
        return Ok(());
    }

    print!("{}", render::current(&report.current, config.localize));
    print!("{}", render::daily(&report.daily));

    if let Some(day) = session.selected_day() {
        print!("{}", render::hourly(day, &session.selected_hourly()));
    }

    Ok(())
}

/// JSON view of the session; carries the selected day's samples when `--day` is set.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a WeatherReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_day: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_hourly: Option<Vec<&'a ForecastEntry>>,
}

fn report_json(session: &Session) -> Result<String> {
    let report = session
        .report()
        .ok_or_else(|| anyhow!("No weather data received"))?;

    let selected_day = session.selected_day();
    let json = JsonReport {
        report,
        selected_day,
        selected_hourly: selected_day.map(|_| session.selected_hourly()),
    };

    serde_json::to_string_pretty(&json).context("Failed to serialize report to JSON")
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        bail!("API key must not be empty");
    }
    config.set_api_key(api_key.trim().to_string());

    let lang = Select::new("Response language:", vec!["ru", "en"])
        .prompt()
        .context("Failed to read language")?;
    config.lang = lang.to_string();

    config.localize = Confirm::new("Translate English condition phrases to Russian?")
        .with_default(config.localize)
        .prompt()
        .context("Failed to read localization choice")?;

    let set_home = Confirm::new("Store home coordinates for `skycast locate`?")
        .with_default(config.home.is_some())
        .prompt()
        .context("Failed to read home choice")?;

    config.home = if set_home {
        let lat = CustomType::<f64>::new("Latitude:")
            .prompt()
            .context("Failed to read latitude")?;
        let lon = CustomType::<f64>::new("Longitude:")
            .prompt()
            .context("Failed to read longitude")?;
        Some(Coordinates { lat, lon })
    } else {
        None
    };

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}
