//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather source and its response decoders
//! - Reduction of the 3-hourly forecast into daily and per-day hourly views
//! - The session that owns what is currently displayed
//!
//! It is used by `skycast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod session;
pub mod translate;

pub use config::Config;
pub use error::{GeolocationError, LOCATION_NOT_FOUND_MESSAGE, WeatherError};
pub use model::{
    Coordinates, CurrentConditions, DailySummary, FetchResult, ForecastEntry, HourlyForecast,
    LocationQuery, WeatherReport, format_day_label, icon_url,
};
pub use provider::{
    FixedGeolocator, Geolocator, WeatherSource, fetch_current_and_forecast,
    fetch_current_and_forecast_by_coordinates,
};
pub use session::Session;
pub use translate::translate_description;
