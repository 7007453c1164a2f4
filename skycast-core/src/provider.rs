use async_trait::async_trait;
use std::fmt::Debug;
use tracing::instrument;

use crate::{
    Config,
    error::WeatherError,
    model::{Coordinates, CurrentConditions, FetchResult, ForecastEntry, LocationQuery},
    provider::openweather::OpenWeatherClient,
};

pub mod openweather;

/// A source of current conditions and the 3-hourly forecast feed.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, WeatherError>;

    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// Construct the OpenWeather client from config.
pub fn source_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key()?;

    Ok(OpenWeatherClient::new(api_key.to_owned())
        .with_base_url(config.base_url())
        .with_locale(&config.units, &config.lang))
}

/// Fetch current conditions and the forecast for a city name.
///
/// Both requests run concurrently and fail together.
#[instrument(skip(source))]
pub async fn fetch_current_and_forecast(
    source: &dyn WeatherSource,
    city: &str,
) -> Result<FetchResult, WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::LocationNotFound);
    }

    fetch_joint(source, LocationQuery::City(city.to_string())).await
}

/// Same as [`fetch_current_and_forecast`], keyed by coordinates. The place name
/// the source reports is returned in [`FetchResult::place`].
#[instrument(skip(source))]
pub async fn fetch_current_and_forecast_by_coordinates(
    source: &dyn WeatherSource,
    coords: Coordinates,
) -> Result<FetchResult, WeatherError> {
    fetch_joint(source, LocationQuery::Coordinates(coords)).await
}

async fn fetch_joint(
    source: &dyn WeatherSource,
    query: LocationQuery,
) -> Result<FetchResult, WeatherError> {
    let (current, forecast) = tokio::try_join!(source.current(&query), source.forecast(&query))
        .inspect_err(|e| tracing::warn!("Weather fetch for {:?} failed: {}", query, e))?;

    tracing::debug!("Fetched {} forecast samples for {}", forecast.len(), current.city);

    Ok(FetchResult {
        place: current.city.clone(),
        current,
        forecast,
    })
}

/// Supplies a one-shot coordinate reading.
#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, crate::GeolocationError>;
}

/// A geolocator backed by an already-known position, e.g. CLI flags or the
/// configured home coordinates.
#[derive(Debug, Clone, Default)]
pub struct FixedGeolocator {
    position: Option<Coordinates>,
}

impl FixedGeolocator {
    pub fn new(position: Option<Coordinates>) -> Self {
        Self { position }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, crate::GeolocationError> {
        self.position.ok_or(crate::GeolocationError::Unsupported)
    }
}
