//! Display state for one interactive session.
//!
//! [`Session`] is the only place where the current report, loading flag and
//! error message live. Each fetch takes a [`FetchTicket`]; only the newest
//! ticket may change the displayed report, so a slow earlier lookup cannot
//! overwrite a later one.

use crate::{
    error::{GeolocationError, WeatherError},
    model::{Coordinates, FetchResult, ForecastEntry, WeatherReport},
    provider::{
        Geolocator, WeatherSource, fetch_current_and_forecast,
        fetch_current_and_forecast_by_coordinates,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

#[derive(Debug, Default)]
pub struct Session {
    query: String,
    report: Option<WeatherReport>,
    loading: bool,
    error: Option<String>,
    selected_day: Option<String>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// The city text, re-keyed to the resolved place after coordinate lookups.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected_day(&self) -> Option<&str> {
        self.selected_day.as_deref()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        FetchTicket(self.generation)
    }

    /// Apply a finished fetch. Returns `false` if a newer fetch has started
    /// since `ticket` was issued; the result is then dropped.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<FetchResult, WeatherError>,
    ) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!("Dropping stale fetch result (generation {})", ticket.0);
            return false;
        }

        self.loading = false;

        match result {
            Ok(fetch) => {
                self.query = fetch.place.clone();
                self.report = Some(WeatherReport::from_fetch(fetch));
                self.selected_day = None;
                self.error = None;
            }
            Err(err) => {
                tracing::warn!("Weather lookup failed: {}", err);
                self.error = Some(err.user_message().to_string());
            }
        }

        true
    }

    pub fn fail_geolocation(&mut self, err: GeolocationError) {
        tracing::info!("No coordinates available: {}", err);
        self.error = Some(err.user_message().to_string());
    }

    pub fn select_day(&mut self, day: &str) {
        self.selected_day = Some(day.to_string());
    }

    pub fn clear_selection(&mut self) {
        self.selected_day = None;
    }

    /// Hourly samples of the selected day, empty when nothing is selected.
    pub fn selected_hourly(&self) -> Vec<&ForecastEntry> {
        match (&self.report, &self.selected_day) {
            (Some(report), Some(day)) => report.hourly.for_day(day),
            _ => Vec::new(),
        }
    }

    pub async fn search(&mut self, source: &dyn WeatherSource, city: &str) {
        self.query = city.to_string();
        let ticket = self.begin_fetch();
        let result = fetch_current_and_forecast(source, city).await;
        self.complete(ticket, result);
    }

    pub async fn search_by_coordinates(
        &mut self,
        source: &dyn WeatherSource,
        coords: Coordinates,
    ) {
        let ticket = self.begin_fetch();
        let result = fetch_current_and_forecast_by_coordinates(source, coords).await;
        self.complete(ticket, result);
    }

    /// Look up weather at the geolocator's position, or record why there is none.
    pub async fn search_from_geolocation(
        &mut self,
        source: &dyn WeatherSource,
        geolocator: &dyn Geolocator,
    ) {
        match geolocator.locate().await {
            Ok(coords) => self.search_by_coordinates(source, coords).await,
            Err(err) => self.fail_geolocation(err),
        }
    }
}
