//! Error taxonomy for fetching weather and acquiring a location.

use thiserror::Error;

/// Fixed text shown for every failed weather lookup.
pub const LOCATION_NOT_FOUND_MESSAGE: &str = "Location not found. Try again.";

/// Why no coordinates could be obtained.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("Geolocation permission denied or position unavailable")]
    Denied,

    #[error("Geolocation is not supported in this environment")]
    Unsupported,
}

impl GeolocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Denied => "Geolocation unavailable. Enter a city manually.",
            Self::Unsupported => "Geolocation is not supported. Enter a city manually.",
        }
    }
}

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Location not found")]
    LocationNotFound,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("OpenWeather request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    GeolocationUnavailable(#[from] GeolocationError),
}

impl WeatherError {
    /// User-facing text. Every fetch failure collapses to the same message.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::GeolocationUnavailable(geo) => geo.user_message(),
            Self::LocationNotFound
            | Self::MalformedResponse(_)
            | Self::Api { .. }
            | Self::Network(_) => LOCATION_NOT_FOUND_MESSAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failures_share_one_message() {
        let errors = [
            WeatherError::LocationNotFound,
            WeatherError::MalformedResponse("missing field `main`".into()),
            WeatherError::Api {
                status: 500,
                body: "boom".into(),
            },
        ];

        for err in errors {
            assert_eq!(err.user_message(), LOCATION_NOT_FOUND_MESSAGE);
        }
    }

    #[test]
    fn geolocation_errors_ask_for_manual_entry() {
        let err = WeatherError::from(GeolocationError::Denied);
        assert!(err.user_message().contains("Enter a city manually"));

        let err = WeatherError::from(GeolocationError::Unsupported);
        assert!(err.user_message().contains("not supported"));
    }
}
