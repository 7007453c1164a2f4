use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const ICON_URL_TEMPLATE_PREFIX: &str = "http://openweathermap.org/img/wn/";

/// Image URL for an OpenWeather icon code, e.g. `"10d"`.
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_URL_TEMPLATE_PREFIX}{icon}@2x.png")
}

/// Render a `YYYY-MM-DD` day key as `DD.MM.YYYY`, or return it unchanged if it does not parse.
pub fn format_day_label(day_key: &str) -> String {
    NaiveDate::parse_from_str(day_key, "%Y-%m-%d")
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|_| day_key.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// How a location is keyed when talking to the weather source.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates(Coordinates),
}

/// One point-in-time reading for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub city: String,
    pub temperature_c: f64,
    pub description: String,
    pub icon: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
}

/// One 3-hour sample of the forecast feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Raw `YYYY-MM-DD HH:MM:SS` timestamp as emitted by the source.
    pub date: String,
    pub temperature_c: f64,
    pub icon: String,
}

impl ForecastEntry {
    pub fn day_key(&self) -> &str {
        crate::forecast::day_key(&self.date)
    }

    /// The `HH:MM:SS` part of the timestamp, empty if there is none.
    pub fn time_of_day(&self) -> &str {
        self.date.split_once(' ').map(|(_, time)| time).unwrap_or("")
    }
}

/// First sample of a calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub temperature_c: f64,
    pub icon: String,
}

/// The complete, unfiltered forecast feed, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub entries: Vec<ForecastEntry>,
}

/// What a successful fetch produced before aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResult {
    /// Place name reported by the source; used to re-key coordinate lookups.
    pub place: String,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastEntry>,
}

/// Display-ready data for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub daily: Vec<DailySummary>,
    pub hourly: HourlyForecast,
}

impl WeatherReport {
    pub fn from_fetch(fetch: FetchResult) -> Self {
        let daily = crate::forecast::daily_summaries(&fetch.forecast);

        Self {
            current: fetch.current,
            daily,
            hourly: HourlyForecast { entries: fetch.forecast },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_url_uses_double_resolution_asset() {
        assert_eq!(icon_url("10d"), "http://openweathermap.org/img/wn/10d@2x.png");
    }

    #[test]
    fn day_label_is_day_month_year() {
        assert_eq!(format_day_label("2024-05-01"), "01.05.2024");
        assert_eq!(format_day_label("tomorrow"), "tomorrow");
    }

    #[test]
    fn time_of_day_is_after_the_space() {
        let entry = ForecastEntry {
            date: "2024-05-01 15:00:00".into(),
            temperature_c: 12.0,
            icon: "01d".into(),
        };
        assert_eq!(entry.day_key(), "2024-05-01");
        assert_eq!(entry.time_of_day(), "15:00:00");
    }
}
