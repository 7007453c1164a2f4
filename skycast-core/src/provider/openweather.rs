use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::{
    config::DEFAULT_BASE_URL,
    error::WeatherError,
    model::{CurrentConditions, ForecastEntry, LocationQuery},
};

use super::WeatherSource;

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    units: String,
    lang: String,
    http: Client,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            units: "metric".to_string(),
            lang: "ru".to_string(),
            http: Client::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_locale(mut self, units: &str, lang: &str) -> Self {
        self.units = units.to_string();
        self.lang = lang.to_string();
        self
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut params: Vec<(&str, String)> = match query {
            LocationQuery::City(city) => vec![("q", city.clone())],
            LocationQuery::Coordinates(c) => {
                vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())]
            }
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", self.units.clone()));
        params.push(("lang", self.lang.clone()));

        tracing::debug!("GET {} for {:?}", url, query);

        let res = self.http.get(&url).query(&params).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::LocationNotFound);
        }

        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(format!("{endpoint}: {e}")))
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwForecastWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl TryFrom<OwCurrentResponse> for CurrentConditions {
    type Error = WeatherError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let weather = parsed.weather.into_iter().next().ok_or_else(|| {
            WeatherError::MalformedResponse("weather: empty condition list".to_string())
        })?;

        Ok(Self {
            city: parsed.name,
            temperature_c: parsed.main.temp,
            description: weather.description,
            icon: weather.icon,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
        })
    }
}

impl TryFrom<OwForecastEntry> for ForecastEntry {
    type Error = WeatherError;

    fn try_from(entry: OwForecastEntry) -> Result<Self, Self::Error> {
        let weather = entry.weather.into_iter().next().ok_or_else(|| {
            WeatherError::MalformedResponse(format!(
                "forecast: sample {} has no conditions",
                entry.dt_txt
            ))
        })?;

        Ok(Self {
            date: entry.dt_txt,
            temperature_c: entry.main.temp,
            icon: weather.icon,
        })
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn current(&self, query: &LocationQuery) -> Result<CurrentConditions, WeatherError> {
        let parsed: OwCurrentResponse = self.get("weather", query).await?;
        CurrentConditions::try_from(parsed)
    }

    async fn forecast(&self, query: &LocationQuery) -> Result<Vec<ForecastEntry>, WeatherError> {
        let parsed: OwForecastResponse = self.get("forecast", query).await?;
        parsed.list.into_iter().map(ForecastEntry::try_from).collect()
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn current_body() -> serde_json::Value {
        serde_json::json!({
            "name": "Moscow",
            "dt": 1714557600,
            "main": {"temp": 14.2, "feels_like": 13.1, "humidity": 55, "pressure": 1012},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "wind": {"speed": 4.1, "deg": 200}
        })
    }

    fn forecast_body() -> serde_json::Value {
        serde_json::json!({
            "cod": "200",
            "list": [
                {
                    "dt_txt": "2024-05-01 12:00:00",
                    "main": {"temp": 14.0},
                    "weather": [{"icon": "01d"}]
                },
                {
                    "dt_txt": "2024-05-01 15:00:00",
                    "main": {"temp": 16.5},
                    "weather": [{"icon": "02d"}]
                },
                {
                    "dt_txt": "2024-05-02 00:00:00",
                    "main": {"temp": 8.0},
                    "weather": [{"icon": "01n"}]
                }
            ],
            "city": {"name": "Moscow", "country": "RU"}
        })
    }

    fn client(server: &MockServer) -> OpenWeatherClient {
        OpenWeatherClient::new("test_key".into()).with_base_url(&server.uri())
    }

    #[tokio::test]
    async fn current_maps_nested_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Moscow"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "ru"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let current = client(&server)
            .current(&LocationQuery::City("Moscow".into()))
            .await
            .unwrap();

        assert_eq!(current.city, "Moscow");
        assert_eq!(current.temperature_c, 14.2);
        assert_eq!(current.description, "clear sky");
        assert_eq!(current.icon, "01d");
        assert_eq!(current.humidity_pct, 55);
        assert_eq!(current.wind_speed_mps, 4.1);
        assert_eq!(current.pressure_hpa, 1012);
    }

    #[tokio::test]
    async fn forecast_keeps_source_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
            .mount(&server)
            .await;

        let entries = client(&server)
            .forecast(&LocationQuery::City("Moscow".into()))
            .await
            .unwrap();

        let dates: Vec<_> = entries.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, ["2024-05-01 12:00:00", "2024-05-01 15:00:00", "2024-05-02 00:00:00"]);
        assert_eq!(entries[1].icon, "02d");
    }

    #[tokio::test]
    async fn coordinates_are_sent_as_lat_lon() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("lat", "59.5"))
            .and(query_param("lon", "30.25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let query = LocationQuery::Coordinates(Coordinates { lat: 59.5, lon: 30.25 });
        let current = client(&server).current(&query).await.unwrap();

        assert_eq!(current.city, "Moscow");
    }

    #[tokio::test]
    async fn not_found_status_is_location_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .current(&LocationQuery::City("Nowhere".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::LocationNotFound));
    }

    #[tokio::test]
    async fn server_error_keeps_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
            .mount(&server)
            .await;

        let err = client(&server)
            .forecast(&LocationQuery::City("Moscow".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn missing_field_is_malformed() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "Moscow"})),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .current(&LocationQuery::City("Moscow".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn empty_condition_list_is_malformed() {
        let server = MockServer::start().await;

        let mut body = current_body();
        body["weather"] = serde_json::json!([]);

        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let err = client(&server)
            .current(&LocationQuery::City("Moscow".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, WeatherError::MalformedResponse(msg) if msg.contains("weather")));
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(300);
        let out = truncate_body(&long);
        assert_eq!(out.len(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
