//! Weather-lookup collaborator.
//!
//! A metric-units current-conditions lookup keyed by a free-text city name.
//! The city arrives straight from the completion collaborator, so it is
//! treated as untrusted input: it is passed as a query parameter and
//! percent-encoded by the HTTP layer, never spliced into the URL path.

use async_trait::async_trait;
use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

/// Current weather conditions for a city.
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReport {
    /// Temperature in °C.
    pub temp: f64,
    /// Textual condition description, e.g. "clear sky".
    pub description: String,
}

/// Weather-lookup collaborator contract.
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Fetch current conditions for `city` in metric units.
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}

/// Errors from the weather collaborator.
///
/// The weather handler absorbs every variant into a fallback reply; the
/// enum exists so the absorption is over a closed, named set rather than a
/// blanket catch.
#[derive(Debug, Error, Diagnostic)]
pub enum WeatherError {
    /// Transport or body-decode failure.
    #[error("weather request failed: {0}")]
    #[diagnostic(code(weathervane::weather::http))]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status (unknown city,
    /// missing or invalid API key).
    #[error("weather endpoint returned status {status}")]
    #[diagnostic(code(weathervane::weather::status))]
    Status { status: u16 },

    /// The response parsed but did not carry the expected fields.
    #[error("weather response missing {what}")]
    #[diagnostic(code(weathervane::weather::shape))]
    MissingField { what: &'static str },
}

#[derive(Debug, Deserialize)]
struct CurrentConditions {
    main: Option<MainSection>,
    weather: Option<Vec<ConditionEntry>>,
}

#[derive(Debug, Deserialize)]
struct MainSection {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    description: String,
}

/// OpenWeather current-conditions client
/// (`GET {base}/data/2.5/weather?q={city}&appid={key}&units=metric`).
pub struct OpenWeatherClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openweathermap.org";

    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the endpoint base, e.g. to point at a mock server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    async fn current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
            });
        }

        let payload: CurrentConditions = response.json().await?;
        let temp = payload
            .main
            .ok_or(WeatherError::MissingField { what: "main.temp" })?
            .temp;
        let description = payload
            .weather
            .and_then(|entries| entries.into_iter().next())
            .map(|entry| entry.description)
            .ok_or(WeatherError::MissingField {
                what: "weather[0].description",
            })?;

        Ok(WeatherReport { temp, description })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_shape_deserializes() {
        let payload: CurrentConditions = serde_json::from_str(
            r#"{"main":{"temp":18.2,"humidity":40},"weather":[{"description":"clear sky","id":800}]}"#,
        )
        .expect("valid shape");
        assert_eq!(payload.main.map(|m| m.temp), Some(18.2));
        assert_eq!(
            payload.weather.and_then(|w| w.into_iter().next()).map(|c| c.description),
            Some("clear sky".to_string())
        );
    }

    #[test]
    fn missing_sections_deserialize_to_none() {
        let payload: CurrentConditions =
            serde_json::from_str(r#"{"cod":"404","message":"city not found"}"#).expect("parses");
        assert!(payload.main.is_none());
        assert!(payload.weather.is_none());
    }
}
