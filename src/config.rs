//! Environment-backed configuration.
//!
//! Credentials are read once at process start. A missing completion key is
//! reported as a startup warning rather than an error: the workflow still
//! runs, and the completion call fails at use time. A missing weather key
//! leaves the lookup unauthenticated, which the weather handler degrades to
//! its fallback reply.

use crate::clients::llm::GeminiClient;
use crate::clients::weather::OpenWeatherClient;

/// Settings resolved from the process environment (and `.env`, if present).
#[derive(Clone, Debug, Default)]
pub struct Settings {
    pub google_api_key: Option<String>,
    pub weather_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub gemini_base_url: Option<String>,
    pub weather_base_url: Option<String>,
}

impl Settings {
    /// Loads `.env` and reads the credential and override variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let settings = Self {
            google_api_key: env_non_empty("GOOGLE_API_KEY"),
            weather_api_key: env_non_empty("WEATHER_API_KEY"),
            gemini_model: env_non_empty("GEMINI_MODEL"),
            gemini_base_url: env_non_empty("GEMINI_BASE_URL"),
            weather_base_url: env_non_empty("OPENWEATHER_BASE_URL"),
        };

        if settings.google_api_key.is_none() {
            tracing::warn!("GOOGLE_API_KEY not found; city extraction will fail at call time");
        }

        settings
    }

    /// Builds the completion client from these settings.
    #[must_use]
    pub fn completion_client(&self) -> GeminiClient {
        let mut client = GeminiClient::new(self.google_api_key.clone().unwrap_or_default());
        if let Some(model) = &self.gemini_model {
            client = client.with_model(model.clone());
        }
        if let Some(base_url) = &self.gemini_base_url {
            client = client.with_base_url(base_url.clone());
        }
        client
    }

    /// Builds the weather client from these settings.
    #[must_use]
    pub fn weather_client(&self) -> OpenWeatherClient {
        let mut client = OpenWeatherClient::new(self.weather_api_key.clone().unwrap_or_default());
        if let Some(base_url) = &self.weather_base_url {
            client = client.with_base_url(base_url.clone());
        }
        client
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}
