//! External collaborator clients.
//!
//! The workflow core depends on two outside services: a text-completion
//! model used to extract a city name, and a weather lookup endpoint. Both
//! are hidden behind small traits so tests can substitute deterministic
//! doubles; the concrete implementations here speak the real HTTP contracts.

pub mod llm;
pub mod weather;

pub use llm::{CompletionClient, GeminiClient, LlmError};
pub use weather::{OpenWeatherClient, WeatherClient, WeatherError, WeatherReport};
