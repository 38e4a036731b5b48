use std::sync::Arc;

use async_trait::async_trait;

use crate::clients::llm::CompletionClient;
use crate::clients::weather::WeatherClient;
use crate::message::Message;
use crate::node::{Node, NodeContext, NodeError};
use crate::state::{StateSnapshot, StateUpdate};

/// City assumed when the query names none.
pub const FALLBACK_CITY: &str = "Kathmandu";

/// Extracts a city name via the completion collaborator and fetches current
/// conditions via the weather collaborator.
///
/// The completion text, trimmed, is used verbatim as the lookup key; no
/// further validation or allow-listing is applied (the HTTP client encodes
/// it at the URL boundary). Weather-lookup failures of any kind degrade to
/// a fallback sentence and never leave this node; completion failures
/// propagate and abort the invocation.
pub struct WeatherHandler {
    llm: Arc<dyn CompletionClient>,
    weather: Arc<dyn WeatherClient>,
}

impl WeatherHandler {
    #[must_use]
    pub fn new(llm: Arc<dyn CompletionClient>, weather: Arc<dyn WeatherClient>) -> Self {
        Self { llm, weather }
    }

    fn extraction_prompt(query_lower: &str) -> String {
        format!(
            "Extract only the city name from: '{query_lower}'. If none, say {FALLBACK_CITY}."
        )
    }
}

#[async_trait]
impl Node for WeatherHandler {
    async fn run(
        &self,
        snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateUpdate, NodeError> {
        let query = snapshot
            .last_content()
            .ok_or(NodeError::MissingInput {
                what: "user message",
            })?
            .to_lowercase();

        ctx.trace("extraction", "asking completion model for the city name");
        let completion = self.llm.complete(&Self::extraction_prompt(&query)).await?;
        let city = completion.trim().to_string();

        ctx.trace("lookup", format!("fetching current conditions for {city}"));
        let reply = match self.weather.current(&city).await {
            Ok(report) => format!(
                "The weather in {city} is {}°C with {}.",
                report.temp, report.description
            ),
            Err(err) => {
                tracing::debug!(
                    invocation = %ctx.invocation_id,
                    city,
                    error = %err,
                    "weather lookup failed, degrading to fallback reply"
                );
                format!("Could not fetch weather data for {city}.")
            }
        };

        Ok(StateUpdate::new()
            .with_needs_weather(true)
            .with_messages(vec![Message::assistant(&reply)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::llm::LlmError;
    use crate::clients::weather::{WeatherError, WeatherReport};
    use crate::message::Role;
    use crate::state::QueryState;
    use std::sync::Mutex;

    struct ScriptedLlm {
        reply: &'static str,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedLlm {
        fn new(reply: &'static str) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedLlm {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.to_string())
        }
    }

    struct StaticWeather(WeatherReport);

    #[async_trait]
    impl WeatherClient for StaticWeather {
        async fn current(&self, _city: &str) -> Result<WeatherReport, WeatherError> {
            Ok(self.0.clone())
        }
    }

    struct Unreachable;

    #[async_trait]
    impl WeatherClient for Unreachable {
        async fn current(&self, _city: &str) -> Result<WeatherReport, WeatherError> {
            Err(WeatherError::Status { status: 404 })
        }
    }

    struct BrokenLlm;

    #[async_trait]
    impl CompletionClient for BrokenLlm {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            Err(LlmError::Status {
                status: 403,
                body: "API key not valid".to_string(),
            })
        }
    }

    fn ctx() -> NodeContext {
        NodeContext::new("test", "weather", 3)
    }

    #[tokio::test]
    async fn formats_the_report_sentence() {
        let llm = Arc::new(ScriptedLlm::new("  Paris\n"));
        let node = WeatherHandler::new(
            llm.clone(),
            Arc::new(StaticWeather(WeatherReport {
                temp: 18.2,
                description: "clear sky".to_string(),
            })),
        );
        let snapshot = QueryState::new_with_user_message("What is the weather of Paris?").snapshot();

        let update = node.run(snapshot, ctx()).await.expect("lookup succeeds");

        let messages = update.messages.expect("one reply");
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(
            messages[0].content,
            "The weather in Paris is 18.2°C with clear sky."
        );
        assert_eq!(update.needs_weather, Some(true));

        // The extraction prompt is templated on the lower-cased query.
        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(
            prompts[0],
            "Extract only the city name from: 'what is the weather of paris?'. If none, say Kathmandu."
        );
    }

    #[tokio::test]
    async fn lookup_failure_degrades_to_fallback_sentence() {
        let node = WeatherHandler::new(Arc::new(ScriptedLlm::new("Zzzyx")), Arc::new(Unreachable));
        let snapshot = QueryState::new_with_user_message("What is the weather of Zzzyx?").snapshot();

        let update = node.run(snapshot, ctx()).await.expect("failure absorbed");

        let messages = update.messages.expect("one reply");
        assert_eq!(messages[0].content, "Could not fetch weather data for Zzzyx.");
        assert_eq!(update.needs_weather, Some(true));
    }

    #[tokio::test]
    async fn completion_failure_propagates() {
        let node = WeatherHandler::new(
            Arc::new(BrokenLlm),
            Arc::new(StaticWeather(WeatherReport {
                temp: 1.0,
                description: "mist".to_string(),
            })),
        );
        let snapshot = QueryState::new_with_user_message("weather?").snapshot();

        let err = node
            .run(snapshot, ctx())
            .await
            .expect_err("completion errors are not absorbed");
        assert!(matches!(err, NodeError::Provider { provider: "completion", .. }));
    }
}
