use async_trait::async_trait;

use crate::node::{Node, NodeContext, NodeError};
use crate::state::{StateSnapshot, StateUpdate};

/// Determines whether the query is related to weather.
///
/// Sets `needs_weather` to true iff the latest message contains the
/// substring "weather" in any letter casing. Deterministic, no side effects.
pub struct ClassifyIntent;

/// The classification predicate on its own, for reuse in tests.
#[must_use]
pub fn mentions_weather(content: &str) -> bool {
    content.to_lowercase().contains("weather")
}

#[async_trait]
impl Node for ClassifyIntent {
    async fn run(
        &self,
        snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateUpdate, NodeError> {
        let content = snapshot.last_content().ok_or(NodeError::MissingInput {
            what: "user message",
        })?;
        let needs_weather = mentions_weather(content);
        ctx.trace("classification", format!("needs_weather={needs_weather}"));
        Ok(StateUpdate::new().with_needs_weather(needs_weather))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::QueryState;

    fn ctx() -> NodeContext {
        NodeContext::new("test", "check_weather", 2)
    }

    async fn classify(content: &str) -> bool {
        let snapshot = QueryState::new_with_user_message(content).snapshot();
        let update = ClassifyIntent
            .run(snapshot, ctx())
            .await
            .expect("seeded state");
        update.needs_weather.expect("classification sets the flag")
    }

    #[tokio::test]
    async fn detects_weather_in_any_casing() {
        assert!(classify("What is the weather of Paris?").await);
        assert!(classify("WEATHER").await);
        assert!(classify("Is the Weather nice today?").await);
        assert!(classify("wEaThEr report please").await);
    }

    #[tokio::test]
    async fn ignores_queries_without_the_keyword() {
        assert!(!classify("Tell me a joke").await);
        assert!(!classify("What year is it?").await);
        // "whether" is not "weather"
        assert!(!classify("I wonder whether it rains").await);
    }

    #[tokio::test]
    async fn keyword_may_appear_mid_word() {
        assert!(classify("weatherman forecast").await);
    }
}
