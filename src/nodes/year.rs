use async_trait::async_trait;
use chrono::{Datelike, Local};

use crate::message::Message;
use crate::node::{Node, NodeContext, NodeError};
use crate::state::{StateSnapshot, StateUpdate};

/// Replies with the current system year when weather is not requested.
///
/// Deterministic given the clock; no external calls.
pub struct CurrentYear;

#[async_trait]
impl Node for CurrentYear {
    async fn run(
        &self,
        _snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateUpdate, NodeError> {
        let year = Local::now().year();
        ctx.trace("reply", format!("answering with year {year}"));
        let reply = format!("The current running year is {year}.");
        Ok(StateUpdate::new().with_messages(vec![Message::assistant(&reply)]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Role;
    use crate::state::QueryState;

    #[tokio::test]
    async fn reply_carries_the_local_calendar_year() {
        let snapshot = QueryState::new_with_user_message("Tell me a joke").snapshot();
        let update = CurrentYear
            .run(snapshot, NodeContext::new("test", "current_year", 3))
            .await
            .expect("no failure modes");
        let messages = update.messages.expect("one reply");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::Assistant);
        assert_eq!(
            messages[0].content,
            format!("The current running year is {}.", Local::now().year())
        );
    }
}
