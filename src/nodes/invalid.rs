use async_trait::async_trait;

use crate::message::Message;
use crate::node::{Node, NodeContext, NodeError};
use crate::state::{StateSnapshot, StateUpdate};

pub const INVALID_REPLY: &str = "The query you provided is invalid.";

/// Handles invalid or empty user input with a fixed rejection reply.
pub struct InvalidQuery;

#[async_trait]
impl Node for InvalidQuery {
    async fn run(
        &self,
        _snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateUpdate, NodeError> {
        ctx.trace("reply", "rejecting invalid query");
        Ok(StateUpdate::new().with_messages(vec![Message::assistant(INVALID_REPLY)]))
    }
}
