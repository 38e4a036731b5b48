use async_trait::async_trait;

use crate::node::{Node, NodeContext, NodeError};
use crate::state::{StateSnapshot, StateUpdate};

/// Checks whether the latest query is non-empty and meaningful.
///
/// Sets `is_valid` to true iff the content is non-trivial: at least two
/// characters after trimming surrounding whitespace. Pure apart from the
/// flag it reports; reading the same state twice yields the same verdict.
pub struct ValidateQuery;

/// The meaningfulness predicate on its own, for reuse in tests.
#[must_use]
pub fn is_meaningful(content: &str) -> bool {
    content.trim().chars().count() >= 2
}

#[async_trait]
impl Node for ValidateQuery {
    async fn run(
        &self,
        snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateUpdate, NodeError> {
        let content = snapshot.last_content().ok_or(NodeError::MissingInput {
            what: "user message",
        })?;
        let is_valid = is_meaningful(content);
        ctx.trace(
            "validation",
            format!("query {}", if is_valid { "accepted" } else { "rejected" }),
        );
        Ok(StateUpdate::new().with_is_valid(is_valid))
    }
}
