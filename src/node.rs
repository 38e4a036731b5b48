//! Node execution primitives for the routing workflow.
//!
//! A [`Node`] is one unit of work: it receives an immutable
//! [`StateSnapshot`] plus a [`NodeContext`], and returns a [`StateUpdate`]
//! for the engine to merge. Nodes are stateless and focused; anything they
//! want to say to the user goes into appended messages, anything they want
//! to say to the routers goes into the flags.

use async_trait::async_trait;
use miette::Diagnostic;
use thiserror::Error;

use crate::clients::llm::LlmError;
use crate::state::{StateSnapshot, StateUpdate};

/// A single unit of work within the workflow.
///
/// # Error Handling
///
/// Returning `Err(NodeError)` is fatal to the invocation. Failures the
/// workflow should absorb (weather lookups, see the weather handler) are
/// converted into assistant messages instead of errors.
#[async_trait]
pub trait Node: Send + Sync {
    /// Execute this node against the given snapshot.
    async fn run(
        &self,
        snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<StateUpdate, NodeError>;
}

/// Execution context passed to nodes.
///
/// Identifies the node within the invocation so its tracing output can be
/// correlated with the engine's transition log.
#[derive(Clone, Debug)]
pub struct NodeContext {
    /// Identifier of the invocation this node runs in.
    pub invocation_id: String,
    /// Name of the node as the engine knows it.
    pub node: &'static str,
    /// Execution step number within the invocation, starting at 1.
    pub step: u64,
}

impl NodeContext {
    #[must_use]
    pub fn new(invocation_id: impl Into<String>, node: &'static str, step: u64) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            node,
            step,
        }
    }

    /// Emit a node-scoped trace event enriched with this context's metadata.
    pub fn trace(&self, scope: &str, message: impl AsRef<str>) {
        tracing::debug!(
            invocation = %self.invocation_id,
            node = self.node,
            step = self.step,
            scope,
            "{}",
            message.as_ref()
        );
    }
}

/// Errors that halt workflow execution.
#[derive(Debug, Error, Diagnostic)]
pub enum NodeError {
    /// Expected input data is missing from the state snapshot.
    #[error("missing expected input: {what}")]
    #[diagnostic(
        code(weathervane::node::missing_input),
        help("The state must be seeded with at least one message before the engine runs.")
    )]
    MissingInput { what: &'static str },

    /// External provider error that the workflow does not absorb.
    #[error("provider error ({provider}): {message}")]
    #[diagnostic(code(weathervane::node::provider))]
    Provider {
        provider: &'static str,
        message: String,
    },
}

// Completion failures are the one collaborator error class that aborts the
// invocation instead of degrading to a fallback reply.
impl From<LlmError> for NodeError {
    fn from(err: LlmError) -> Self {
        NodeError::Provider {
            provider: "completion",
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_carries_identity() {
        let ctx = NodeContext::new("inv-1", "validate_query", 1);
        assert_eq!(ctx.invocation_id, "inv-1");
        assert_eq!(ctx.node, "validate_query");
        assert_eq!(ctx.step, 1);
    }

    #[test]
    fn llm_errors_map_to_provider_errors() {
        let err: NodeError = LlmError::MalformedResponse {
            what: "candidates[0].content.parts[0].text",
        }
        .into();
        match err {
            NodeError::Provider { provider, message } => {
                assert_eq!(provider, "completion");
                assert!(message.contains("candidates[0]"));
            }
            other => panic!("expected provider error, got {other:?}"),
        }
    }
}
