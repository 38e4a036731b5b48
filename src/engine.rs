//! The workflow engine.
//!
//! A fixed, acyclic decision workflow over a finite set of [`Phase`]s:
//!
//! ```text
//! Start ──validate──▶ Validated ──route(validity)──▶ Classified ──route(intent)──▶ WeatherDone
//!                                        │                              └────────▶ YearDone
//!                                        └──────────▶ InvalidDone
//! ```
//!
//! The transition table is a plain `match`; with five nodes and three exits
//! there is nothing for a declarative graph layer to earn. Each invocation
//! executes exactly one path, awaiting each node to completion before the
//! next, and returns the final [`QueryState`]; the caller reads the last
//! message as the user-visible answer.

use std::fmt;
use std::sync::Arc;

use miette::Diagnostic;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use crate::clients::llm::CompletionClient;
use crate::clients::weather::WeatherClient;
use crate::node::{Node, NodeContext, NodeError};
use crate::nodes::{ClassifyIntent, CurrentYear, InvalidQuery, ValidateQuery, WeatherHandler};
use crate::router::{Intent, Validity, route_intent, route_validation};
use crate::state::QueryState;

/// Execution phases of the workflow.
///
/// `WeatherDone`, `YearDone`, and `InvalidDone` are terminal: reaching one
/// ends the invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Start,
    Validated,
    Classified,
    WeatherDone,
    YearDone,
    InvalidDone,
}

impl Phase {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Phase::WeatherDone | Phase::YearDone | Phase::InvalidDone
        )
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Start => "Start",
            Phase::Validated => "Validated",
            Phase::Classified => "Classified",
            Phase::WeatherDone => "WeatherDone",
            Phase::YearDone => "YearDone",
            Phase::InvalidDone => "InvalidDone",
        };
        f.write_str(name)
    }
}

/// Errors that abort an invocation.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Node(#[from] NodeError),
}

/// Composes the five nodes into the routing workflow and executes it
/// end-to-end for one input.
pub struct Engine {
    validate: ValidateQuery,
    classify: ClassifyIntent,
    weather: WeatherHandler,
    year: CurrentYear,
    invalid: InvalidQuery,
}

impl Engine {
    /// Builds an engine around the two external collaborators.
    #[must_use]
    pub fn new(llm: Arc<dyn CompletionClient>, weather: Arc<dyn WeatherClient>) -> Self {
        Self {
            validate: ValidateQuery,
            classify: ClassifyIntent,
            weather: WeatherHandler::new(llm, weather),
            year: CurrentYear,
            invalid: InvalidQuery,
        }
    }

    /// Runs the workflow to a terminal phase and returns the final state.
    ///
    /// The seeded state must carry at least one user message; the last
    /// message of the returned state is the user-visible answer.
    #[instrument(name = "invoke", skip_all)]
    pub async fn invoke(&self, mut state: QueryState) -> Result<QueryState, EngineError> {
        let invocation_id = Uuid::new_v4().to_string();
        let mut phase = Phase::Start;
        let mut step: u64 = 0;

        loop {
            let next = match phase {
                Phase::Start => {
                    step += 1;
                    self.run_node(&mut state, &self.validate, "validate_query", &invocation_id, step)
                        .await?;
                    Phase::Validated
                }
                Phase::Validated => match route_validation(&state.snapshot()) {
                    Validity::Valid => {
                        step += 1;
                        self.run_node(&mut state, &self.classify, "check_weather", &invocation_id, step)
                            .await?;
                        Phase::Classified
                    }
                    Validity::Invalid => {
                        step += 1;
                        self.run_node(&mut state, &self.invalid, "invalid_query", &invocation_id, step)
                            .await?;
                        Phase::InvalidDone
                    }
                },
                Phase::Classified => match route_intent(&state.snapshot()) {
                    Intent::Weather => {
                        step += 1;
                        self.run_node(&mut state, &self.weather, "weather", &invocation_id, step)
                            .await?;
                        Phase::WeatherDone
                    }
                    Intent::Year => {
                        step += 1;
                        self.run_node(&mut state, &self.year, "current_year", &invocation_id, step)
                            .await?;
                        Phase::YearDone
                    }
                },
                Phase::WeatherDone | Phase::YearDone | Phase::InvalidDone => break,
            };
            tracing::debug!(
                invocation = %invocation_id,
                step,
                from = %phase,
                to = %next,
                "phase transition"
            );
            phase = next;
        }

        Ok(state)
    }

    async fn run_node(
        &self,
        state: &mut QueryState,
        node: &dyn Node,
        name: &'static str,
        invocation_id: &str,
        step: u64,
    ) -> Result<(), NodeError> {
        let ctx = NodeContext::new(invocation_id, name, step);
        let update = node.run(state.snapshot(), ctx).await?;
        state.apply(update);
        Ok(())
    }
}
