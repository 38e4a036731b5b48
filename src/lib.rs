//! # Weathervane: a single-query weather routing workflow
//!
//! Weathervane answers one natural-language query by routing it through a
//! short decision workflow: validate the input, decide whether it concerns
//! weather, and produce one of three replies — a weather report, a
//! current-year fallback, or an invalid-input notice.
//!
//! ## Core Concepts
//!
//! - **Messages**: role-typed conversation records ([`message`])
//! - **State**: per-invocation record advanced by merged partial updates
//!   ([`state`])
//! - **Nodes**: async units of work over state snapshots ([`node`],
//!   [`nodes`])
//! - **Routers**: pure branch decisions over snapshots ([`router`])
//! - **Engine**: the finite phase machine that composes them ([`engine`])
//! - **Collaborators**: the completion and weather clients behind traits
//!   ([`clients`])
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weathervane::config::Settings;
//! use weathervane::engine::Engine;
//! use weathervane::state::QueryState;
//!
//! # async fn example() -> Result<(), weathervane::engine::EngineError> {
//! let settings = Settings::from_env();
//! let engine = Engine::new(
//!     Arc::new(settings.completion_client()),
//!     Arc::new(settings.weather_client()),
//! );
//!
//! let state = QueryState::new_with_user_message("What is the weather of Paris?");
//! let final_state = engine.invoke(state).await?;
//! if let Some(reply) = final_state.last_message() {
//!     println!("{}", reply.content);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Invalid input and weather-lookup failures surface as normal terminal
//! replies. Completion-collaborator failures and precondition violations
//! abort the invocation with a diagnostic error; see [`node::NodeError`].

pub mod clients;
pub mod config;
pub mod engine;
pub mod message;
pub mod node;
pub mod nodes;
pub mod router;
pub mod state;
pub mod telemetry;
