//! State for a single workflow invocation.
//!
//! One [`QueryState`] exists per invocation. Nodes never touch it directly:
//! they receive an immutable [`StateSnapshot`] and return a [`StateUpdate`]
//! that the engine merges back. Merging appends messages in order and
//! overwrites the routing flags when set, so the message history is
//! append-only by construction.

use serde::{Deserialize, Serialize};

use crate::message::{Message, Role};

/// The state record threaded through one workflow invocation.
///
/// Carries the ordered conversation history (the last message is "the
/// current query" for routing purposes) plus the two flags the routers
/// consult. Created with a single seeded user message, advanced only
/// through [`StateUpdate`] merges, and discarded after the terminal node.
///
/// # Examples
///
/// ```
/// use weathervane::state::{QueryState, StateUpdate};
/// use weathervane::message::Message;
///
/// let mut state = QueryState::new_with_user_message("What is the weather of Paris?");
/// assert_eq!(state.snapshot().messages.len(), 1);
///
/// state.apply(
///     StateUpdate::new()
///         .with_needs_weather(true)
///         .with_messages(vec![Message::assistant("18.2°C, clear sky")]),
/// );
/// assert!(state.needs_weather());
/// assert_eq!(state.snapshot().messages.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryState {
    messages: Vec<Message>,
    is_valid: bool,
    needs_weather: bool,
}

impl QueryState {
    /// Creates state seeded with a single user message. This is the entry
    /// constructor for every workflow invocation.
    #[must_use]
    pub fn new_with_user_message(user_text: &str) -> Self {
        Self {
            messages: vec![Message::user(user_text)],
            is_valid: false,
            needs_weather: false,
        }
    }

    /// Creates a builder for seeding richer states, mostly useful in tests.
    #[must_use]
    pub fn builder() -> QueryStateBuilder {
        QueryStateBuilder::default()
    }

    /// The full message history, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message, i.e. the terminal reply once the workflow
    /// has finished.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[must_use]
    pub fn needs_weather(&self) -> bool {
        self.needs_weather
    }

    /// Creates an immutable point-in-time view for nodes and routers.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            messages: self.messages.clone(),
            is_valid: self.is_valid,
            needs_weather: self.needs_weather,
        }
    }

    /// Merges a node's partial update into the state.
    ///
    /// Messages are appended in the order the node produced them; earlier
    /// history is never reordered or dropped. Flags overwrite only when the
    /// update carries them.
    pub fn apply(&mut self, update: StateUpdate) {
        if let Some(messages) = update.messages {
            self.messages.extend(messages);
        }
        if let Some(is_valid) = update.is_valid {
            self.is_valid = is_valid;
        }
        if let Some(needs_weather) = update.needs_weather {
            self.needs_weather = needs_weather;
        }
    }
}

/// Immutable snapshot of [`QueryState`] handed to nodes and routers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// Messages at the time of the snapshot, oldest first.
    pub messages: Vec<Message>,
    /// Whether the latest message passed validation.
    pub is_valid: bool,
    /// Whether the latest message was classified as a weather request.
    pub needs_weather: bool,
}

impl StateSnapshot {
    /// Content of the last message — the current query for routing purposes.
    #[must_use]
    pub fn last_content(&self) -> Option<&str> {
        self.messages.last().map(|m| m.content.as_str())
    }
}

/// Partial state update returned by node execution.
///
/// All fields are optional so a node only states the aspects it changed;
/// the engine merges updates via [`QueryState::apply`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateUpdate {
    /// Messages to append to the history.
    pub messages: Option<Vec<Message>>,
    /// New value for the validity flag.
    pub is_valid: Option<bool>,
    /// New value for the weather-intent flag.
    pub needs_weather: Option<bool>,
}

impl StateUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = Some(messages);
        self
    }

    #[must_use]
    pub fn with_is_valid(mut self, is_valid: bool) -> Self {
        self.is_valid = Some(is_valid);
        self
    }

    #[must_use]
    pub fn with_needs_weather(mut self, needs_weather: bool) -> Self {
        self.needs_weather = Some(needs_weather);
        self
    }
}

/// Builder for seeding [`QueryState`] with existing history.
#[derive(Debug, Default)]
pub struct QueryStateBuilder {
    messages: Vec<Message>,
}

impl QueryStateBuilder {
    #[must_use]
    pub fn with_user_message(mut self, content: &str) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    #[must_use]
    pub fn with_assistant_message(mut self, content: &str) -> Self {
        self.messages.push(Message::assistant(content));
        self
    }

    #[must_use]
    pub fn with_message(mut self, role: Role, content: &str) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    #[must_use]
    pub fn build(self) -> QueryState {
        QueryState {
            messages: self.messages,
            is_valid: false,
            needs_weather: false,
        }
    }
}
