use serde::{Deserialize, Serialize};
use std::fmt;

/// The sender of a [`Message`].
///
/// Conversations in this workflow only ever carry the seeded user query and
/// the assistant replies appended by handler nodes, so the role space is
/// closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human query that seeds an invocation.
    User,
    /// A reply produced by one of the handler nodes.
    Assistant,
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message in the conversation, containing a typed role and text content.
///
/// Messages are immutable once created; the workflow only ever appends new
/// ones to the state's history.
///
/// # Examples
///
/// ```
/// use weathervane::message::{Message, Role};
///
/// let query = Message::user("What is the weather of Paris?");
/// assert_eq!(query.role, Role::User);
///
/// let reply = Message::assistant("The weather in Paris is 18.2°C with clear sky.");
/// assert!(reply.has_role(Role::Assistant));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this message.
    pub role: Role,
    /// The text content of the message.
    pub content: String,
}

impl Message {
    /// Creates a new message with the specified role and content.
    #[must_use]
    pub fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }

    /// Creates a user message with the specified content.
    #[must_use]
    pub fn user(content: &str) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant message with the specified content.
    #[must_use]
    pub fn assistant(content: &str) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Returns true if this message has the specified role.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_sets_fields() {
        let msg = Message::new(Role::User, "hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.content, "hello");
    }

    #[test]
    fn convenience_constructors() {
        let user_msg = Message::user("What is the weather of Oslo?");
        assert_eq!(user_msg.role, Role::User);

        let assistant_msg = Message::assistant("It is 4°C with light snow.");
        assert_eq!(assistant_msg.role, Role::Assistant);
        assert_eq!(assistant_msg.content, "It is 4°C with light snow.");
    }

    #[test]
    fn role_checking() {
        let msg = Message::assistant("done");
        assert!(msg.has_role(Role::Assistant));
        assert!(!msg.has_role(Role::User));
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&Message::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }

    #[test]
    fn serde_round_trip() {
        let original = Message::assistant("The current running year is 2026.");
        let json = serde_json::to_string(&original).expect("serialize");
        let parsed: Message = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(original, parsed);
    }
}
