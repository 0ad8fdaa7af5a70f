//! Conversation messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// A single chat message. Immutable once created; the history only ever
/// appends, and is cleared as a whole on reinitialization.
///
/// Serializes to `{id, content, sender, timestamp}` with an RFC 3339
/// timestamp, which is also the persisted localStorage form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
        }
    }

    /// A message typed by the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Sender::User)
    }

    /// A message produced by the bot.
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(content, Sender::Bot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), "\"user\"");
        assert_eq!(serde_json::to_string(&Sender::Bot).unwrap(), "\"bot\"");
    }

    #[test]
    fn test_message_round_trip() {
        let msg = Message::bot("Hello! How can I help you today?");
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, msg.id);
        assert_eq!(back.content, msg.content);
        assert_eq!(back.sender, msg.sender);
        assert_eq!(back.timestamp, msg.timestamp);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("one");
        let b = Message::user("one");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_stored_form_field_names() {
        let msg = Message::user("hi");
        let value = serde_json::to_value(&msg).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("id"));
        assert!(obj.contains_key("content"));
        assert!(obj.contains_key("sender"));
        assert!(obj.contains_key("timestamp"));
    }
}
