//! Conversation persistence in localStorage.
//!
//! One entry per chat id, value = JSON array of messages in their serde form
//! (`{id, content, sender, timestamp}` with RFC 3339 timestamps). Corrupt
//! entries are treated as absent; the caller falls back to a fresh welcome
//! history.

use contracts::Message;
use web_sys::window;

const STORAGE_KEY_PREFIX: &str = "chatbot_messages_";

/// localStorage key for a conversation.
pub fn storage_key(chat_id: &str) -> String {
    format!("{}{}", STORAGE_KEY_PREFIX, chat_id)
}

/// Serialize a history to its stored JSON form.
pub fn serialize_history(messages: &[Message]) -> String {
    serde_json::to_string(messages).unwrap_or_else(|_| "[]".to_string())
}

/// Deserialize a stored history. `None` on corrupt data.
pub fn deserialize_history(json: &str) -> Option<Vec<Message>> {
    serde_json::from_str(json).ok()
}

/// Load the persisted history for a chat id, if any.
pub fn load_messages(chat_id: &str) -> Option<Vec<Message>> {
    let storage = window().and_then(|w| w.local_storage().ok().flatten())?;
    let raw = storage.get_item(&storage_key(chat_id)).ok().flatten()?;
    let parsed = deserialize_history(&raw);
    if parsed.is_none() {
        log::error!("failed to parse saved messages for chat '{}'", chat_id);
    }
    parsed
}

/// Persist the history for a chat id.
pub fn save_messages(chat_id: &str, messages: &[Message]) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(&storage_key(chat_id), &serialize_history(messages));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Sender;

    #[test]
    fn test_storage_key() {
        assert_eq!(storage_key("default"), "chatbot_messages_default");
        assert_eq!(storage_key("support"), "chatbot_messages_support");
    }

    #[test]
    fn test_history_round_trip() {
        let history = vec![
            Message::bot("Hello! How can I help you today?"),
            Message::user("Hi"),
            Message::bot("Hi there!"),
        ];
        let restored = deserialize_history(&serialize_history(&history)).unwrap();
        assert_eq!(restored.len(), 3);
        for (a, b) in history.iter().zip(&restored) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.content, b.content);
            assert_eq!(a.sender, b.sender);
            assert_eq!(a.timestamp, b.timestamp);
        }
        assert_eq!(restored[1].sender, Sender::User);
    }

    #[test]
    fn test_corrupt_history_is_none() {
        assert!(deserialize_history("not json").is_none());
        assert!(deserialize_history("{\"id\":1}").is_none());
    }

    #[test]
    fn test_empty_array_round_trips() {
        assert_eq!(deserialize_history("[]"), Some(Vec::new()));
    }
}
