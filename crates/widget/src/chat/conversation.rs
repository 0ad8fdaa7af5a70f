//! Conversation state machine.
//!
//! Single source of truth for the message list and the request lifecycle.
//! Plain data so the send-gate and message-count invariants stay testable
//! off the browser; the view model wraps it in a signal.

use contracts::Message;

use crate::shared::storage;

/// In-memory conversation state: ordered history, single-slot request
/// guard and the last user-visible error.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    loading: bool,
    error: Option<String>,
}

impl Conversation {
    /// Fresh history, seeded with the welcome message when one is
    /// configured.
    pub fn initialize(welcome_message: Option<&str>) -> Self {
        let messages = match welcome_message {
            Some(text) if !text.is_empty() => vec![Message::bot(text)],
            _ => Vec::new(),
        };
        Self {
            messages,
            loading: false,
            error: None,
        }
    }

    /// Restore from persistence when enabled, falling back to a fresh
    /// welcome history if nothing is stored or the stored data is corrupt.
    pub fn restore(persist_chat: bool, chat_id: &str, welcome_message: Option<&str>) -> Self {
        if persist_chat {
            if let Some(messages) = storage::load_messages(chat_id) {
                return Self {
                    messages,
                    loading: false,
                    error: None,
                };
            }
        }
        Self::initialize(welcome_message)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a send may start: rejects while a request is in flight or
    /// when the trimmed text is empty.
    pub fn can_send(&self, text: &str) -> bool {
        !self.loading && !text.trim().is_empty()
    }

    /// Append the user message and take the in-flight slot. Clears any
    /// prior error. Returns the history snapshot to transmit, which is the
    /// list *before* this message was appended.
    pub fn begin_send(&mut self, content: &str) -> Vec<Message> {
        let history = self.messages.clone();
        self.messages.push(Message::user(content));
        self.loading = true;
        self.error = None;
        history
    }

    /// Successful round trip: append the bot reply and free the slot.
    pub fn complete_send(&mut self, bot_content: &str) {
        self.messages.push(Message::bot(bot_content));
        self.loading = false;
    }

    /// Failed round trip: record the error and free the slot. The user
    /// message appended by `begin_send` is kept.
    pub fn fail_send(&mut self, error: String) {
        self.error = Some(error);
        self.loading = false;
    }

    /// Synthetic user message noting a successful file upload.
    pub fn note_uploaded_file(&mut self, file_name: &str) {
        self.messages.push(Message::user(format!("Uploaded file: {}", file_name)));
    }

    /// Record an error outside the send lifecycle (upload failures).
    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Sender;

    #[test]
    fn test_initialize_with_welcome() {
        let conv = Conversation::initialize(Some("Hello! How can I help you today?"));
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].sender, Sender::Bot);
        assert_eq!(conv.messages()[0].content, "Hello! How can I help you today?");
        assert!(!conv.is_loading());
        assert!(conv.error().is_none());
    }

    #[test]
    fn test_initialize_without_welcome() {
        assert!(Conversation::initialize(None).messages().is_empty());
        assert!(Conversation::initialize(Some("")).messages().is_empty());
    }

    #[test]
    fn test_send_gate() {
        let mut conv = Conversation::initialize(None);
        assert!(!conv.can_send(""));
        assert!(!conv.can_send("   \n"));
        assert!(conv.can_send("Hi"));

        conv.begin_send("Hi");
        assert!(conv.is_loading());
        assert!(!conv.can_send("another"));

        conv.complete_send("Hi there!");
        assert!(conv.can_send("another"));
    }

    #[test]
    fn test_begin_send_returns_prior_history() {
        let mut conv = Conversation::initialize(Some("welcome"));
        let history = conv.begin_send("Hi");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].content, "welcome");
        assert_eq!(conv.messages().len(), 2);
    }

    #[test]
    fn test_successful_send_scenario() {
        let mut conv = Conversation::initialize(Some("Hello! How can I help you today?"));
        conv.begin_send("Hi");
        conv.complete_send("Hi there!");

        assert_eq!(conv.messages().len(), 3);
        let last = conv.messages().last().unwrap();
        assert_eq!(last.sender, Sender::Bot);
        assert_eq!(last.content, "Hi there!");
        assert!(!conv.is_loading());
        assert!(conv.error().is_none());
    }

    #[test]
    fn test_failed_send_keeps_user_message() {
        let mut conv = Conversation::initialize(None);
        conv.begin_send("Hi");
        conv.fail_send("Backend API error (500): server error".to_string());

        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].sender, Sender::User);
        let error = conv.error().unwrap();
        assert!(error.contains("500"));
        assert!(error.contains("server error"));
        assert!(!conv.is_loading());
    }

    #[test]
    fn test_error_cleared_on_next_send() {
        let mut conv = Conversation::initialize(None);
        conv.begin_send("Hi");
        conv.fail_send("boom".to_string());
        conv.begin_send("again");
        assert!(conv.error().is_none());
    }

    #[test]
    fn test_message_count_law() {
        // 2 * sends + 1 for the welcome message, alternating user/bot.
        let mut conv = Conversation::initialize(Some("welcome"));
        let sends = 4;
        for i in 0..sends {
            conv.begin_send(&format!("question {}", i));
            conv.complete_send(&format!("answer {}", i));
        }
        assert_eq!(conv.messages().len(), 2 * sends + 1);
        for (i, msg) in conv.messages().iter().skip(1).enumerate() {
            let expected = if i % 2 == 0 { Sender::User } else { Sender::Bot };
            assert_eq!(msg.sender, expected);
        }
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut conv = Conversation::initialize(Some("welcome"));
        conv.begin_send("Hi");
        conv.complete_send("Hi there!");
        let times: Vec<_> = conv.messages().iter().map(|m| m.timestamp).collect();
        assert!(times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_uploaded_file_note() {
        let mut conv = Conversation::initialize(None);
        conv.note_uploaded_file("report.pdf");
        assert_eq!(conv.messages().len(), 1);
        assert_eq!(conv.messages()[0].content, "Uploaded file: report.pdf");
        assert_eq!(conv.messages()[0].sender, Sender::User);
    }
}
