//! Embeddable chat widget for Leptos CSR applications.
//!
//! The widget is a floating chat button that expands into a conversation
//! window. Outbound messages go either to a backend proxy endpoint or
//! directly to an LLM HTTP API, bot replies are rendered as sanitized
//! markdown, and hosts can opt into file upload, suggested questions and
//! thumbs-up/down feedback.

pub mod chat;
pub mod shared;

pub use chat::config::{BeforeSendAction, LlmConfig, RequestStrategy};
pub use chat::view::ChatBot;
pub use chat::FileUploadHandler;
pub use contracts::{FeedbackRating, Message, Position, ResponseType, Sender, StylingOptions, ThemeMode};

/// Initialize console logging and panic reporting. Hosts should call this
/// once before mounting the widget.
pub fn init_logging() {
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}
