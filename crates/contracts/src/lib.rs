//! Shared contracts for the chat widget.
//!
//! Pure domain types with no UI dependencies: messages, feedback ratings and
//! the widget configuration enums. Everything here is serde-serializable and
//! testable on the host target.

pub mod feedback;
pub mod message;
pub mod options;

pub use feedback::FeedbackRating;
pub use message::{Message, Sender};
pub use options::{Position, ResponseType, StylingOptions, ThemeMode};
