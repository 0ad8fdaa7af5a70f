//! Chat Widget UI Module (MVVM Standard)
//!
//! Structure:
//! - conversation.rs: pure conversation state machine
//! - config.rs: request strategy, LLM config, host hooks
//! - model.rs: request formatter and outbound API calls
//! - view_model.rs: ChatVm with RwSignals
//! - view.rs: root component ChatBot
//! - message.rs / input.rs / suggestions.rs / feedback.rs / file_upload.rs:
//!   presentational leaves

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub mod config;
pub mod conversation;
pub mod error;
pub mod feedback;
pub mod file_upload;
pub mod input;
pub mod message;
pub mod model;
pub mod suggestions;
pub mod view;
pub mod view_model;

pub use view::ChatBot;

/// Host-supplied upload sink. Receives the validated file; a returned error
/// string is surfaced in the conversation error banner.
pub type FileUploadHandler =
    Arc<dyn Fn(web_sys::File) -> Pin<Box<dyn Future<Output = Result<(), String>>>> + Send + Sync>;
