//! Error taxonomy for the outbound request paths.

use thiserror::Error;

/// Errors surfaced to the conversation error banner. Rendered through
/// `Display`; none of these roll back an already-appended user message.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Neither a backend URL nor a direct LLM configuration was supplied.
    #[error("Either backendUrl or directLlmConfig must be provided")]
    MissingConfig,

    /// Non-success HTTP status from the backend proxy.
    #[error("Backend API error ({status}): {body}")]
    Backend { status: u16, body: String },

    /// Non-success HTTP status from the LLM provider.
    #[error("LLM API error ({status}): {body}")]
    Llm { status: u16, body: String },

    /// The fetch itself failed (network down, CORS, malformed URL).
    #[error("Network error: {0}")]
    Network(String),
}
