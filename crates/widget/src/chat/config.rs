//! Request routing configuration.
//!
//! The outbound path is a tagged strategy resolved once at construction:
//! the backend proxy wins whenever a backend URL is configured, the direct
//! LLM path is used only when no backend URL is supplied, and neither being
//! present is a configuration error surfaced on the first send.

use std::sync::Arc;

use contracts::Message;
use serde_json::Value;

use super::error::ChatError;

/// Builds a provider request body from (prior history, new text, context).
pub type MessageFormatter = dyn Fn(&[Message], &str, Option<&str>) -> Value + Send + Sync;

/// Extracts the reply text from a provider response body. `None` falls
/// through to the built-in shape chain.
pub type ResponseParser = dyn Fn(&Value) -> Option<String> + Send + Sync;

/// Direct LLM call configuration. Supplied once; immutable for the session.
#[derive(Clone)]
pub struct LlmConfig {
    pub api_endpoint: String,
    pub api_key: String,
    pub model: Option<String>,
    /// Extra headers appended after the auth header.
    pub headers: Vec<(String, String)>,
    /// Custom request-body builder; used verbatim when present.
    pub format_messages: Option<Arc<MessageFormatter>>,
    /// Custom response parser; tried before the built-in shape chain.
    pub parse_response: Option<Arc<ResponseParser>>,
}

impl LlmConfig {
    pub fn new(api_endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_endpoint: api_endpoint.into(),
            api_key: api_key.into(),
            model: None,
            headers: Vec::new(),
            format_messages: None,
            parse_response: None,
        }
    }

    pub fn auth(&self) -> ProviderAuth {
        ProviderAuth::detect(&self.api_endpoint)
    }
}

/// How a provider expects its API key.
///
/// Most chat-completion providers take a bearer token; Gemini-style
/// endpoints embed the key as a query parameter and reject an Authorization
/// header. Detection keys off the endpoint so both the URL and the header
/// decision come from one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderAuth {
    BearerHeader,
    QueryParamKey,
}

impl ProviderAuth {
    pub fn detect(api_endpoint: &str) -> Self {
        if api_endpoint.contains("gemini") {
            ProviderAuth::QueryParamKey
        } else {
            ProviderAuth::BearerHeader
        }
    }

    /// Final request URL, with the key appended for query-param providers.
    pub fn request_url(&self, api_endpoint: &str, api_key: &str) -> String {
        match self {
            ProviderAuth::BearerHeader => api_endpoint.to_string(),
            ProviderAuth::QueryParamKey => format!("{}?key={}", api_endpoint, api_key),
        }
    }

    /// `Authorization` header value, when one is sent at all.
    pub fn authorization(&self, api_key: &str) -> Option<String> {
        match self {
            ProviderAuth::BearerHeader => Some(format!("Bearer {}", api_key)),
            ProviderAuth::QueryParamKey => None,
        }
    }
}

/// The resolved outbound path.
#[derive(Clone)]
pub enum RequestStrategy {
    Backend { url: String },
    DirectLlm(LlmConfig),
}

impl RequestStrategy {
    /// Resolve the path from the configured options. Backend takes priority
    /// when both are present.
    pub fn resolve(
        backend_url: Option<String>,
        llm: Option<LlmConfig>,
    ) -> Result<Self, ChatError> {
        match (backend_url, llm) {
            (Some(url), _) => Ok(RequestStrategy::Backend { url }),
            (None, Some(config)) => Ok(RequestStrategy::DirectLlm(config)),
            (None, None) => Err(ChatError::MissingConfig),
        }
    }
}

/// Outcome of the host's before-send hook.
pub enum BeforeSendAction {
    /// Send the text as typed.
    Proceed,
    /// Send this replacement text instead.
    Rewrite(String),
    /// Drop the send entirely.
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_wins_when_both_configured() {
        let strategy = RequestStrategy::resolve(
            Some("https://example.com/chat".to_string()),
            Some(LlmConfig::new("https://api.openai.com/v1/chat/completions", "sk-1")),
        )
        .unwrap();
        assert!(matches!(strategy, RequestStrategy::Backend { ref url } if url.ends_with("/chat")));
    }

    #[test]
    fn test_direct_llm_only_without_backend_url() {
        let strategy = RequestStrategy::resolve(
            None,
            Some(LlmConfig::new("https://api.openai.com/v1/chat/completions", "sk-1")),
        )
        .unwrap();
        assert!(matches!(strategy, RequestStrategy::DirectLlm(_)));
    }

    #[test]
    fn test_neither_is_a_configuration_error() {
        let result = RequestStrategy::resolve(None, None);
        assert!(matches!(result, Err(ChatError::MissingConfig)));
    }

    #[test]
    fn test_gemini_endpoints_use_query_param_key() {
        let auth = ProviderAuth::detect(
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent",
        );
        assert_eq!(auth, ProviderAuth::QueryParamKey);
        assert_eq!(
            auth.request_url("https://host/gemini", "k123"),
            "https://host/gemini?key=k123"
        );
        assert_eq!(auth.authorization("k123"), None);
    }

    #[test]
    fn test_default_auth_is_bearer() {
        let auth = ProviderAuth::detect("https://api.openai.com/v1/chat/completions");
        assert_eq!(auth, ProviderAuth::BearerHeader);
        assert_eq!(
            auth.request_url("https://api.openai.com/v1/chat/completions", "sk-1"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(auth.authorization("sk-1").unwrap(), "Bearer sk-1");
    }
}
