//! Chat Widget - Model (request formatter and API calls)
//!
//! Builds the outbound payload for whichever path the resolved strategy
//! selects, performs exactly one fetch per send (no retries, no timeout
//! beyond the transport's own) and parses the reply. Payload shaping and
//! response parsing are plain functions so they are testable off the
//! browser; only the fetch helpers touch web-sys.

use contracts::{Message, ResponseType, Sender};
use serde_json::{json, Value};

use super::config::{LlmConfig, RequestStrategy};
use super::error::ChatError;

/// Fixed reply used when a response body has no recognizable shape.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request.";

/// Response-length cap for the default provider body.
const DEFAULT_MAX_TOKENS: u32 = 1000;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

// ============================================================================
// Payload building
// ============================================================================

/// Body for the backend proxy path. History roles carry the sender value
/// verbatim (`user` / `bot`).
pub fn backend_payload(
    message: &str,
    context: Option<&str>,
    response_type: ResponseType,
    history: &[Message],
) -> Value {
    json!({
        "message": message,
        "context": context.unwrap_or(""),
        "responseType": response_type.as_str(),
        "history": history
            .iter()
            .map(|msg| json!({ "role": msg.sender.as_str(), "content": msg.content }))
            .collect::<Vec<_>>(),
    })
}

/// Default OpenAI-style chat body: optional system message from the context,
/// the prior history mapped to `user`/`assistant`, then the new message.
pub fn default_llm_payload(
    config: &LlmConfig,
    history: &[Message],
    message: &str,
    context: Option<&str>,
) -> Value {
    let mut messages = Vec::new();
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        messages.push(json!({ "role": "system", "content": context }));
    }
    for msg in history {
        let role = match msg.sender {
            Sender::User => "user",
            Sender::Bot => "assistant",
        };
        messages.push(json!({ "role": role, "content": msg.content }));
    }
    messages.push(json!({ "role": "user", "content": message }));

    json!({
        "model": config.model.as_deref().unwrap_or(DEFAULT_MODEL),
        "messages": messages,
        "max_tokens": DEFAULT_MAX_TOKENS,
    })
}

/// Provider request body: the caller's formatter verbatim when supplied,
/// otherwise the default body above.
pub fn llm_payload(
    config: &LlmConfig,
    history: &[Message],
    message: &str,
    context: Option<&str>,
) -> Value {
    match &config.format_messages {
        Some(formatter) => formatter(history, message, context),
        None => default_llm_payload(config, history, message, context),
    }
}

// ============================================================================
// Response parsing
// ============================================================================

fn non_empty(value: &Value) -> Option<String> {
    value.as_str().filter(|s| !s.is_empty()).map(String::from)
}

/// Backend reply: the `response` field, or the fixed fallback.
pub fn parse_backend_response(body: &Value) -> String {
    non_empty(&body["response"]).unwrap_or_else(|| FALLBACK_REPLY.to_string())
}

/// Provider reply: custom parser first, then the chat-completion choice
/// text, then a generic `response` field, then the fixed fallback.
pub fn parse_llm_response(config: &LlmConfig, body: &Value) -> String {
    if let Some(parser) = &config.parse_response {
        if let Some(text) = parser(body) {
            return text;
        }
    }
    non_empty(&body["choices"][0]["message"]["content"])
        .or_else(|| non_empty(&body["response"]))
        .unwrap_or_else(|| FALLBACK_REPLY.to_string())
}

// ============================================================================
// Outbound calls
// ============================================================================

/// One outbound round trip for a send, routed per the resolved strategy.
pub async fn send_chat_request(
    strategy: &RequestStrategy,
    message: &str,
    context: Option<&str>,
    response_type: ResponseType,
    history: &[Message],
) -> Result<String, ChatError> {
    match strategy {
        RequestStrategy::Backend { url } => {
            let payload = backend_payload(message, context, response_type, history);
            call_backend(url, &payload).await
        }
        RequestStrategy::DirectLlm(config) => {
            let payload = llm_payload(config, history, message, context);
            call_direct_llm(config, &payload).await
        }
    }
}

async fn call_backend(url: &str, payload: &Value) -> Result<String, ChatError> {
    let (status, text) = post_json(url, &[], payload).await?;
    if !(200..300).contains(&status) {
        return Err(ChatError::Backend { status, body: text });
    }
    let body: Value =
        serde_json::from_str(&text).map_err(|e| ChatError::Network(format!("invalid JSON response: {e}")))?;
    Ok(parse_backend_response(&body))
}

async fn call_direct_llm(config: &LlmConfig, payload: &Value) -> Result<String, ChatError> {
    let auth = config.auth();
    let url = auth.request_url(&config.api_endpoint, &config.api_key);

    let mut headers = Vec::new();
    if let Some(authorization) = auth.authorization(&config.api_key) {
        headers.push(("Authorization".to_string(), authorization));
    }
    headers.extend(config.headers.iter().cloned());

    let (status, text) = post_json(&url, &headers, payload).await?;
    if !(200..300).contains(&status) {
        return Err(ChatError::Llm { status, body: text });
    }
    let body: Value =
        serde_json::from_str(&text).map_err(|e| ChatError::Network(format!("invalid JSON response: {e}")))?;
    Ok(parse_llm_response(config, &body))
}

/// POST a JSON body and return (status, response text).
async fn post_json(
    url: &str,
    headers: &[(String, String)],
    payload: &Value,
) -> Result<(u16, String), ChatError> {
    use wasm_bindgen::JsCast;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let network = |e: wasm_bindgen::JsValue| ChatError::Network(format!("{e:?}"));

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    let body = wasm_bindgen::JsValue::from_str(&payload.to_string());
    opts.set_body(&body);

    let request = Request::new_with_str_and_init(url, &opts).map_err(network)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(network)?;
    for (name, value) in headers {
        request.headers().set(name, value).map_err(network)?;
    }

    let window = web_sys::window().ok_or_else(|| ChatError::Network("no window".to_string()))?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(network)?;
    let resp: Response = resp_value.dyn_into().map_err(network)?;

    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(network)?)
        .await
        .map_err(network)?;
    let text: String = text.as_string().unwrap_or_default();

    Ok((resp.status(), text))
}
