//! Single message renderer.

use chrono::Utc;
use contracts::{Message, Sender, StylingOptions};
use gloo_timers::callback::Interval;
use leptos::prelude::*;

use crate::shared::markdown::render_markdown;
use crate::shared::time_utils::{relative_time_label, REFRESH_INTERVAL_MS};

/// One chat bubble. Bot content goes through the markdown pipeline; the
/// relative-time label is recomputed once a minute while mounted.
#[component]
#[allow(non_snake_case)]
pub fn ChatMessage(
    /// The message to render
    message: Message,
    /// Visual overrides
    #[prop(optional)]
    styling: StylingOptions,
    /// Show the relative-time label under the content
    #[prop(optional)]
    show_timestamp: bool,
    /// Avatar shown next to bot messages
    #[prop(optional_no_strip)]
    bot_avatar_url: Option<String>,
) -> impl IntoView {
    let is_user = message.sender == Sender::User;
    let timestamp = message.timestamp;

    let time_ago = RwSignal::new(relative_time_label(timestamp, Utc::now()));
    if show_timestamp {
        let interval = Interval::new(REFRESH_INTERVAL_MS, move || {
            time_ago.set(relative_time_label(timestamp, Utc::now()));
        });
        // Parked in the arena so the timer is cancelled when the component
        // is disposed.
        let _interval = StoredValue::new_local(interval);
    }

    let background = if is_user {
        styling
            .user_message_background
            .unwrap_or_else(|| "#4f46e5".to_string())
    } else {
        styling
            .bot_message_background
            .unwrap_or_else(|| "#9692e4".to_string())
    };
    let color = if is_user {
        "#ffffff".to_string()
    } else {
        styling.text_color.unwrap_or_else(|| "#2e4057".to_string())
    };
    let bubble_style = format!("background-color: {}; color: {};", background, color);

    let container_class = if is_user {
        "chat-message chat-message--user"
    } else {
        "chat-message chat-message--bot"
    };

    let html_content = render_markdown(&message.content);

    view! {
        <div class=container_class>
            {(!is_user)
                .then(|| bot_avatar_url.clone())
                .flatten()
                .map(|url| view! {
                    <div class="chat-message__avatar">
                        <img src=url alt="Bot" />
                    </div>
                })}
            <div class="chat-message__bubble" style=bubble_style>
                <div class="chat-message__text" inner_html=html_content></div>
                {show_timestamp.then(|| view! {
                    <div class="chat-message__timestamp">{move || time_ago.get()}</div>
                })}
            </div>
        </div>
    }
}
