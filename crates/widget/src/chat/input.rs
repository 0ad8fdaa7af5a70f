//! Message input leaf.

use leptos::prelude::*;

use crate::shared::icons::icon;

/// Single-line-growing text entry. Enter submits, Shift+Enter inserts a
/// newline, everything is disabled while a request is pending, and the
/// field clears on successful submit.
#[component]
#[allow(non_snake_case)]
pub fn ChatInput(
    /// Receives the raw text on submit.
    on_send: Callback<String>,
    /// Placeholder text
    #[prop(optional, into)]
    placeholder_text: MaybeProp<String>,
    /// Disabled while a request is in flight (reactive)
    #[prop(into)]
    disabled: Signal<bool>,
    /// Send button background override
    #[prop(optional_no_strip)]
    widget_color: Option<String>,
    /// Send button text color override
    #[prop(optional_no_strip)]
    send_button_text_color: Option<String>,
) -> impl IntoView {
    let message = RwSignal::new(String::new());

    let placeholder = move || {
        placeholder_text
            .get()
            .unwrap_or_else(|| "Type your message...".to_string())
    };

    let button_style = format!(
        "background-color: {}; color: {};",
        widget_color.as_deref().unwrap_or("#4f46e5"),
        send_button_text_color.as_deref().unwrap_or("#ffffff"),
    );

    let submit = move || {
        let text = message.get();
        if text.trim().is_empty() || disabled.get() {
            return;
        }
        on_send.run(text);
        message.set(String::new());
    };

    let can_send = move || !message.get().trim().is_empty() && !disabled.get();

    view! {
        <form
            class="chat-input"
            on:submit=move |ev| {
                ev.prevent_default();
                submit();
            }
        >
            <textarea
                class="chat-input__text"
                placeholder=placeholder
                disabled=disabled
                rows=1
                prop:value=move || message.get()
                on:input=move |ev| message.set(event_target_value(&ev))
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" && !ev.shift_key() {
                        ev.prevent_default();
                        submit();
                    }
                }
            >
                {message.get_untracked()}
            </textarea>
            <button
                type="submit"
                class="chat-input__send"
                style=button_style
                disabled=move || !can_send()
                aria-label="Send message"
            >
                {icon("send")}
            </button>
        </form>
    }
}
