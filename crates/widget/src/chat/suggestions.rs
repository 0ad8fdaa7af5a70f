//! Suggested-question chips.

use leptos::prelude::*;

/// Clickable suggestion chips. Clicking one is equivalent to typing and
/// submitting that exact string. Renders nothing for an empty list.
#[component]
#[allow(non_snake_case)]
pub fn ChatSuggestions(
    /// Fixed list of suggested questions
    suggestions: Vec<String>,
    /// Receives the clicked suggestion
    on_suggestion_click: Callback<String>,
    /// Chip border/text color override
    #[prop(optional_no_strip)]
    widget_color: Option<String>,
) -> impl IntoView {
    if suggestions.is_empty() {
        return ().into_any();
    }

    let chip_style = format!(
        "border-color: {color}; color: {color};",
        color = widget_color.as_deref().unwrap_or("#4f46e5"),
    );

    view! {
        <div class="chat-suggestions">
            <div class="chat-suggestions__label">"Suggested questions:"</div>
            <div class="chat-suggestions__list">
                {suggestions
                    .into_iter()
                    .map(|suggestion| {
                        let label = suggestion.clone();
                        let aria = format!("Ask: {}", suggestion);
                        let style = chip_style.clone();
                        view! {
                            <button
                                class="chat-suggestions__chip"
                                style=style
                                aria-label=aria
                                on:click=move |_| on_suggestion_click.run(suggestion.clone())
                            >
                                <span class="chat-suggestions__icon">"?"</span>
                                {label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
    .into_any()
}
