//! Chat Widget - View Component

use std::sync::Arc;

use contracts::{FeedbackRating, Position, ResponseType, Sender, StylingOptions, ThemeMode};
use leptos::prelude::*;

use super::config::{BeforeSendAction, LlmConfig, RequestStrategy};
use super::conversation::Conversation;
use super::feedback::ChatFeedback;
use super::file_upload::ChatFileUpload;
use super::input::ChatInput;
use super::message::ChatMessage;
use super::model;
use super::suggestions::ChatSuggestions;
use super::view_model::ChatVm;
use super::FileUploadHandler;
use crate::shared::icons::icon;
use crate::shared::storage;
use crate::shared::theme::use_effective_theme;

/// Floating chat widget: a corner button that expands into a conversation
/// window. Outbound messages go to `backend_url` when set, otherwise to
/// `direct_llm_config`; configuring neither surfaces an error on the first
/// send.
#[component]
#[allow(non_snake_case)]
pub fn ChatBot(
    /// Backend proxy endpoint; takes priority over the direct LLM path
    #[prop(optional)]
    backend_url: Option<String>,
    /// Direct LLM call configuration; used only when no backend URL is set
    #[prop(optional)]
    direct_llm_config: Option<LlmConfig>,
    /// Context string forwarded to the backend / system message
    #[prop(optional)]
    context: Option<String>,
    /// Response style tag forwarded to the backend
    #[prop(optional)]
    response_type: ResponseType,
    /// Corner the widget is anchored to
    #[prop(optional)]
    position: Position,
    /// Seed bot message; empty string disables it
    #[prop(default = String::from("Hello! How can I help you today?"), into)]
    welcome_message: String,
    /// Visual overrides
    #[prop(optional)]
    styling: StylingOptions,
    /// Requested color scheme
    #[prop(optional)]
    theme: ThemeMode,
    /// Input placeholder
    #[prop(optional, into)]
    placeholder_text: MaybeProp<String>,
    /// Window header title
    #[prop(default = String::from("Chat Assistant"), into)]
    header_title: String,
    /// Show relative-time labels under messages
    #[prop(optional)]
    show_timestamps: bool,
    /// Avatar shown next to bot messages
    #[prop(optional)]
    bot_avatar_url: Option<String>,
    /// Pre-send hook: may rewrite or cancel the outgoing text
    #[prop(optional)]
    on_before_send: Option<Callback<String, BeforeSendAction>>,
    /// Post-response hook: may rewrite the bot text before display
    #[prop(optional)]
    on_after_response: Option<Callback<String, String>>,
    /// Window max height CSS value
    #[prop(default = String::from("500px"), into)]
    max_height: String,
    /// Persist the history to localStorage
    #[prop(optional)]
    persist_chat: bool,
    /// Conversation identifier for persistence
    #[prop(default = String::from("default"), into)]
    chat_id: String,
    /// Additional CSS classes on the container
    #[prop(optional, into)]
    class: MaybeProp<String>,
    /// Show the file upload control
    #[prop(optional)]
    enable_file_upload: bool,
    /// Show feedback widgets under bot messages
    #[prop(optional)]
    enable_feedback: bool,
    /// Suggested questions rendered as chips
    #[prop(optional)]
    suggested_questions: Vec<String>,
    /// Feedback sink: (message id, rating, optional comment)
    #[prop(optional)]
    on_feedback_submit: Option<Callback<(String, FeedbackRating, Option<String>)>>,
    /// Upload sink; required for the upload control to do anything
    #[prop(optional)]
    on_file_upload: Option<FileUploadHandler>,
    /// MIME/extension allow-list for uploads
    #[prop(optional)]
    allowed_file_types: Option<Vec<String>>,
    /// Maximum upload size in megabytes
    #[prop(optional)]
    max_file_size_mb: Option<f64>,
) -> impl IntoView {
    let vm = ChatVm::new(Conversation::restore(
        persist_chat,
        &chat_id,
        Some(&welcome_message),
    ));

    // The outbound path is fixed for the session.
    let strategy = Arc::new(RequestStrategy::resolve(backend_url, direct_llm_config));

    let effective_theme = use_effective_theme(theme);

    let messages_ref = NodeRef::<leptos::html::Main>::new();
    let scroll_to_bottom = Callback::new(move |()| {
        if let Some(container) = messages_ref.get_untracked() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    // Persist after every history mutation.
    {
        let chat_id = chat_id.clone();
        Effect::new(move |_| {
            vm.conversation.with(|conv| {
                if persist_chat && !conv.messages().is_empty() {
                    storage::save_messages(&chat_id, conv.messages());
                }
            });
        });
    }

    // Keep the latest message in view.
    Effect::new(move |_| {
        let _ = vm.conversation.with(|conv| conv.messages().len());
        scroll_to_bottom.run(());
    });

    // Scroll after the window opens and renders.
    Effect::new(move |_| {
        if vm.is_open.get() {
            scroll_to_bottom.run(());
        }
    });

    let handle_send = Callback::new({
        let strategy = Arc::clone(&strategy);
        let context = context.clone();
        move |text: String| {
            if !vm.conversation.with_untracked(|conv| conv.can_send(&text)) {
                return;
            }

            let content = match on_before_send {
                Some(hook) => match hook.run(text.clone()) {
                    BeforeSendAction::Proceed => text,
                    BeforeSendAction::Rewrite(replacement) => replacement,
                    BeforeSendAction::Cancel => return,
                },
                None => text,
            };

            let mut history = Vec::new();
            vm.conversation
                .update(|conv| history = conv.begin_send(&content));

            let strategy = Arc::clone(&strategy);
            let context = context.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = match strategy.as_ref() {
                    Ok(strategy) => model::send_chat_request(
                        strategy,
                        &content,
                        context.as_deref(),
                        response_type,
                        &history,
                    )
                    .await
                    .map_err(|e| e.to_string()),
                    // A missing configuration surfaces its own message.
                    Err(e) => Err(e.to_string()),
                };

                match result {
                    Ok(reply) => {
                        let reply = match on_after_response {
                            Some(hook) => hook.run(reply),
                            None => reply,
                        };
                        vm.conversation.update(|conv| conv.complete_send(&reply));
                    }
                    Err(e) => {
                        log::error!("error sending message: {}", e);
                        vm.conversation.update(|conv| conv.fail_send(e));
                    }
                }
            });
        }
    });

    let handle_file_selected = Callback::new({
        let on_file_upload = on_file_upload.clone();
        move |file: web_sys::File| {
            let Some(handler) = on_file_upload.clone() else {
                return;
            };
            let file_name = file.name();
            wasm_bindgen_futures::spawn_local(async move {
                match handler(file).await {
                    Ok(()) => vm
                        .conversation
                        .update(|conv| conv.note_uploaded_file(&file_name)),
                    Err(e) => {
                        log::error!("error uploading file: {}", e);
                        vm.conversation.update(|conv| conv.set_error(e));
                    }
                }
            });
        }
    });

    let handle_upload_error = Callback::new(move |error: String| {
        vm.conversation.update(|conv| conv.set_error(error));
    });

    let feedback_sink = on_feedback_submit
        .unwrap_or_else(|| Callback::new(|_: (String, FeedbackRating, Option<String>)| {}));

    let is_loading = Signal::derive(move || vm.conversation.with(|conv| conv.is_loading()));

    let container_class = move || {
        format!(
            "chatbot-container {} {}",
            position.css_class(),
            class.get().unwrap_or_default(),
        )
        .trim_end()
        .to_string()
    };
    let container_style = styling
        .font_family
        .as_ref()
        .map(|font| format!("font-family: {};", font))
        .unwrap_or_default();

    let button_style = format!(
        "background-color: {}; color: {};",
        styling.widget_color.as_deref().unwrap_or("#4f46e5"),
        styling.text_color.as_deref().unwrap_or("#ffffff"),
    );
    let window_style = format!("max-height: {};", max_height);

    let widget_color = styling.widget_color.clone();
    let send_button_text_color = styling.send_button_text_color.clone();
    let show_upload = enable_file_upload && on_file_upload.is_some();

    // Store non-Copy props so we can safely use them inside the row
    // closures without FnOnce issues.
    let styling_sv = StoredValue::new(styling);
    let widget_color_sv = StoredValue::new(widget_color.clone());
    let bot_avatar_url_sv = StoredValue::new(bot_avatar_url);
    let allowed_file_types_sv = StoredValue::new(allowed_file_types);

    view! {
        <div
            class=container_class
            data-theme=move || effective_theme.get().as_str()
            style=container_style
        >
            <Show
                when=move || vm.is_open.get()
                fallback=move || {
                    view! {
                        <button
                            class="chatbot-button"
                            aria-label="Open chat"
                            style=button_style.clone()
                            on:click=move |_| vm.is_open.set(true)
                        >
                            {icon("chat")}
                        </button>
                    }
                }
            >
                <div class="chatbot-window" style=window_style.clone()>
                    <header class="chatbot-window__header">
                        <h3>{header_title.clone()}</h3>
                        <button
                            class="chatbot-window__close"
                            aria-label="Close chat"
                            on:click=move |_| vm.is_open.set(false)
                        >
                            "\u{00d7}"
                        </button>
                    </header>

                    <main class="chatbot-window__body" node_ref=messages_ref>
                        <Show when=move || vm.conversation.with(|conv| conv.messages().is_empty())>
                            <div class="chatbot-window__empty">
                                "Start a conversation by typing a message below."
                            </div>
                        </Show>

                        <For
                            each=move || vm.conversation.with(|conv| conv.messages().to_vec())
                            key=|msg| msg.id
                            let:msg
                        >
                            {
                                let show_feedback = enable_feedback && msg.sender == Sender::Bot;
                                let message_id = msg.id.to_string();
                                view! {
                                    <ChatMessage
                                        message=msg
                                        styling=styling_sv.get_value()
                                        show_timestamp=show_timestamps
                                        bot_avatar_url=bot_avatar_url_sv.get_value()
                                    />
                                    <Show when=move || show_feedback>
                                        <ChatFeedback
                                            message_id=message_id.clone()
                                            on_feedback_submit=feedback_sink
                                            widget_color=widget_color_sv.get_value()
                                        />
                                    </Show>
                                }
                            }
                        </For>

                        <Show when=move || is_loading.get()>
                            <div class="chatbot-window__loading" aria-label="Loading response">
                                <span class="typing-dot"></span>
                                <span class="typing-dot"></span>
                                <span class="typing-dot"></span>
                            </div>
                        </Show>

                        {move || {
                            vm.conversation.with(|conv| {
                                conv.error().map(|error| {
                                    view! {
                                        <div class="chatbot-window__error" role="alert">
                                            {error.to_string()}
                                        </div>
                                    }
                                })
                            })
                        }}

                        <ChatSuggestions
                            suggestions=suggested_questions.clone()
                            on_suggestion_click=handle_send
                            widget_color=widget_color.clone()
                        />
                    </main>

                    <footer class="chatbot-window__footer">
                        <Show when=move || show_upload>
                            <ChatFileUpload
                                on_file_selected=handle_file_selected
                                on_error=handle_upload_error
                                allowed_file_types=allowed_file_types_sv.get_value()
                                max_file_size_mb=max_file_size_mb
                            />
                        </Show>
                        <ChatInput
                            on_send=handle_send
                            placeholder_text=placeholder_text.clone()
                            disabled=is_loading
                            widget_color=widget_color.clone()
                            send_button_text_color=send_button_text_color.clone()
                        />
                    </footer>
                </div>
            </Show>
        </div>
    }
}
