//! Chat Widget - View Model

use leptos::prelude::*;

use super::conversation::Conversation;

/// Signal bag driving the widget views. Cheap to copy into closures.
#[derive(Clone, Copy)]
pub struct ChatVm {
    /// Conversation state: history, loading flag, last error.
    pub conversation: RwSignal<Conversation>,
    /// Whether the window is expanded.
    pub is_open: RwSignal<bool>,
}

impl ChatVm {
    pub fn new(conversation: Conversation) -> Self {
        Self {
            conversation: RwSignal::new(conversation),
            is_open: RwSignal::new(false),
        }
    }
}
