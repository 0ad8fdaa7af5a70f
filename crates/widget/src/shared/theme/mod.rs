//! Theme resolution for the widget.
//!
//! Hosts request `light`, `dark` or `system`. `system` resolves through
//! `matchMedia("(prefers-color-scheme: dark)")` and tracks preference
//! changes via a MediaQueryList listener that lives for the widget's
//! mounted lifetime. The resolved theme lands on the container as a
//! `data-theme` attribute.

use contracts::ThemeMode;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, MediaQueryList, MediaQueryListEvent};

const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

/// A concrete theme, after `System` has been resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedTheme {
    Light,
    Dark,
}

impl ResolvedTheme {
    /// Value of the `data-theme` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolvedTheme::Light => "light",
            ResolvedTheme::Dark => "dark",
        }
    }

    fn from_dark_flag(dark: bool) -> Self {
        if dark {
            ResolvedTheme::Dark
        } else {
            ResolvedTheme::Light
        }
    }
}

/// Resolve a requested mode against a known system preference. Pure part of
/// the resolution, kept separate so it is testable off the browser.
pub fn resolve_theme(mode: ThemeMode, system_prefers_dark: bool) -> ResolvedTheme {
    match mode {
        ThemeMode::Light => ResolvedTheme::Light,
        ThemeMode::Dark => ResolvedTheme::Dark,
        ThemeMode::System => ResolvedTheme::from_dark_flag(system_prefers_dark),
    }
}

fn dark_scheme_query() -> Option<MediaQueryList> {
    window()?.match_media(DARK_SCHEME_QUERY).ok().flatten()
}

/// Keeps a MediaQueryList `change` listener registered; detaches on drop.
struct SchemeListener {
    query: MediaQueryList,
    closure: Closure<dyn FnMut(MediaQueryListEvent)>,
}

impl SchemeListener {
    fn attach(query: MediaQueryList, theme: RwSignal<ResolvedTheme>) -> Self {
        let closure = Closure::wrap(Box::new(move |ev: MediaQueryListEvent| {
            theme.set(ResolvedTheme::from_dark_flag(ev.matches()));
        }) as Box<dyn FnMut(_)>);
        let _ = query.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        Self { query, closure }
    }
}

impl Drop for SchemeListener {
    fn drop(&mut self) {
        let _ = self
            .query
            .remove_event_listener_with_callback("change", self.closure.as_ref().unchecked_ref());
    }
}

/// Signal carrying the effective theme for `mode`.
///
/// For `ThemeMode::System` a change listener is attached to the media query;
/// it is detached when the owning component is disposed.
pub fn use_effective_theme(mode: ThemeMode) -> RwSignal<ResolvedTheme> {
    let initial_dark = dark_scheme_query().map(|q| q.matches()).unwrap_or(false);
    let theme = RwSignal::new(resolve_theme(mode, initial_dark));

    if mode == ThemeMode::System {
        if let Some(query) = dark_scheme_query() {
            // Parked in the arena so the listener lives exactly as long as
            // the component.
            let _listener = StoredValue::new_local(SchemeListener::attach(query, theme));
        }
    }

    theme
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_modes_ignore_system_preference() {
        assert_eq!(resolve_theme(ThemeMode::Light, true), ResolvedTheme::Light);
        assert_eq!(resolve_theme(ThemeMode::Dark, false), ResolvedTheme::Dark);
    }

    #[test]
    fn test_system_mode_follows_preference() {
        assert_eq!(resolve_theme(ThemeMode::System, true), ResolvedTheme::Dark);
        assert_eq!(resolve_theme(ThemeMode::System, false), ResolvedTheme::Light);
    }
}
