//! Widget configuration enums and styling overrides.

use serde::{Deserialize, Serialize};

/// Response style tag forwarded verbatim to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Friendly,
    #[default]
    Formal,
    Short,
    Detailed,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Friendly => "friendly",
            ResponseType::Formal => "formal",
            ResponseType::Short => "short",
            ResponseType::Detailed => "detailed",
        }
    }
}

/// Corner of the viewport the widget is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
    TopRight,
    TopLeft,
}

impl Position {
    /// CSS class applied to the widget container.
    pub fn css_class(&self) -> &'static str {
        match self {
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
            Position::TopRight => "top-right",
            Position::TopLeft => "top-left",
        }
    }
}

/// Requested color scheme. `System` follows the OS preference and tracks
/// changes while the widget is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
    System,
}

impl ThemeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "dark" => ThemeMode::Dark,
            "system" => ThemeMode::System,
            _ => ThemeMode::Light,
        }
    }
}

/// Optional visual overrides. Absent = use the stylesheet default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StylingOptions {
    pub widget_color: Option<String>,
    pub text_color: Option<String>,
    pub font_family: Option<String>,
    pub user_message_background: Option<String>,
    pub bot_message_background: Option<String>,
    pub send_button_text_color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_type_defaults_to_formal() {
        assert_eq!(ResponseType::default().as_str(), "formal");
    }

    #[test]
    fn test_position_css_classes() {
        assert_eq!(Position::default().css_class(), "bottom-right");
        assert_eq!(Position::TopLeft.css_class(), "top-left");
    }

    #[test]
    fn test_theme_mode_from_str_falls_back_to_light() {
        assert_eq!(ThemeMode::from_str("dark"), ThemeMode::Dark);
        assert_eq!(ThemeMode::from_str("system"), ThemeMode::System);
        assert_eq!(ThemeMode::from_str("banana"), ThemeMode::Light);
    }
}
