//! File upload control.

use leptos::prelude::*;
use uuid::Uuid;
use wasm_bindgen::JsCast;

use crate::shared::icons::icon;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Validate a candidate file against the optional allow-list and size cap.
///
/// An allow-list entry matches on exact MIME type (`application/pdf`), a
/// wildcard MIME family (`image/*`) or a file-name extension (`.csv`),
/// all case-insensitive.
pub fn validate_file(
    name: &str,
    mime: &str,
    size_bytes: f64,
    allowed_types: Option<&[String]>,
    max_size_mb: Option<f64>,
) -> Result<(), String> {
    if let Some(allowed) = allowed_types.filter(|a| !a.is_empty()) {
        let name = name.to_lowercase();
        let mime = mime.to_lowercase();
        let matches = allowed.iter().any(|pattern| {
            let pattern = pattern.to_lowercase();
            if let Some(family) = pattern.strip_suffix("/*") {
                mime.starts_with(family) && mime[family.len()..].starts_with('/')
            } else if pattern.starts_with('.') {
                name.ends_with(&pattern)
            } else {
                mime == pattern
            }
        });
        if !matches {
            return Err(format!("File type not allowed: {}", name));
        }
    }

    if let Some(max_mb) = max_size_mb {
        if size_bytes > max_mb * BYTES_PER_MB {
            return Err(format!("File exceeds the maximum size of {} MB", max_mb));
        }
    }

    Ok(())
}

/// Paperclip button backed by a hidden file input. Validates the selection
/// and forwards valid files to the host upload flow.
#[component]
#[allow(non_snake_case)]
pub fn ChatFileUpload(
    /// Receives a validated file
    on_file_selected: Callback<web_sys::File>,
    /// Receives validation failures
    on_error: Callback<String>,
    /// MIME/extension allow-list; absent = accept anything
    #[prop(optional_no_strip)]
    allowed_file_types: Option<Vec<String>>,
    /// Maximum size in megabytes; absent = no cap
    #[prop(optional_no_strip)]
    max_file_size_mb: Option<f64>,
) -> impl IntoView {
    // Unique id so multiple widget instances don't trigger each other.
    let input_id = format!("chat-file-input-{}", Uuid::new_v4());
    let trigger_id = input_id.clone();

    let accept = allowed_file_types.clone().unwrap_or_default().join(",");

    let handle_change = move |ev: leptos::ev::Event| {
        let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        else {
            return;
        };
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            match validate_file(
                &file.name(),
                &file.type_(),
                file.size(),
                allowed_file_types.as_deref(),
                max_file_size_mb,
            ) {
                Ok(()) => on_file_selected.run(file),
                Err(e) => on_error.run(e),
            }
        }
        // Allow re-selecting the same file.
        input.set_value("");
    };

    view! {
        <div class="chat-file-upload">
            <input
                type="file"
                id=input_id
                style="display: none;"
                accept=accept
                on:change=handle_change
            />
            <button
                class="chat-file-upload__button"
                aria-label="Upload file"
                on:click=move |_| {
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        if let Some(input) = document.get_element_by_id(&trigger_id) {
                            if let Ok(input) = input.dyn_into::<web_sys::HtmlElement>() {
                                input.click();
                            }
                        }
                    }
                }
            >
                {icon("paperclip")}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_restrictions_accepts_anything() {
        assert!(validate_file("a.bin", "application/octet-stream", 1e9, None, None).is_ok());
    }

    #[test]
    fn test_exact_mime_match() {
        let allowed = allow(&["application/pdf"]);
        assert!(validate_file("doc.pdf", "application/pdf", 10.0, Some(&allowed), None).is_ok());
        assert!(validate_file("doc.txt", "text/plain", 10.0, Some(&allowed), None).is_err());
    }

    #[test]
    fn test_wildcard_mime_family() {
        let allowed = allow(&["image/*"]);
        assert!(validate_file("pic.png", "image/png", 10.0, Some(&allowed), None).is_ok());
        assert!(validate_file("clip.mp4", "video/mp4", 10.0, Some(&allowed), None).is_err());
    }

    #[test]
    fn test_extension_match_is_case_insensitive() {
        let allowed = allow(&[".csv"]);
        assert!(validate_file("DATA.CSV", "text/csv", 10.0, Some(&allowed), None).is_ok());
        assert!(validate_file("data.tsv", "text/tab-separated-values", 10.0, Some(&allowed), None).is_err());
    }

    #[test]
    fn test_size_cap() {
        assert!(validate_file("a.txt", "text/plain", 2.0 * BYTES_PER_MB, None, Some(2.0)).is_ok());
        let err = validate_file("a.txt", "text/plain", 2.1 * BYTES_PER_MB, None, Some(2.0)).unwrap_err();
        assert!(err.contains("2 MB"));
    }
}
