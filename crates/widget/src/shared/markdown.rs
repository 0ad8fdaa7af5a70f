//! Markdown rendering for bot messages.
//!
//! Bot replies pass through pulldown-cmark and are then sanitized before
//! being injected with `inner_html`. Sanitization strips anything
//! script-executing: `<script>` tags, `on*` attributes, `javascript:` URIs.

use pulldown_cmark::{html, Options, Parser};

/// Render markdown to sanitized HTML safe for `inner_html`.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);

    sanitize_html(&out)
}

/// Allow-list sanitization of rendered HTML.
///
/// Rules:
/// - `<script>` tags and their content are removed
/// - `on*` attributes (onclick, onload, ...) are removed
/// - `javascript:` URIs are removed
/// - basic formatting tags, links and tables are kept
fn sanitize_html(html: &str) -> String {
    ammonia::Builder::new()
        .tags(maplit::hashset![
            "p", "br", "hr", "h1", "h2", "h3", "h4", "h5", "h6",
            "ul", "ol", "li", "strong", "em", "b", "i", "del", "blockquote",
            "code", "pre", "a",
            "table", "thead", "tbody", "tr", "td", "th",
        ])
        .link_rel(Some("noopener noreferrer"))
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_markdown() {
        let html = render_markdown("**bold** and *italic*");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn test_strips_script_tags() {
        let html = render_markdown("hello <script>alert('xss')</script> world");
        assert!(!html.contains("<script"));
        assert!(!html.contains("alert"));
    }

    #[test]
    fn test_strips_event_handler_attributes() {
        let html = render_markdown("<a href=\"https://example.com\" onclick=\"steal()\">link</a>");
        assert!(!html.contains("onclick"));
        assert!(html.contains("href"));
    }

    #[test]
    fn test_strips_javascript_uris() {
        let html = render_markdown("[click](javascript:alert(1))");
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_keeps_code_blocks() {
        let html = render_markdown("```\nlet x = 1;\n```");
        assert!(html.contains("<pre>"));
        assert!(html.contains("<code>"));
    }
}
