//! Parsed product document: DOM queries plus the embedded initial-data
//! payload the page exposes to its own scripts.

use crate::mobase::selectors::page;
use scraper::{ElementRef, Html};
use serde_json::Value;
use tracing::{debug, trace};

/// One loaded catalog page, ready for extraction.
///
/// Wraps the parsed DOM and the `window.initialData` object (when the
/// page carries one). All queries are infallible: a selector that
/// matches nothing yields an empty iterator, a missing payload is `None`.
pub struct ProductDocument {
    html: Html,
    initial_data: Option<Value>,
}

impl ProductDocument {
    /// Parses raw page HTML. Never fails; malformed markup degrades to
    /// whatever the parser can recover.
    pub fn parse(raw: &str) -> Self {
        let html = Html::parse_document(raw);
        let initial_data = extract_initial_data(&html);

        if initial_data.is_some() {
            debug!("Found embedded initialData payload");
        } else {
            debug!("No embedded initialData payload on page");
        }

        Self { html, initial_data }
    }

    /// The parsed DOM for selector queries.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// The embedded initial-data object, if the page exposes one.
    pub fn initial_data(&self) -> Option<&Value> {
        self.initial_data.as_ref()
    }

    /// Trimmed text content of an element.
    pub fn text_of(element: ElementRef) -> String {
        element.text().collect::<String>().trim().to_string()
    }

    /// Raw text content of the document body, newlines preserved.
    pub fn body_text(&self) -> String {
        self.html
            .select(&page::BODY)
            .next()
            .map(|body| body.text().collect::<String>())
            .unwrap_or_default()
    }

    /// Document title text, if present.
    pub fn title(&self) -> Option<String> {
        self.html.select(&page::TITLE).next().map(Self::text_of).filter(|t| !t.is_empty())
    }

    /// Meta description content, if present.
    pub fn meta_description(&self) -> Option<String> {
        self.html
            .select(&page::META_DESCRIPTION)
            .next()
            .and_then(|meta| meta.value().attr("content"))
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
    }
}

/// Scans script elements for a `window.initialData = {...}` assignment
/// and parses the object literal as JSON.
fn extract_initial_data(html: &Html) -> Option<Value> {
    for script in html.select(&page::SCRIPT) {
        let text: String = script.text().collect();
        let Some(idx) = text.find("window.initialData") else {
            continue;
        };

        let after = &text[idx..];
        let Some(brace) = after.find('{') else {
            continue;
        };

        let Some(object) = slice_balanced_object(&after[brace..]) else {
            trace!("Unbalanced initialData object literal, skipping script");
            continue;
        };

        match serde_json::from_str(object) {
            Ok(value) => return Some(value),
            Err(e) => {
                trace!("initialData is not valid JSON: {}", e);
            }
        }
    }
    None
}

/// Returns the prefix of `text` covering one balanced `{...}` object,
/// respecting string literals and escapes.
fn slice_balanced_object(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..i + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_parse_plain_page() {
        let doc = ProductDocument::parse("<html><body><p>hello</p></body></html>");
        assert!(doc.initial_data().is_none());
        assert!(doc.body_text().contains("hello"));
    }

    #[test]
    fn test_title_and_meta_description() {
        let doc = ProductDocument::parse(
            r#"<html><head>
                <title>Bremsscheibe | MoBase</title>
                <meta name="description" content="Ersatzteil für Drehgestelle">
            </head><body></body></html>"#,
        );
        assert_eq!(doc.title().as_deref(), Some("Bremsscheibe | MoBase"));
        assert_eq!(doc.meta_description().as_deref(), Some("Ersatzteil für Drehgestelle"));
    }

    #[test]
    fn test_missing_title_is_none() {
        let doc = ProductDocument::parse("<html><body></body></html>");
        assert!(doc.title().is_none());
        assert!(doc.meta_description().is_none());
    }

    #[test]
    fn test_initial_data_extraction() {
        let doc = ProductDocument::parse(
            r#"<html><body><script>
                window.initialData = {"product/dataProduct": {"data": {"product": {"code": "A2V1"}}}};
            </script></body></html>"#,
        );

        let data = doc.initial_data().expect("payload");
        assert_eq!(
            data["product/dataProduct"]["data"]["product"]["code"],
            serde_json::json!("A2V1")
        );
    }

    #[test]
    fn test_initial_data_with_nested_braces_and_strings() {
        let doc = ProductDocument::parse(
            r#"<script>var x = 1; window.initialData = {"a": {"b": "brace } in string"}, "c": [1, 2]}; doSomething();</script>"#,
        );

        let data = doc.initial_data().expect("payload");
        assert_eq!(data["a"]["b"], serde_json::json!("brace } in string"));
    }

    #[test]
    fn test_initial_data_invalid_json_is_none() {
        // JS object literal with unquoted keys is not JSON
        let doc = ProductDocument::parse(
            "<script>window.initialData = {unquoted: fn()};</script>",
        );
        assert!(doc.initial_data().is_none());
    }

    #[test]
    fn test_slice_balanced_object() {
        assert_eq!(slice_balanced_object(r#"{"a": 1} trailing"#), Some(r#"{"a": 1}"#));
        assert_eq!(slice_balanced_object(r#"{"a": {"b": 2}}"#), Some(r#"{"a": {"b": 2}}"#));
        assert_eq!(slice_balanced_object(r#"{"a": "\"}"}"#), Some(r#"{"a": "\"}"}"#));
        assert!(slice_balanced_object(r#"{"a": 1"#).is_none());
    }

    #[test]
    fn test_text_of_trims() {
        let doc = ProductDocument::parse("<html><body><p>  spaced  </p></body></html>");
        let p = doc.html().select(&Selector::parse("p").unwrap()).next().unwrap();
        assert_eq!(ProductDocument::text_of(p), "spaced");
    }
}
