//! HTML bag-of-words feature extraction.
//!
//! Mirrors a SAX-style "skip script/style, keep everything else" pass: we
//! don't build a full text-rendering pipeline, just walk the parsed tree,
//! drop the subtrees rooted at `<script>`/`<style>`, and concatenate what's
//! left. Malformed HTML and non-UTF-8 byte sequences must never cause this
//! to fail; html5ever (via `scraper`) already recovers from broken markup,
//! and we lossily re-decode the input as UTF-8 up front.

use discover_model::FeatureVector;
use scraper::{Html, Node};

const SKIPPED_ELEMENTS: [&str; 2] = ["script", "style"];

/// Extracts a token -> occurrence-count feature vector from an HTML byte
/// buffer. Never fails; pathological input simply yields an empty vector.
pub fn extract(bytes: &[u8]) -> FeatureVector {
    let text = String::from_utf8_lossy(bytes);
    extract_text(&text)
}

fn extract_text(html: &str) -> FeatureVector {
    let document = Html::parse_document(html);
    let mut buffer = String::new();

    for node_ref in document.tree.nodes() {
        let Node::Text(text) = node_ref.value() else {
            continue;
        };
        if is_under_skipped_element(node_ref) {
            continue;
        }
        buffer.push(' ');
        buffer.push_str(text);
    }

    tokenize(&buffer)
}

fn is_under_skipped_element(node_ref: ego_tree::NodeRef<'_, Node>) -> bool {
    node_ref.ancestors().any(|ancestor| {
        ancestor
            .value()
            .as_element()
            .map(|el| SKIPPED_ELEMENTS.contains(&el.name()))
            .unwrap_or(false)
    })
}

fn tokenize(text: &str) -> FeatureVector {
    let lowered = text.to_lowercase();
    let cleaned: String = lowered
        .chars()
        .map(|c| if is_ascii_punctuation(c) { ' ' } else { c })
        .collect();

    let mut features = FeatureVector::new();
    for token in cleaned.split_ascii_whitespace() {
        if !token.is_empty() {
            features.record(token);
        }
    }
    features
}

fn is_ascii_punctuation(c: char) -> bool {
    c.is_ascii() && c.is_ascii_punctuation()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_script_and_style() {
        let html = "<html><head><script>evil()</script><style>.a{}</style></head>\
                     <body><p>Thank you for closing the message box.</p><a>test</a></body></html>";
        let features = extract(html.as_bytes());
        let expected = [
            "box", "closing", "for", "message", "test", "thank", "the", "you",
        ];
        for token in expected {
            assert_eq!(features.get(token), Some(&1), "missing token {token}");
        }
        assert!(!features.contains_key("evil"));
    }

    #[test]
    fn punctuation_and_duplicates() {
        let html = "<html><title>my title</title><body>abc a.b.c. abc. test 123 abc</body></html>";
        let features = extract(html.as_bytes());
        assert_eq!(features.get("abc"), Some(&3));
        assert_eq!(features.get("a"), Some(&1));
        assert_eq!(features.get("b"), Some(&1));
        assert_eq!(features.get("c"), Some(&1));
        assert_eq!(features.get("123"), Some(&1));
        assert_eq!(features.get("my"), Some(&1));
        assert_eq!(features.get("title"), Some(&1));
        assert_eq!(features.get("test"), Some(&1));
    }

    #[test]
    fn comments_are_excluded() {
        let html = "<body><!-- hidden comment text --><p>visible</p></body>";
        let features = extract(html.as_bytes());
        assert!(!features.contains_key("hidden"));
        assert_eq!(features.get("visible"), Some(&1));
    }

    #[test]
    fn malformed_html_does_not_panic() {
        let html = "<div><p>unterminated<div><span>broken &amp; weird < tags";
        let _ = extract(html.as_bytes());
    }

    #[test]
    fn invalid_utf8_does_not_panic() {
        let bytes: &[u8] = &[0xff, 0xfe, b'<', b'p', b'>', b'h', b'i', b'<', b'/', b'p', b'>'];
        let features = extract(bytes);
        assert!(features.get("hi").is_some());
    }

    #[test]
    fn plain_text_is_tokenized_too() {
        let features = extract(b"just some plain words");
        assert_eq!(features.get("just"), Some(&1));
        assert_eq!(features.get("plain"), Some(&1));
    }

    #[test]
    fn non_ascii_punctuation_is_preserved() {
        let features = extract("<p>caf\u{e9} \u{2014} na\u{efve}</p>".as_bytes());
        assert!(features.keys().any(|k| k.contains('\u{e9}')));
    }
}
