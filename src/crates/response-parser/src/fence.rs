//! Markdown code-fence removal
//!
//! Models often wrap JSON in fences:
//!
//! ````text
//! ```json
//! { "tool": "file_read", "args": { "path": "test.ts" } }
//! ```
//! ````
//!
//! [`strip_markdown`] removes every fence marker so the payload can be
//! decoded directly.

use regex::Regex;
use std::sync::LazyLock;

static JSON_FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```json\n?").unwrap());

static BARE_FENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"```\n?").unwrap());

const FENCE: &str = "```";

/// Remove markdown code fences and surrounding whitespace
///
/// Removes `` ```json `` markers first, then any bare `` ``` `` marker, each
/// with an optional trailing newline, anywhere in the text. Removal repeats
/// until no fence remains, so the result never contains a fence and
/// stripping is idempotent.
///
/// ```rust
/// use response_parser::strip_markdown;
///
/// assert_eq!(strip_markdown("```json\n{\"done\": true}\n```"), "{\"done\": true}");
/// assert_eq!(strip_markdown(""), "");
/// ```
pub fn strip_markdown(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut current = text.to_string();
    while current.contains(FENCE) {
        let without_json = JSON_FENCE_REGEX.replace_all(&current, "");
        current = BARE_FENCE_REGEX.replace_all(&without_json, "").into_owned();
    }

    current.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_raw_json_unchanged() {
        let input = r#"{ "tool": "file_read", "args": { "path": "test.txt" } }"#;
        assert_eq!(strip_markdown(input), input);
    }

    #[test]
    fn test_json_fence() {
        let input = "```json\n{ \"tool\": \"file_read\", \"args\": { \"path\": \"test.txt\" } }\n```";
        assert_eq!(
            strip_markdown(input),
            r#"{ "tool": "file_read", "args": { "path": "test.txt" } }"#
        );
    }

    #[test]
    fn test_bare_fence() {
        let input = "```\n{ \"tool\": \"file_read\", \"args\": { \"path\": \"test.txt\" } }\n```";
        assert_eq!(
            strip_markdown(input),
            r#"{ "tool": "file_read", "args": { "path": "test.txt" } }"#
        );
    }

    #[test]
    fn test_fences_without_newlines() {
        let input = r#"```json{ "done": true, "response": "Complete" }```"#;
        assert_eq!(
            strip_markdown(input),
            r#"{ "done": true, "response": "Complete" }"#
        );
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        let input = "  \n```json\n{ \"tool\": \"file_read\" }\n```\n  ";
        assert_eq!(strip_markdown(input), r#"{ "tool": "file_read" }"#);
    }

    #[test]
    fn test_empty_fence_before_payload() {
        let input = "```json\n```\n{ \"tool\": \"file_read\" }\n```";
        assert_eq!(strip_markdown(input), r#"{ "tool": "file_read" }"#);
    }

    #[test]
    fn test_trailing_newline_after_closing_fence() {
        let input = "```json\n{ \"done\": true }\n```\n";
        assert_eq!(strip_markdown(input), r#"{ "done": true }"#);
    }

    #[test]
    fn test_empty_content_between_fences() {
        assert_eq!(strip_markdown("```json\n\n```"), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(strip_markdown(""), "");
    }

    #[test]
    fn test_whitespace_only_input() {
        assert_eq!(strip_markdown(" \n\t "), "");
    }

    #[test]
    fn test_fence_rebuilt_by_removal() {
        // Removing the inner json marker glues the outer backticks into a new fence.
        let stripped = strip_markdown("`````json`{}");
        assert_eq!(stripped, "{}");
        assert_eq!(strip_markdown(&stripped), stripped);
    }

    proptest! {
        #[test]
        fn prop_strip_is_idempotent(s in "(```|```json|\n| |`|json|[a-z{}\":,])*") {
            let once = strip_markdown(&s);
            prop_assert_eq!(strip_markdown(&once), once.clone());
        }

        #[test]
        fn prop_strip_is_idempotent_any(s in any::<String>()) {
            let once = strip_markdown(&s);
            prop_assert_eq!(strip_markdown(&once), once.clone());
        }

        #[test]
        fn prop_no_fence_survives(s in "(```|```json|\n|`|[a-z ])*") {
            prop_assert!(!strip_markdown(&s).contains(FENCE));
        }
    }
}
