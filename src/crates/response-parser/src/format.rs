//! Failure rendering shared by the decoder and the classifier
//!
//! Every message has the same skeleton so a model sees consistent feedback:
//!
//! ```text
//! <headline>
//!
//! Expected format:
//!   Tool call:  {"tool": "...", "args": {...}}
//!   Completion: {"done": true, "response": "..."}
//!
//! Common fixes:            (decode failures only)
//!   - ...
//!
//! Received:
//! <input, elided when long>
//! ```

use crate::schemas::ShapeKind;

const COMMON_FIXES: [&str; 4] = [
    "Remove trailing commas after the last field or element",
    "Use double quotes for strings and keys, not single quotes",
    "Quote every object key",
    "Return only the JSON object, without surrounding prose",
];

/// Which stage failed, with its details
#[derive(Debug, Clone, Copy)]
pub enum FailureContext<'a> {
    /// Text was not valid JSON
    Decode(&'a serde_json::Error),
    /// JSON matched neither shape; field-level messages in report order
    Validation(&'a [String]),
}

/// Render a complete failure message
///
/// `snippet` is the model output to echo back; it is elided past
/// `max_chars` characters.
pub fn render(context: FailureContext<'_>, snippet: &str, max_chars: usize) -> String {
    let mut sections = Vec::with_capacity(4);

    match context {
        FailureContext::Decode(cause) => {
            sections.push(format!("Failed to parse response as JSON: {}", cause));
            sections.push(expected_format_block());
            sections.push(common_fixes_block());
        }
        FailureContext::Validation(errors) => {
            let mut headline = String::from("Response did not match any expected format:");
            for error in errors {
                headline.push_str("\n  - ");
                headline.push_str(error);
            }
            sections.push(headline);
            sections.push(expected_format_block());
        }
    }

    sections.push(received_block(snippet, max_chars));
    sections.join("\n\n")
}

/// Both canonical shapes
pub fn expected_format_block() -> String {
    format!(
        "Expected format:\n  Tool call:  {}\n  Completion: {}",
        ShapeKind::ToolCall.example(),
        ShapeKind::Completion.example()
    )
}

/// Frequent JSON syntax mistakes
pub fn common_fixes_block() -> String {
    let mut block = String::from("Common fixes:");
    for fix in COMMON_FIXES {
        block.push_str("\n  - ");
        block.push_str(fix);
    }
    block
}

/// Echo of the input, elided past `max_chars` characters
pub fn received_block(snippet: &str, max_chars: usize) -> String {
    if snippet.is_empty() {
        return "Received: (empty response)".to_string();
    }

    let total = snippet.chars().count();
    if total <= max_chars {
        format!("Received:\n{}", snippet)
    } else {
        format!(
            "Received:\n{}... [truncated, {} characters total]",
            truncate_chars(snippet, max_chars),
            total
        )
    }
}

/// First `max_chars` characters of `text`, on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
