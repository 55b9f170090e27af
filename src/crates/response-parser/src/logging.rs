//! Logging helpers for untrusted model output

use crate::format::truncate_chars;
use regex::Regex;
use std::sync::LazyLock;

/// Longest raw-response preview emitted in logs
pub const LOG_PREVIEW_CHARS: usize = 120;

/// A quoted JSON string (escapes included) or a bare run up to a delimiter
const SECRET_VALUE: &str = r#"(?:"(?:[^"\\]|\\.)*"|[^\s",}]+)"#;

static SECRET_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (
            r#"(?i)((?:authorization|auth)"?\s*:\s*"?bearer\s+)[^\s",}]+"#.to_string(),
            "${1}[REDACTED]",
        ),
        (
            format!(
                r#"(?i)("?(?:api[\s_-]?key|apikey|password|passwd|pwd|token|secret)"?\s*[:=]\s*){}"#,
                SECRET_VALUE
            ),
            "${1}\"[REDACTED]\"",
        ),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(&pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Sanitize string for logging (remove sensitive data)
///
/// Model output can echo credentials from the conversation, so raw
/// responses go through this before reaching a log line.
///
/// ```rust
/// use response_parser::logging::sanitize_for_logging;
///
/// let sanitized = sanitize_for_logging("api_key=sk-abc123");
/// assert!(sanitized.contains("[REDACTED]"));
/// assert!(!sanitized.contains("sk-abc123"));
/// ```
pub fn sanitize_for_logging(input: &str) -> String {
    let mut result = input.to_string();
    for (re, replacement) in SECRET_PATTERNS.iter() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}

/// Sanitized, length-bounded view of model output for log lines
pub fn log_preview(input: &str) -> String {
    let sanitized = sanitize_for_logging(input);
    let preview = truncate_chars(&sanitized, LOG_PREVIEW_CHARS);
    if preview.len() < sanitized.len() {
        format!("{}…", preview)
    } else {
        sanitized
    }
}
