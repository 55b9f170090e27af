//! Object shape declarations

use super::issue::{IssueKind, JsonType, ValidationError, ValidationIssue};
use serde_json::Value;

/// Validation rule for a single object field
///
/// `value` is `None` when the field is absent. Returns the issue to report,
/// if any.
pub trait FieldRule: Send + Sync {
    fn check(&self, value: Option<&Value>) -> Option<IssueKind>;
}

/// Field must be a string of at least `min_length` characters
pub struct StringRule {
    min_length: usize,
}

impl StringRule {
    pub fn new() -> Self {
        Self { min_length: 0 }
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = min;
        self
    }
}

impl Default for StringRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for StringRule {
    fn check(&self, value: Option<&Value>) -> Option<IssueKind> {
        match value {
            Some(Value::String(s)) if s.chars().count() < self.min_length => {
                Some(IssueKind::TooSmall {
                    minimum: self.min_length,
                })
            }
            Some(Value::String(_)) => None,
            other => Some(IssueKind::InvalidType {
                expected: JsonType::String,
                received: JsonType::of(other),
            }),
        }
    }
}

/// Field must equal one exact value
pub struct LiteralRule {
    expected: Value,
}

impl LiteralRule {
    pub fn new(expected: Value) -> Self {
        Self { expected }
    }
}

impl FieldRule for LiteralRule {
    fn check(&self, value: Option<&Value>) -> Option<IssueKind> {
        if value == Some(&self.expected) {
            None
        } else {
            Some(IssueKind::InvalidLiteral {
                expected: self.expected.clone(),
            })
        }
    }
}

/// Field must be an object with arbitrary values
pub struct RecordRule;

impl FieldRule for RecordRule {
    fn check(&self, value: Option<&Value>) -> Option<IssueKind> {
        match value {
            Some(Value::Object(_)) => None,
            other => Some(IssueKind::InvalidType {
                expected: JsonType::Object,
                received: JsonType::of(other),
            }),
        }
    }
}

/// Declared set of fields for a JSON object
///
/// Fields are checked in declaration order, so issues come out in a stable
/// order. A strict shape additionally reports undeclared keys, in the order
/// they appear in the value.
pub struct ObjectShape {
    name: String,
    fields: Vec<(String, Box<dyn FieldRule>)>,
    strict: bool,
}

impl ObjectShape {
    /// Create an open shape with no fields
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            strict: false,
        }
    }

    /// Add a field with a custom rule
    pub fn field(mut self, key: impl Into<String>, rule: impl FieldRule + 'static) -> Self {
        self.fields.push((key.into(), Box::new(rule)));
        self
    }

    /// Add a string field
    pub fn string(self, key: impl Into<String>) -> Self {
        self.field(key, StringRule::new())
    }

    /// Add a string field that must not be empty
    pub fn non_empty_string(self, key: impl Into<String>) -> Self {
        self.field(key, StringRule::new().min_length(1))
    }

    /// Add a field that must equal `expected`
    pub fn literal(self, key: impl Into<String>, expected: Value) -> Self {
        self.field(key, LiteralRule::new(expected))
    }

    /// Add a string-keyed map field
    pub fn record(self, key: impl Into<String>) -> Self {
        self.field(key, RecordRule)
    }

    /// Reject keys that are not declared
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared keys in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Collect every issue for `value`; empty when it matches
    pub fn issues(&self, value: &Value) -> Vec<ValidationIssue> {
        let Value::Object(map) = value else {
            return vec![ValidationIssue::root(IssueKind::InvalidType {
                expected: JsonType::Object,
                received: JsonType::of(Some(value)),
            })];
        };

        let mut issues: Vec<ValidationIssue> = self
            .fields
            .iter()
            .filter_map(|(key, rule)| {
                rule.check(map.get(key))
                    .map(|kind| ValidationIssue::field(key, kind))
            })
            .collect();

        if self.strict {
            let unknown: Vec<String> = map
                .keys()
                .filter(|key| !self.fields.iter().any(|(declared, _)| declared == *key))
                .cloned()
                .collect();

            if !unknown.is_empty() {
                issues.push(ValidationIssue::root(IssueKind::UnrecognizedKeys {
                    keys: unknown,
                }));
            }
        }

        issues
    }

    /// Validate `value`, returning all issues on failure
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        let issues = self.issues(value);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(self.name.clone(), issues))
        }
    }
}
