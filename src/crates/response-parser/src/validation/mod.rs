//! Closed-object shape validation
//!
//! A small validation layer over `serde_json::Value` that collects every
//! violation instead of stopping at the first one. Shapes are declared with
//! a fluent builder and checked field by field:
//!
//! ```rust
//! use response_parser::validation::ObjectShape;
//! use serde_json::json;
//!
//! let shape = ObjectShape::new("file_read_args")
//!     .non_empty_string("path")
//!     .strict();
//!
//! assert!(shape.validate(&json!({"path": "notes.txt"})).is_ok());
//!
//! let err = shape.validate(&json!({"path": "", "mode": "r"})).unwrap_err();
//! assert_eq!(err.issues().len(), 2);
//! ```

mod issue;
mod path;
mod shape;

pub use issue::{IssueKind, JsonType, ValidationError, ValidationIssue};
pub use path::{path_to_string, PathSegment};
pub use shape::{FieldRule, LiteralRule, ObjectShape, RecordRule, StringRule};
