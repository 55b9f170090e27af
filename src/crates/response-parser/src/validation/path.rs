//! Property-access paths

use serde::Serialize;
use std::fmt;

/// One property-access step into a JSON value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Object key
    Key(String),
    /// Array index
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{}", index),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// Render a path as a dotted string, `root` when empty
///
/// ```rust
/// use response_parser::validation::{path_to_string, PathSegment};
///
/// assert_eq!(path_to_string(&[]), "root");
/// assert_eq!(path_to_string(&["args".into(), "path".into()]), "args.path");
/// ```
pub fn path_to_string(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return "root".to_string();
    }

    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_is_root() {
        assert_eq!(path_to_string(&[]), "root");
    }

    #[test]
    fn test_single_key() {
        assert_eq!(path_to_string(&[PathSegment::from("done")]), "done");
    }

    #[test]
    fn test_mixed_segments() {
        let path = vec![
            PathSegment::from("args"),
            PathSegment::from("files"),
            PathSegment::from(2),
            PathSegment::from("name"),
        ];
        assert_eq!(path_to_string(&path), "args.files.2.name");
    }
}
