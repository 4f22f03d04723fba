//! Dotted target paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Reasons a target path is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("target path is empty")]
    Empty,

    #[error("target path `{path}` has an empty segment at position {position}")]
    EmptySegment { path: String, position: usize },

    #[error("target path `{path}` has invalid segment `{segment}`")]
    InvalidSegment { path: String, segment: String },
}

/// A non-empty, dot-separated list of identifiers, e.g. `spec.template.spec`.
///
/// Construction validates the path, so every `TargetPath` has at least one
/// segment and no segment is empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TargetPath(String);

impl TargetPath {
    /// Parses and validates a dotted path.
    pub fn parse(path: impl Into<String>) -> Result<Self, PathError> {
        let path = path.into();
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        for (position, segment) in path.split('.').enumerate() {
            if segment.is_empty() {
                return Err(PathError::EmptySegment {
                    path: path.clone(),
                    position,
                });
            }
            if !is_identifier(segment) {
                return Err(PathError::InvalidSegment {
                    path: path.clone(),
                    segment: segment.to_string(),
                });
            }
        }

        Ok(TargetPath(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segments in path order.
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.split('.')
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// Splits off the last segment: `a.b.c` gives `(Some("a.b"), "c")`.
    pub fn split_leaf(&self) -> (Option<&str>, &str) {
        match self.0.rsplit_once('.') {
            Some((parents, leaf)) => (Some(parents), leaf),
            None => (None, self.0.as_str()),
        }
    }
}

fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl TryFrom<String> for TargetPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TargetPath::parse(value)
    }
}

impl std::str::FromStr for TargetPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetPath::parse(s)
    }
}

impl From<TargetPath> for String {
    fn from(value: TargetPath) -> Self {
        value.0
    }
}

impl fmt::Display for TargetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
