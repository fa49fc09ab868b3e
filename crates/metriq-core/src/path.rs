//! # Error Paths
//!
//! Typed paths into a JSON document. The `jsonschema` crate reports
//! violation locations as JSON Pointers (`/options/abortSignal/aborted`);
//! hosts and custom validators work with a typed segment sequence instead,
//! so array indices and object keys are distinguishable without string
//! parsing on the consumer side.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetriqError;

/// One step into a JSON document: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    /// Index into a JSON array.
    Index(usize),
    /// Key into a JSON object.
    Key(String),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Index(i) => write!(f, "[{i}]"),
        }
    }
}

/// Ordered path from the document root to a violating field.
///
/// Displays in dotted form with bracketed indices: `options.series[2].name`.
/// An empty path refers to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorPath(Vec<PathSegment>);

impl ErrorPath {
    /// The path referring to the document root.
    pub fn root() -> Self {
        ErrorPath(Vec::new())
    }

    /// Build a path from any segment-convertible sequence.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        ErrorPath(segments.into_iter().map(Into::into).collect())
    }

    /// Parse a JSON Pointer (RFC 6901) as produced by the `jsonschema`
    /// crate. Unsigned-integer tokens become [`PathSegment::Index`]; the
    /// escape sequences `~0` and `~1` are decoded per the RFC.
    ///
    /// # Errors
    ///
    /// Returns [`MetriqError::PointerParse`] when the pointer is non-empty
    /// but does not start with `/`.
    pub fn from_json_pointer(pointer: &str) -> Result<Self, MetriqError> {
        if pointer.is_empty() {
            return Ok(ErrorPath::root());
        }
        let rest = pointer
            .strip_prefix('/')
            .ok_or_else(|| MetriqError::PointerParse(pointer.to_string()))?;

        let segments = rest
            .split('/')
            .map(|token| {
                let token = token.replace("~1", "/").replace("~0", "~");
                match usize::from_str(&token) {
                    Ok(i) => PathSegment::Index(i),
                    Err(_) => PathSegment::Key(token),
                }
            })
            .collect();
        Ok(ErrorPath(segments))
    }

    /// Returns the segments in root-to-leaf order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// True when the path refers to the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// The final segment, if any.
    pub fn leaf(&self) -> Option<&PathSegment> {
        self.0.last()
    }
}

impl fmt::Display for ErrorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(root)");
        }
        for (i, seg) in self.0.iter().enumerate() {
            match seg {
                PathSegment::Key(k) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(k)?;
                }
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_object_pointer() {
        let path = ErrorPath::from_json_pointer("/options/abortSignal/aborted").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("options".into()),
                PathSegment::Key("abortSignal".into()),
                PathSegment::Key("aborted".into()),
            ]
        );
        assert_eq!(path.to_string(), "options.abortSignal.aborted");
    }

    #[test]
    fn parse_indexed_pointer() {
        let path = ErrorPath::from_json_pointer("/series/2/name").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("series".into()),
                PathSegment::Index(2),
                PathSegment::Key("name".into()),
            ]
        );
        assert_eq!(path.to_string(), "series[2].name");
    }

    #[test]
    fn parse_empty_pointer_is_root() {
        let path = ErrorPath::from_json_pointer("").unwrap();
        assert!(path.is_root());
        assert_eq!(path.to_string(), "(root)");
    }

    #[test]
    fn parse_rejects_missing_slash() {
        let err = ErrorPath::from_json_pointer("options/top").unwrap_err();
        assert!(matches!(err, MetriqError::PointerParse(_)));
    }

    #[test]
    fn pointer_escapes_decoded() {
        let path = ErrorPath::from_json_pointer("/a~1b/c~0d").unwrap();
        assert_eq!(
            path.segments(),
            &[
                PathSegment::Key("a/b".into()),
                PathSegment::Key("c~d".into()),
            ]
        );
    }

    #[test]
    fn leaf_segment() {
        let path = ErrorPath::new(["options", "top"]);
        assert_eq!(path.leaf(), Some(&PathSegment::Key("top".into())));
        assert_eq!(ErrorPath::root().leaf(), None);
    }
}
