use canonical_json::to_string;
use serde_json::Value;

use crate::identifiers::ProfileId;
use std::fmt;

/// Error returned when canonicalization fails.
#[derive(thiserror::Error, Debug)]
pub enum CanonicalizationError {
    /// A floating point number was found; ledger payloads carry integers only.
    #[error("non-integer number at {0}")]
    NonIntegerNumber(String),
    /// Nesting deeper than the profile allows.
    #[error("nesting exceeds depth {max} at {path}")]
    TooDeep {
        /// Path at which the limit was hit.
        path: String,
        /// Maximum permitted depth.
        max: usize,
    },
    /// The underlying serializer failed.
    #[error("other error: {0}")]
    Other(String),
}

/// Maximum object/array nesting accepted by the canonical profile.
pub const MAX_DEPTH: usize = 16;

/// Helper for building JSON paths during validation.
#[derive(Debug, Clone)]
struct Path {
    segments: Vec<String>,
}

impl Path {
    fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    fn push_field(&self, field: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(field.to_string());
        Self { segments }
    }

    fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(format!("[{}]", index));
        Self { segments }
    }

    fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.segments.join("."))
        }
    }
}

/// Canonicalizer that emits deterministic RFC 8785 bytes.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    profile: ProfileId,
}

impl Canonicalizer {
    /// Creates a new canonicalizer for the provided profile.
    pub fn new(profile: ProfileId) -> Self {
        Self { profile }
    }

    /// Profile this canonicalizer was built for.
    pub fn profile(&self) -> &ProfileId {
        &self.profile
    }

    /// Produces canonical bytes for a JSON value.
    pub fn canonicalize(&self, value: &Value) -> Result<Vec<u8>, CanonicalizationError> {
        Self::validate(value, Path::root())?;
        let canonical =
            to_string(value).map_err(|err| CanonicalizationError::Other(err.to_string()))?;
        Ok(canonical.into_bytes())
    }

    fn validate(value: &Value, path: Path) -> Result<(), CanonicalizationError> {
        if path.depth() > MAX_DEPTH {
            return Err(CanonicalizationError::TooDeep {
                path: path.to_string(),
                max: MAX_DEPTH,
            });
        }
        match value {
            Value::Object(map) => {
                for (key, child) in map {
                    Self::validate(child, path.push_field(key))?;
                }
                Ok(())
            }
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    Self::validate(item, path.push_index(idx))?;
                }
                Ok(())
            }
            Value::Number(num) if num.is_f64() => {
                Err(CanonicalizationError::NonIntegerNumber(path.to_string()))
            }
            Value::Number(_) | Value::String(_) | Value::Bool(_) | Value::Null => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn canonicalizer() -> Canonicalizer {
        Canonicalizer::new(ProfileId::parse("ticketry-canonical-v1").unwrap())
    }

    #[test]
    fn keys_are_sorted() {
        let bytes = canonicalizer()
            .canonicalize(&json!({"b": 1, "a": "x"}))
            .unwrap();
        assert_eq!(bytes, br#"{"a":"x","b":1}"#);
    }

    #[test]
    fn floats_are_rejected_with_path() {
        let err = canonicalizer()
            .canonicalize(&json!({"call": {"capacity": 1.5}}))
            .unwrap_err();
        assert_eq!(err.to_string(), "non-integer number at call.capacity");
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let mut value = json!(0);
        for _ in 0..=MAX_DEPTH {
            value = json!([value]);
        }
        assert!(matches!(
            canonicalizer().canonicalize(&value),
            Err(CanonicalizationError::TooDeep { .. })
        ));
    }
}
