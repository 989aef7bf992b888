use crate::validation::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Width of an [`Identity`] in bytes.
pub const IDENTITY_LEN: usize = 20;

/// Width of a [`Bytes32`] label in bytes.
pub const BYTES32_LEN: usize = 32;

fn identity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("invalid regex"))
}

/// Account identity: the 20-byte address a caller is authenticated as.
///
/// Textual form is `0x` followed by 40 hex digits. Parsing accepts either case;
/// formatting always emits lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity([u8; IDENTITY_LEN]);

impl Identity {
    /// The null identity. Never a valid registration target.
    pub const ZERO: Identity = Identity([0; IDENTITY_LEN]);

    /// Wraps raw address bytes.
    pub const fn from_bytes(bytes: [u8; IDENTITY_LEN]) -> Self {
        Self(bytes)
    }

    /// Parses a `0x`-prefixed hex address.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref();
        if !identity_pattern().is_match(s) {
            return Err(ValidationError::PatternMismatch {
                field: "Identity",
                value: s.to_string(),
            });
        }
        let mut bytes = [0u8; IDENTITY_LEN];
        hex::decode_to_slice(&s[2..], &mut bytes).map_err(|_| {
            ValidationError::PatternMismatch {
                field: "Identity",
                value: s.to_string(),
            }
        })?;
        Ok(Self(bytes))
    }

    /// Returns the raw address bytes.
    pub fn as_bytes(&self) -> &[u8; IDENTITY_LEN] {
        &self.0
    }

    /// Returns true for [`Identity::ZERO`].
    pub fn is_zero(&self) -> bool {
        self.0 == [0; IDENTITY_LEN]
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Identity {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identity {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Identity> for String {
    fn from(value: Identity) -> Self {
        value.to_string()
    }
}

/// Fixed-width 32-byte label, zero padded on the right.
///
/// Display names, emails and venue keys are stored this way. The textual form
/// is the label itself with the padding stripped.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bytes32([u8; BYTES32_LEN]);

impl Bytes32 {
    /// Encodes a UTF-8 label of at most 32 bytes.
    pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
        let s = value.as_ref();
        if s.len() > BYTES32_LEN {
            return Err(ValidationError::TooLong {
                field: "Bytes32",
                len: s.len(),
                max: BYTES32_LEN,
            });
        }
        let mut bytes = [0u8; BYTES32_LEN];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Ok(Self(bytes))
    }

    /// Returns the padded bytes.
    pub fn as_bytes(&self) -> &[u8; BYTES32_LEN] {
        &self.0
    }

    /// Returns the label with trailing padding removed.
    pub fn as_str(&self) -> &str {
        let end = self
            .0
            .iter()
            .rposition(|b| *b != 0)
            .map(|i| i + 1)
            .unwrap_or(0);
        // Only `parse` builds values, so the prefix is always valid UTF-8.
        std::str::from_utf8(&self.0[..end]).unwrap_or_default()
    }

    /// Returns true if the label is empty.
    pub fn is_empty(&self) -> bool {
        self.0 == [0; BYTES32_LEN]
    }
}

impl fmt::Display for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Bytes32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bytes32({:?})", self.as_str())
    }
}

impl FromStr for Bytes32 {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Bytes32 {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Bytes32> for String {
    fn from(value: Bytes32) -> Self {
        value.as_str().to_string()
    }
}

macro_rules! newtype {
    ($name:ident, $doc:expr, $pattern:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parses a validated identifier from a string.
            pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
                static PATTERN: OnceLock<Regex> = OnceLock::new();
                let s = value.into();
                let re = PATTERN.get_or_init(|| Regex::new($pattern).expect("invalid regex"));
                if !re.is_match(&s) {
                    return Err(ValidationError::PatternMismatch {
                        field: stringify!($name),
                        value: s,
                    });
                }
                Ok(Self(s))
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

newtype!(
    ProfileId,
    "Identifier for canonicalization profiles (pattern: `[A-Za-z0-9_-]{16,128}`)",
    r"^[A-Za-z0-9_-]{16,128}$"
);
newtype!(
    Timestamp,
    "UTC RFC3339 timestamp with `Z` suffix.",
    r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(\.\d{1,9})?Z$"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_parses_mixed_case_and_prints_lowercase() {
        let id = Identity::parse("0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf").unwrap();
        assert_eq!(id.to_string(), "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf");
    }

    #[test]
    fn identity_rejects_missing_prefix_and_bad_width() {
        assert!(Identity::parse("7e5f4552091a69125d5dfcb7b8c2659029395bdf").is_err());
        assert!(Identity::parse("0x7e5f").is_err());
        assert!(Identity::parse("0xzz5f4552091a69125d5dfcb7b8c2659029395bdf").is_err());
    }

    #[test]
    fn zero_identity() {
        let zero = Identity::parse("0x0000000000000000000000000000000000000000").unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, Identity::ZERO);
    }

    #[test]
    fn bytes32_strips_padding() {
        let label = Bytes32::parse("Auditorio Nacional").unwrap();
        assert_eq!(label.as_str(), "Auditorio Nacional");
        assert_eq!(label.as_bytes()[18..], [0u8; 14]);
    }

    #[test]
    fn bytes32_rejects_long_labels() {
        let err = Bytes32::parse("a".repeat(33)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "Bytes32",
                len: 33,
                max: 32
            }
        );
        assert!(Bytes32::parse("a".repeat(32)).is_ok());
    }

    #[test]
    fn timestamp_requires_utc_suffix() {
        assert!(Timestamp::parse("2024-01-01T00:00:00Z").is_ok());
        assert!(Timestamp::parse("2024-01-01T00:00:00+01:00").is_err());
    }
}
