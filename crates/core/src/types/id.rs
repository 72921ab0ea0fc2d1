//! Document identifier type.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`DocumentId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentIdError {
    /// The input string is empty.
    #[error("document id cannot be empty")]
    Empty,
    /// The input has the wrong number of characters.
    #[error("document id must be {expected} hex characters, got {actual}")]
    WrongLength {
        /// Required length.
        expected: usize,
        /// Length of the input.
        actual: usize,
    },
    /// The input contains non-hex characters.
    #[error("document id must contain only hex characters")]
    NotHex,
}

/// A store-assigned document identifier.
///
/// Documents in every collection are keyed by a 12-byte identifier that the
/// store (or its driver) assigns on insert. The textual form is 24 lowercase
/// hex characters, which is what the dashboard shows in tables and selectors.
///
/// ## Examples
///
/// ```
/// use eshop_core::DocumentId;
///
/// let id = DocumentId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
/// assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
///
/// assert!(DocumentId::parse("").is_err());
/// assert!(DocumentId::parse("not-an-id").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId([u8; 12]);

impl DocumentId {
    /// Length of the textual (hex) form.
    pub const HEX_LENGTH: usize = 24;

    /// Parse a `DocumentId` from its hex form.
    ///
    /// Surrounding whitespace is ignored and upper-case hex is accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not 24 characters long, or
    /// contains non-hex characters.
    pub fn parse(s: &str) -> Result<Self, DocumentIdError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DocumentIdError::Empty);
        }

        if s.len() != Self::HEX_LENGTH {
            return Err(DocumentIdError::WrongLength {
                expected: Self::HEX_LENGTH,
                actual: s.chars().count(),
            });
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| DocumentIdError::NotHex)?;
        Ok(Self(bytes))
    }

    /// Create a `DocumentId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    #[must_use]
    pub const fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Returns the lowercase hex form.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = DocumentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id = DocumentId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
        assert_eq!(id.bytes()[0], 0x65);
        assert_eq!(id.bytes()[11], 0xf6);
    }

    #[test]
    fn test_parse_uppercase_and_whitespace() {
        let id = DocumentId::parse("  65A1F0C2E4B0A1B2C3D4E5F6\n").unwrap();
        assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(DocumentId::parse("   "), Err(DocumentIdError::Empty));
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(
            DocumentId::parse("abc123"),
            Err(DocumentIdError::WrongLength {
                expected: 24,
                actual: 6
            })
        );
    }

    #[test]
    fn test_parse_not_hex() {
        assert_eq!(
            DocumentId::parse("zzzzzzzzzzzzzzzzzzzzzzzz"),
            Err(DocumentIdError::NotHex)
        );
    }

    #[test]
    fn test_from_bytes_display() {
        let id = DocumentId::from_bytes([0; 12]);
        assert_eq!(id.to_string(), "000000000000000000000000");
        assert_eq!(id.to_string().len(), DocumentId::HEX_LENGTH);
    }

    #[test]
    fn test_serde_as_hex_string() {
        let id: DocumentId = "65a1f0c2e4b0a1b2c3d4e5f6".parse().unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"65a1f0c2e4b0a1b2c3d4e5f6\"");

        let back: DocumentId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<DocumentId>("\"nope\"").is_err());
    }
}
