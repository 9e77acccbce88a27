//! # Core Ledger Entities
//!
//! Primitive keys shared by every crate in the workspace.
//!
//! ## Clusters
//!
//! - **Accounts**: `Identity`
//! - **Content**: `ContentFingerprint`, `ArticleId`

use crate::errors::AccountParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strip an optional `0x`/`0X` prefix from a hex string.
fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

// =============================================================================
// CLUSTER A: ACCOUNTS
// =============================================================================

/// A 20-byte account identifier.
///
/// Opaque to the registry: only compared for equality and used as a set key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Identity(pub [u8; 20]);

impl Identity {
    /// Length in bytes.
    pub const LEN: usize = 20;

    /// The zero identity (never a valid owner).
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an identity from a 20-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Creates an identity from a slice. Returns None if wrong length.
    #[must_use]
    pub fn from_slice(slice: &[u8]) -> Option<Self> {
        <[u8; 20]>::try_from(slice).ok().map(Self)
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Returns true if this is the zero identity.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Full lowercase hex form with `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "...")?;
        for byte in &self.0[18..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Identity {
    type Err = AccountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(strip_hex_prefix(s.trim()))
            .map_err(|e| AccountParseError::InvalidHex(e.to_string()))?;
        Self::from_slice(&bytes).ok_or(AccountParseError::WrongLength {
            expected: Self::LEN,
            actual: bytes.len(),
        })
    }
}

impl From<[u8; 20]> for Identity {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// =============================================================================
// CLUSTER B: CONTENT
// =============================================================================

/// A 32-byte content fingerprint supplied by the publisher.
///
/// Behaves like a fixed 32-byte word: shorter hex input is right-padded
/// with zeros, longer input is rejected.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct ContentFingerprint(pub [u8; 32]);

impl ContentFingerprint {
    /// Length in bytes.
    pub const LEN: usize = 32;

    /// Creates a fingerprint from a 32-byte array.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Creates a fingerprint from up to 32 bytes, right-padding with zeros.
    ///
    /// Returns None if the slice is longer than 32 bytes.
    #[must_use]
    pub fn from_padded(slice: &[u8]) -> Option<Self> {
        if slice.len() > Self::LEN {
            return None;
        }
        let mut bytes = [0u8; 32];
        bytes[..slice.len()].copy_from_slice(slice);
        Some(Self(bytes))
    }

    /// Returns the underlying bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Full lowercase hex form with `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Display for ContentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0[..8]))
    }
}

impl FromStr for ContentFingerprint {
    type Err = AccountParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(strip_hex_prefix(s.trim()))
            .map_err(|e| AccountParseError::InvalidHex(e.to_string()))?;
        Self::from_padded(&bytes).ok_or(AccountParseError::TooLong {
            max: Self::LEN,
            actual: bytes.len(),
        })
    }
}

impl From<[u8; 32]> for ContentFingerprint {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// Sequential article identifier assigned at publish time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct ArticleId(pub u64);

impl ArticleId {
    /// The first identifier handed out by a fresh ledger.
    pub const FIRST: Self = Self(1);

    /// The identifier following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ArticleId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_parse_with_and_without_prefix() {
        let hex = "0x00112233445566778899aabbccddeeff00112233";
        let a: Identity = hex.parse().unwrap();
        let b: Identity = hex.trim_start_matches("0x").parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex(), hex);
    }

    #[test]
    fn test_identity_rejects_wrong_length() {
        let err = "0x1234".parse::<Identity>().unwrap_err();
        assert_eq!(
            err,
            AccountParseError::WrongLength {
                expected: 20,
                actual: 2
            }
        );
    }

    #[test]
    fn test_identity_rejects_bad_hex() {
        assert!(matches!(
            "0xzz".parse::<Identity>(),
            Err(AccountParseError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_fingerprint_is_right_padded() {
        let fp: ContentFingerprint = "0xAA".parse().unwrap();
        assert_eq!(fp.as_bytes()[0], 0xAA);
        assert!(fp.as_bytes()[1..].iter().all(|b| *b == 0));
    }

    #[test]
    fn test_fingerprint_rejects_more_than_32_bytes() {
        let long = format!("0x{}", "ab".repeat(33));
        assert!(matches!(
            long.parse::<ContentFingerprint>(),
            Err(AccountParseError::TooLong { max: 32, actual: 33 })
        ));
    }

    #[test]
    fn test_identity_display_is_abbreviated() {
        let id = Identity::new([0xAB; 20]);
        assert_eq!(id.to_string(), "0xabababab...abab");
    }

    #[test]
    fn test_article_id_sequence() {
        assert_eq!(ArticleId::FIRST.next(), ArticleId(2));
        assert_eq!(ArticleId(7).to_string(), "#7");
    }
}
