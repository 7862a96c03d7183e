use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// A 256-bit record digest.
///
/// Digests are produced by sealing a record and are compared byte-for-byte
/// during verification. The canonical text form is 64 lowercase hex
/// characters, which is also the form a digest takes when it is fed into the
/// next record's hash input.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Wrap a pre-computed 32-byte hash.
    pub const fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte hash.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        if bytes.len() != 32 {
            return Err(TypeError::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 32]> for Digest {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl From<Digest> for [u8; 32] {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// What a record was sealed against: either the digest of the record before
/// it, or the free-form seed string a ledger's genesis record starts from.
///
/// Both variants render to the exact text that enters the hash input, so a
/// seed of `"0"` and a digest contribute their literal characters.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Predecessor {
    /// Caller-supplied seed for the genesis record.
    Seed(String),
    /// Stored digest of the preceding record.
    Digest(Digest),
}

impl Predecessor {
    /// The default genesis seed.
    pub const DEFAULT_SEED: &'static str = "0";

    /// Returns the linked digest, or `None` for a seed.
    pub fn digest(&self) -> Option<&Digest> {
        match self {
            Self::Digest(d) => Some(d),
            Self::Seed(_) => None,
        }
    }

    /// Returns `true` if this is a genesis seed.
    pub fn is_seed(&self) -> bool {
        matches!(self, Self::Seed(_))
    }
}

impl Default for Predecessor {
    fn default() -> Self {
        Self::Seed(Self::DEFAULT_SEED.to_string())
    }
}

impl From<Digest> for Predecessor {
    fn from(digest: Digest) -> Self {
        Self::Digest(digest)
    }
}

impl fmt::Debug for Predecessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seed(s) => write!(f, "Seed({s:?})"),
            Self::Digest(d) => write!(f, "{d:?}"),
        }
    }
}

impl fmt::Display for Predecessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seed(s) => f.write_str(s),
            Self::Digest(d) => fmt::Display::fmt(d, f),
        }
    }
}

impl Serialize for Predecessor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let digest = Digest::from_hash([0xab; 32]);
        let parsed = Digest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(digest, parsed);
    }

    #[test]
    fn hex_is_lowercase_and_64_chars() {
        let digest = Digest::from_hash([0xAB; 32]);
        let hex = digest.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(hex, hex.to_lowercase());
    }

    #[test]
    fn short_hex_is_8_chars() {
        let digest = Digest::from_hash([7; 32]);
        assert_eq!(digest.short_hex(), "07070707");
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let err = Digest::from_hex("abcd").unwrap_err();
        assert_eq!(
            err,
            TypeError::InvalidLength {
                expected: 32,
                actual: 2
            }
        );
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(matches!(
            Digest::from_hex("not hex at all"),
            Err(TypeError::InvalidHex(_))
        ));
    }

    #[test]
    fn serializes_as_hex_string() {
        let digest = Digest::from_hash([1; 32]);
        let json = serde_json::to_string(&digest).unwrap();
        assert_eq!(json, format!("\"{}\"", digest.to_hex()));
        let parsed: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn default_predecessor_is_zero_seed() {
        let pred = Predecessor::default();
        assert!(pred.is_seed());
        assert_eq!(pred.to_string(), "0");
        assert!(pred.digest().is_none());
    }

    #[test]
    fn digest_predecessor_renders_as_hex() {
        let digest = Digest::from_hash([2; 32]);
        let pred = Predecessor::from(digest);
        assert_eq!(pred.to_string(), digest.to_hex());
        assert_eq!(pred.digest(), Some(&digest));
    }

    #[test]
    fn seed_and_digest_with_same_text_render_identically() {
        let digest = Digest::from_hash([3; 32]);
        let seed = Predecessor::Seed(digest.to_hex());
        assert_eq!(seed.to_string(), Predecessor::Digest(digest).to_string());
    }
}
