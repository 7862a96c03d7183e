use chainlog_types::{Digest, Predecessor, Timestamp};
use sha2::{Digest as _, Sha256};

/// SHA-256 record hasher.
///
/// A record's hash input is the plain concatenation of the text form of its
/// four sealed fields, in order: sequence index (decimal), creation time,
/// payload, predecessor. There are no separators, length prefixes, or domain
/// tags. Changing any of that changes every digest, so existing chains would
/// stop verifying.
pub struct RecordHasher;

impl RecordHasher {
    /// The exact text that is hashed for a record.
    pub fn canonical_input(
        sequence_index: u64,
        created_at: &Timestamp,
        payload: &str,
        prev_digest: &Predecessor,
    ) -> String {
        format!("{sequence_index}{created_at}{payload}{prev_digest}")
    }

    /// Digest of a record's fields.
    pub fn digest(
        sequence_index: u64,
        created_at: &Timestamp,
        payload: &str,
        prev_digest: &Predecessor,
    ) -> Digest {
        let input = Self::canonical_input(sequence_index, created_at, payload, prev_digest);
        Self::raw_hash(input.as_bytes())
    }

    /// Plain SHA-256 of arbitrary bytes.
    pub fn raw_hash(data: &[u8]) -> Digest {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Digest::from_hash(hasher.finalize().into())
    }
}
