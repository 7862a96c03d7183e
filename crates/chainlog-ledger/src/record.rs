use chainlog_crypto::{RecordHasher, Sealed};
use chainlog_types::{Digest, Predecessor, Timestamp};
use serde::Serialize;

/// A sealed ledger entry.
///
/// The digest is computed once, inside [`Record::seal`], from the sequence
/// index, creation time, payload, and predecessor. Those fields and the digest
/// are read-only afterwards. The payload alone can be replaced through
/// [`Record::set_payload`], which leaves the stored digest untouched so that
/// verification can tell the difference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Record {
    sequence_index: u64,
    created_at: Timestamp,
    payload: String,
    prev_digest: Predecessor,
    digest: Digest,
}

impl Record {
    /// Build a record and seal it against `prev_digest`.
    pub fn seal(
        sequence_index: u64,
        created_at: Timestamp,
        payload: impl Into<String>,
        prev_digest: Predecessor,
    ) -> Self {
        let payload = payload.into();
        let digest = RecordHasher::digest(sequence_index, &created_at, &payload, &prev_digest);
        Self {
            sequence_index,
            created_at,
            payload,
            prev_digest,
            digest,
        }
    }

    pub fn sequence_index(&self) -> u64 {
        self.sequence_index
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// What this record was sealed against.
    pub fn prev_digest(&self) -> &Predecessor {
        &self.prev_digest
    }

    /// The digest computed at sealing time.
    pub fn digest(&self) -> &Digest {
        &self.digest
    }

    /// Returns `true` if this record was sealed against a seed rather than a
    /// prior record.
    pub fn is_genesis(&self) -> bool {
        self.prev_digest.is_seed()
    }

    /// Replace the payload without resealing.
    pub fn set_payload(&mut self, new_payload: impl Into<String>) {
        self.payload = new_payload.into();
    }

    /// Digest of the current field values sealed against `prev`.
    pub fn recompute_digest(&self, prev: &Predecessor) -> Digest {
        RecordHasher::digest(self.sequence_index, &self.created_at, &self.payload, prev)
    }
}

impl Sealed for Record {
    fn stored_digest(&self) -> Digest {
        self.digest
    }

    fn recompute_digest(&self, prev: &Predecessor) -> Digest {
        Record::recompute_digest(self, prev)
    }
}
