use std::fmt;

use chainlog_types::{Digest, Predecessor};
use tracing::warn;

/// Trait for records that participate in a hash chain.
pub trait Sealed {
    /// The digest stored when the record was sealed.
    fn stored_digest(&self) -> Digest;
    /// Recompute the digest from the record's current fields, sealed against
    /// the given predecessor.
    fn recompute_digest(&self, prev: &Predecessor) -> Digest;
}

/// Outcome of a chain verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verification {
    /// Every record's stored digest matches its recomputation.
    Ok,
    /// The earliest sequence index whose recomputed digest disagrees with the
    /// stored one.
    Compromised(u64),
}

impl Verification {
    /// Returns `true` if no mismatch was found.
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// The compromised sequence index, if any.
    pub fn compromised_at(&self) -> Option<u64> {
        match self {
            Self::Ok => None,
            Self::Compromised(index) => Some(*index),
        }
    }
}

impl fmt::Display for Verification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => f.write_str("ok"),
            Self::Compromised(index) => write!(f, "compromised at #{index}"),
        }
    }
}

/// First-fault hash chain verifier.
///
/// The first record is the root of trust and is never checked. Every later
/// record is recomputed from its own current fields, sealed against the
/// *stored* digest of the record before it, and compared with its own stored
/// digest. Predecessors are never recomputed, so an edit to one record is
/// reported at that record and nowhere else.
pub struct ChainVerifier;

impl ChainVerifier {
    /// Verify a chain of sealed records, stopping at the first mismatch.
    pub fn verify(records: &[impl Sealed]) -> Verification {
        for (index, pair) in records.windows(2).enumerate() {
            let prev = Predecessor::Digest(pair[0].stored_digest());
            let stored = pair[1].stored_digest();
            let computed = pair[1].recompute_digest(&prev);
            if computed != stored {
                let at = (index + 1) as u64;
                warn!(
                    index = at,
                    stored = %stored.short_hex(),
                    computed = %computed.short_hex(),
                    "digest mismatch"
                );
                return Verification::Compromised(at);
            }
        }
        Verification::Ok
    }
}
