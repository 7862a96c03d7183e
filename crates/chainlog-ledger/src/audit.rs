use chainlog_types::Predecessor;
use serde::Serialize;

use crate::record::Record;

/// Result of a full chain audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainAudit {
    pub record_count: u64,
    pub violations: Vec<Violation>,
}

/// A specific integrity violation detected during an audit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub index: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Stored sequence index differs from the record's position.
    SequenceGap,
    /// Stored predecessor differs from the previous record's stored digest,
    /// or a genesis record is not sealed against a seed.
    BrokenLink,
    /// Recomputed digest differs from the stored digest.
    DigestMismatch,
}

impl ChainAudit {
    /// Audit a record sequence, collecting every violation instead of
    /// stopping at the first.
    ///
    /// The digest check is the same one [`crate::Ledger::verify`] performs;
    /// the link and sequence checks only fire for record slices assembled
    /// outside a ledger.
    pub fn of(records: &[Record]) -> Self {
        let mut violations = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let position = index as u64;
            if record.sequence_index() != position {
                violations.push(Violation {
                    index: position,
                    kind: ViolationKind::SequenceGap,
                    description: format!(
                        "expected sequence index {position}, found {}",
                        record.sequence_index()
                    ),
                });
            }

            if index == 0 {
                if !record.prev_digest().is_seed() {
                    violations.push(Violation {
                        index: position,
                        kind: ViolationKind::BrokenLink,
                        description: "genesis record is linked to a digest, not a seed".into(),
                    });
                }
                continue;
            }

            let expected_prev = Predecessor::Digest(*records[index - 1].digest());
            if record.prev_digest() != &expected_prev {
                violations.push(Violation {
                    index: position,
                    kind: ViolationKind::BrokenLink,
                    description: "previous digest link mismatch".into(),
                });
            }

            if record.recompute_digest(&expected_prev) != *record.digest() {
                violations.push(Violation {
                    index: position,
                    kind: ViolationKind::DigestMismatch,
                    description: "stored digest does not match recomputed digest".into(),
                });
            }
        }

        Self {
            record_count: records.len() as u64,
            violations,
        }
    }

    /// Returns `true` if no violations were found.
    pub fn is_intact(&self) -> bool {
        self.violations.is_empty()
    }

    /// Earliest index with a digest mismatch.
    pub fn first_compromised(&self) -> Option<u64> {
        self.of_kind(ViolationKind::DigestMismatch)
            .map(|v| v.index)
            .next()
    }

    /// Violations of one kind, in index order.
    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> + '_ {
        self.violations.iter().filter(move |v| v.kind == kind)
    }
}
