use std::fmt;

use chainlog_crypto::{ChainVerifier, Verification};
use chainlog_types::Predecessor;
use tracing::{debug, warn};

use crate::audit::ChainAudit;
use crate::clock::{Clock, SystemClock};
use crate::config::{LedgerConfig, GENESIS_PAYLOAD};
use crate::error::LedgerError;
use crate::record::Record;

/// Append-only, hash-linked sequence of records.
///
/// Index 0 is the genesis record, sealed against a seed string. Every later
/// record is sealed against the stored digest of the record before it.
/// Records are never removed or reordered, and the ledger is never empty.
pub struct Ledger {
    records: Vec<Record>,
    clock: Box<dyn Clock>,
}

impl Ledger {
    /// Ledger seeded with `"0"` on the system clock.
    pub fn new() -> Self {
        Self::with_seed(Predecessor::DEFAULT_SEED)
    }

    /// Ledger with a custom genesis seed on the system clock.
    pub fn with_seed(seed_digest: impl Into<String>) -> Self {
        Self::with_clock(seed_digest, SystemClock)
    }

    /// Ledger with a custom genesis seed and clock.
    pub fn with_clock(seed_digest: impl Into<String>, clock: impl Clock + 'static) -> Self {
        Self::build(seed_digest.into(), GENESIS_PAYLOAD.to_string(), Box::new(clock))
    }

    /// Ledger whose genesis record follows `config`.
    pub fn from_config(config: &LedgerConfig, clock: impl Clock + 'static) -> Self {
        Self::build(
            config.seed_digest.clone(),
            config.genesis_payload.clone(),
            Box::new(clock),
        )
    }

    fn build(seed: String, genesis_payload: String, clock: Box<dyn Clock>) -> Self {
        let genesis = Record::seal(0, clock.now(), genesis_payload, Predecessor::Seed(seed));
        debug!(digest = %genesis.digest().short_hex(), "sealed genesis record");
        Self {
            records: vec![genesis],
            clock,
        }
    }

    /// Seal `payload` against the current tail and append it.
    pub fn append(&mut self, payload: impl Into<String>) -> &Record {
        let tail = self.tail();
        let record = Record::seal(
            tail.sequence_index() + 1,
            self.clock.now(),
            payload,
            Predecessor::Digest(*tail.digest()),
        );
        debug!(
            index = record.sequence_index(),
            digest = %record.digest().short_hex(),
            "appended record"
        );
        self.records.push(record);
        self.tail()
    }

    /// Append a record with an empty payload.
    pub fn append_empty(&mut self) -> &Record {
        self.append(String::new())
    }

    /// Overwrite the payload at `sequence_index` without resealing.
    ///
    /// # Panics
    ///
    /// Panics if `sequence_index` does not name an existing record. Use
    /// [`Ledger::try_tamper`] for a checked variant.
    pub fn tamper(&mut self, sequence_index: u64, new_payload: impl Into<String>) {
        if let Err(e) = self.try_tamper(sequence_index, new_payload) {
            panic!("tamper: {e}");
        }
    }

    /// Checked [`Ledger::tamper`].
    pub fn try_tamper(
        &mut self,
        sequence_index: u64,
        new_payload: impl Into<String>,
    ) -> Result<(), LedgerError> {
        let len = self.records.len();
        let record = usize::try_from(sequence_index)
            .ok()
            .and_then(|i| self.records.get_mut(i))
            .ok_or(LedgerError::IndexOutOfRange {
                index: sequence_index,
                len,
            })?;
        warn!(index = sequence_index, "overwriting record payload without resealing");
        record.set_payload(new_payload);
        Ok(())
    }

    /// Recheck every non-genesis record against its stored digest.
    ///
    /// Returns the first mismatching index. Each record is recomputed against
    /// the stored digest of its predecessor, so a single edit is reported
    /// exactly where it was made.
    pub fn verify(&self) -> Verification {
        ChainVerifier::verify(&self.records)
    }

    /// Full diagnostic scan reporting every violation.
    pub fn audit(&self) -> ChainAudit {
        ChainAudit::of(&self.records)
    }

    /// Record at `sequence_index`, if present.
    pub fn get(&self, sequence_index: u64) -> Option<&Record> {
        usize::try_from(sequence_index)
            .ok()
            .and_then(|i| self.records.get(i))
    }

    pub fn genesis(&self) -> &Record {
        &self.records[0]
    }

    /// The most recently appended record (genesis for a fresh ledger).
    pub fn tail(&self) -> &Record {
        &self.records[self.records.len() - 1]
    }

    /// Number of records including genesis. Always at least 1.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use chainlog_types::Timestamp;
    use chrono::{NaiveDate, TimeDelta};
    use proptest::prelude::*;

    use super::*;
    use crate::clock::{FixedClock, SteppingClock};

    fn start() -> Timestamp {
        Timestamp::from_naive(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    fn ledger() -> Ledger {
        Ledger::with_clock("0", SteppingClock::new(start(), TimeDelta::seconds(1)))
    }

    fn ledger_with(payloads: &[&str]) -> Ledger {
        let mut ledger = ledger();
        for p in payloads {
            ledger.append(*p);
        }
        ledger
    }

    #[test]
    fn fresh_ledger_has_genesis_only() {
        let ledger = ledger();
        assert_eq!(ledger.record_count(), 1);
        let genesis = ledger.genesis();
        assert_eq!(genesis.sequence_index(), 0);
        assert_eq!(genesis.payload(), "Genesis block");
        assert_eq!(genesis.prev_digest(), &Predecessor::Seed("0".into()));
        assert_eq!(ledger.tail(), genesis);
    }

    #[test]
    fn genesis_digest_matches_known_answer() {
        let ledger = Ledger::with_clock("0", FixedClock(start()));
        assert_eq!(
            ledger.genesis().digest().to_hex(),
            "d261870a3f2d225ab7caf519af29f7831fb75f979b4ae805bb15fbe09e9e8937"
        );
    }

    #[test]
    fn fresh_ledger_verifies() {
        assert_eq!(ledger().verify(), Verification::Ok);
        assert_eq!(Ledger::new().verify(), Verification::Ok);
        assert_eq!(Ledger::default().genesis().prev_digest().to_string(), "0");
    }

    #[test]
    fn custom_seed_is_used_for_genesis() {
        let a = Ledger::with_clock("0", FixedClock(start()));
        let b = Ledger::with_clock("seed", FixedClock(start()));
        assert_eq!(b.genesis().prev_digest().to_string(), "seed");
        assert_ne!(a.genesis().digest(), b.genesis().digest());
    }

    #[test]
    fn from_config_sets_genesis() {
        let config = LedgerConfig {
            seed_digest: "abc".into(),
            genesis_payload: "origin".into(),
        };
        let ledger = Ledger::from_config(&config, FixedClock(start()));
        assert_eq!(ledger.genesis().payload(), "origin");
        assert_eq!(ledger.genesis().prev_digest().to_string(), "abc");
        assert!(ledger.verify().is_ok());
    }

    #[test]
    fn append_links_to_tail() {
        let mut ledger = ledger();
        let genesis_digest = *ledger.genesis().digest();

        let first = ledger.append("A").clone();
        assert_eq!(first.sequence_index(), 1);
        assert_eq!(first.prev_digest(), &Predecessor::Digest(genesis_digest));
        assert_eq!(first.created_at().to_string(), "2024-01-01 00:00:01");

        let second = ledger.append("B").clone();
        assert_eq!(second.sequence_index(), 2);
        assert_eq!(second.prev_digest(), &Predecessor::Digest(*first.digest()));
        assert_eq!(ledger.tail(), &second);
    }

    #[test]
    fn append_empty_uses_empty_payload() {
        let mut ledger = ledger();
        assert_eq!(ledger.append_empty().payload(), "");
        assert!(ledger.verify().is_ok());
    }

    #[test]
    fn identical_clock_readings_still_chain() {
        let mut ledger = Ledger::with_clock("0", FixedClock(start()));
        let a = *ledger.append("same").digest();
        let b = *ledger.append("same").digest();
        assert_ne!(a, b);
        assert!(ledger.verify().is_ok());
    }

    #[test]
    fn scenario_tamper_first_appended() {
        let mut ledger = ledger_with(&["A", "B"]);
        assert_eq!(ledger.verify(), Verification::Ok);
        ledger.tamper(1, "X");
        assert_eq!(ledger.verify(), Verification::Compromised(1));
    }

    #[test]
    fn scenario_tamper_second_appended() {
        let mut ledger = ledger_with(&["A", "B"]);
        ledger.tamper(2, "X");
        assert_eq!(ledger.verify(), Verification::Compromised(2));
    }

    #[test]
    fn tampering_genesis_is_not_detected() {
        let mut ledger = ledger_with(&["A"]);
        ledger.tamper(0, "rewritten");
        assert_eq!(ledger.genesis().payload(), "rewritten");
        assert_eq!(ledger.verify(), Verification::Ok);
    }

    #[test]
    fn tamper_is_not_retroactive() {
        let mut ledger = ledger_with(&["A", "B", "C"]);
        let before: Vec<Record> = ledger.records().to_vec();

        ledger.tamper(2, "X");

        let after = ledger.records();
        assert_eq!(after[2].digest(), before[2].digest());
        assert_eq!(after[3].prev_digest(), before[3].prev_digest());
        assert_eq!(after[3], before[3]);
        assert_eq!(after[1], before[1]);
        assert_eq!(ledger.verify(), Verification::Compromised(2));
    }

    #[test]
    fn restoring_payload_restores_integrity() {
        let mut ledger = ledger_with(&["A", "B"]);
        ledger.tamper(1, "X");
        ledger.tamper(1, "A");
        assert!(ledger.verify().is_ok());
    }

    #[test]
    fn verify_does_not_mutate() {
        let mut ledger = ledger_with(&["A", "B"]);
        ledger.tamper(2, "X");
        let before = ledger.records().to_vec();
        let _ = ledger.verify();
        let _ = ledger.verify();
        assert_eq!(ledger.records(), before.as_slice());
    }

    #[test]
    fn try_tamper_out_of_range() {
        let mut ledger = ledger_with(&["A"]);
        let err = ledger.try_tamper(2, "X").unwrap_err();
        assert_eq!(err, LedgerError::IndexOutOfRange { index: 2, len: 2 });
        assert!(ledger.verify().is_ok());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn tamper_out_of_range_panics() {
        let mut ledger = ledger();
        ledger.tamper(5, "X");
    }

    #[test]
    fn get_and_iterate() {
        let ledger = ledger_with(&["A", "B"]);
        assert_eq!(ledger.get(1).map(Record::payload), Some("A"));
        assert!(ledger.get(3).is_none());
        let payloads: Vec<&str> = (&ledger).into_iter().map(Record::payload).collect();
        assert_eq!(payloads, ["Genesis block", "A", "B"]);
    }

    #[test]
    fn twenty_block_demo_chain_verifies() {
        let mut ledger = ledger();
        for _ in 0..20 {
            ledger.append("Hello, I am block :)");
        }
        assert_eq!(ledger.record_count(), 21);
        assert_eq!(ledger.tail().sequence_index(), 20);
        assert!(ledger.verify().is_ok());
    }

    proptest! {
        #[test]
        fn growth_preserves_integrity(payloads in prop::collection::vec(".*", 0..24)) {
            let mut ledger = ledger();
            for p in &payloads {
                ledger.append(p.clone());
            }
            prop_assert_eq!(ledger.record_count(), payloads.len() + 1);
            prop_assert_eq!(ledger.verify(), Verification::Ok);
        }

        #[test]
        fn single_tamper_is_located(
            n in 1usize..16,
            pick in any::<prop::sample::Index>(),
            forged in "[a-z]{1,8}",
        ) {
            let mut ledger = ledger();
            for i in 0..n {
                ledger.append(format!("entry-{i}"));
            }
            let target = (pick.index(n) + 1) as u64;
            ledger.tamper(target, format!("forged-{forged}"));
            prop_assert_eq!(ledger.verify(), Verification::Compromised(target));
        }

        #[test]
        fn earliest_tamper_wins(
            n in 2usize..16,
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let i = (a.index(n) + 1) as u64;
            let j = (b.index(n) + 1) as u64;
            prop_assume!(i != j);

            let mut ledger = ledger();
            for k in 0..n {
                ledger.append(format!("entry-{k}"));
            }
            ledger.tamper(j, "late");
            ledger.tamper(i, "early");
            prop_assert_eq!(ledger.verify(), Verification::Compromised(i.min(j)));
        }
    }
}
