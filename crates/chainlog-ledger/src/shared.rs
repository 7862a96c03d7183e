use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chainlog_crypto::Verification;

use crate::audit::ChainAudit;
use crate::error::LedgerError;
use crate::ledger::Ledger;
use crate::record::Record;

/// Cloneable handle to a ledger shared across threads.
///
/// Appends and tampering take the write lock; verification and reads take the
/// read lock, so a verification pass always sees a whole, consistent chain.
#[derive(Clone, Debug)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledger>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }

    /// Append a record, returning a copy of it.
    pub fn append(&self, payload: impl Into<String>) -> Result<Record, LedgerError> {
        let mut ledger = self.write()?;
        Ok(ledger.append(payload).clone())
    }

    pub fn tamper(
        &self,
        sequence_index: u64,
        new_payload: impl Into<String>,
    ) -> Result<(), LedgerError> {
        self.write()?.try_tamper(sequence_index, new_payload)
    }

    pub fn verify(&self) -> Result<Verification, LedgerError> {
        Ok(self.read()?.verify())
    }

    pub fn audit(&self) -> Result<ChainAudit, LedgerError> {
        Ok(self.read()?.audit())
    }

    pub fn record_count(&self) -> Result<usize, LedgerError> {
        Ok(self.read()?.record_count())
    }

    /// Copy of every record, taken under a single read lock.
    pub fn snapshot(&self) -> Result<Vec<Record>, LedgerError> {
        Ok(self.read()?.records().to_vec())
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}
