/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("sequence index {index} out of range: ledger holds {len} records")]
    IndexOutOfRange { index: u64, len: usize },

    #[error("ledger lock poisoned")]
    LockPoisoned,

    #[error("invalid ledger config: {0}")]
    Config(String),
}
