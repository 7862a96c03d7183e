//! Append-only, hash-linked record ledger for Chainlog.
//!
//! This crate provides:
//! - [`Record`], sealed once with a SHA-256 digest over its fields
//! - [`Ledger`], the single-writer chain with append, tamper, and verify
//! - [`Clock`] implementations for injecting creation times
//! - [`ChainAudit`] for a full, non-short-circuiting integrity report
//! - [`SharedLedger`] for lock-guarded use across threads
//! - [`LedgerConfig`] for TOML-configured genesis records

pub mod audit;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod record;
mod render;
pub mod shared;

pub use audit::{ChainAudit, Violation, ViolationKind};
pub use chainlog_crypto::Verification;
pub use clock::{Clock, FixedClock, SteppingClock, SystemClock};
pub use config::{LedgerConfig, GENESIS_PAYLOAD};
pub use error::LedgerError;
pub use ledger::Ledger;
pub use record::Record;
pub use shared::SharedLedger;
