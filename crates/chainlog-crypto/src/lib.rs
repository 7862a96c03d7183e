//! Cryptographic primitives for Chainlog.
//!
//! Provides SHA-256 record hashing over the canonical field text and a
//! first-fault hash chain verifier.
//!
//! All crypto operations wrap established libraries. No custom cryptography.

pub mod chain;
pub mod hasher;

pub use chain::{ChainVerifier, Sealed, Verification};
pub use hasher::RecordHasher;
