//! Foundation types for Chainlog.
//!
//! Every other Chainlog crate depends on `chainlog-types`.
//!
//! # Key Types
//!
//! - [`Digest`]: 256-bit record digest with a lowercase-hex text form
//! - [`Predecessor`]: what a record was sealed against (seed or prior digest)
//! - [`Timestamp`]: microsecond-precision record creation time

pub mod digest;
pub mod error;
pub mod temporal;

pub use digest::{Digest, Predecessor};
pub use error::TypeError;
pub use temporal::Timestamp;
