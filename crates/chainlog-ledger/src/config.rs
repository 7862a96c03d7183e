use std::path::Path;

use chainlog_types::Predecessor;
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Payload of every genesis record unless configured otherwise.
pub const GENESIS_PAYLOAD: &str = "Genesis block";

/// Settings for a new ledger's genesis record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Text the genesis record is sealed against.
    pub seed_digest: String,
    pub genesis_payload: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            seed_digest: Predecessor::DEFAULT_SEED.to_string(),
            genesis_payload: GENESIS_PAYLOAD.to_string(),
        }
    }
}

impl LedgerConfig {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, LedgerError> {
        toml::from_str(s).map_err(|e| LedgerError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| LedgerError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Override the seed.
    pub fn with_seed(mut self, seed_digest: impl Into<String>) -> Self {
        self.seed_digest = seed_digest.into();
        self
    }
}
