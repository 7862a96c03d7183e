//! Human-readable rendering. Presentation only: nothing here feeds back into
//! sealing or verification.

use std::fmt;

use crate::ledger::Ledger;
use crate::record::Record;

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Block #{}:", self.sequence_index())?;
        writeln!(f, "    Data:      {}", self.payload())?;
        writeln!(f, "    Timestamp: {}", self.created_at())?;
        write!(f, "    Hash:      {}", self.digest())
    }
}

/// Records separated by a blank line, ending with a single newline.
impl fmt::Display for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, record) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{record}")?;
        }
        Ok(())
    }
}
