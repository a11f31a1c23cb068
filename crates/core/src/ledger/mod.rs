//! Installed-skill ledger.

pub mod manager;
pub mod types;

pub use manager::{Ledger, LedgerError};
pub use types::{LedgerEntry, LedgerState};
