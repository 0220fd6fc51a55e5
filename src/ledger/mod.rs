//! Durable memory of packages whose installation failed.
//!
//! The ledger lets a migration skip packages that already exhausted every
//! strategy in an earlier run. Entries are never expired; clearing the file
//! is how an operator forgets them.

mod store;

pub use store::{FailureLedger, LEDGER_FILE_NAME};
