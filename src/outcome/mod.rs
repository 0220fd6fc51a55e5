//! Date-partitioned audit trail of install attempts.

mod log;

pub use log::{single_line, OutcomeLog, DATE_FORMAT};
