//! Package installation.
//!
//! - [`request`] - what to install and whether the failure ledger applies
//! - [`orchestrator`] - probe, ledger gate, then the strategy route
//! - [`migration`] - reconcile an old environment's packages into a new one

pub mod migration;
pub mod orchestrator;
pub mod request;

pub use migration::{Migration, MigrationReport, DIFF_FILE_NAME};
pub use orchestrator::{InstallOrchestrator, InstallOutcome, InstallState};
pub use request::InstallRequest;

use crate::outcome::OutcomeLog;

/// Append an outcome to the dated log as `<package>: <message>`.
///
/// The message is flattened to a single line. Short-circuit outcomes carry no message and are not logged. Write errors
/// are reported as warnings.
pub fn log_outcome(log: &OutcomeLog, package: &str, outcome: &InstallOutcome) {
    if outcome.message.is_empty() {
        return;
    }

    let line = format!("{}: {}", package, outcome.message);
    if let Err(e) = log.record(outcome.success, &line) {
        tracing::warn!("Could not write outcome for {}: {:#}", package, e);
    }
}
