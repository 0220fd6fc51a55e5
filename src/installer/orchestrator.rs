//! Single-package installation.
//!
//! For one request the orchestrator:
//!
//! 1. Probes the environment; an installed package short-circuits.
//! 2. Consults the failure ledger when the request opts in; a listed
//!    package short-circuits.
//! 3. Picks the request's route and runs its strategies in order until one
//!    succeeds.
//! 4. On exhaustion, records the package in the ledger.
//!
//! Short-circuit outcomes carry an empty message; every other outcome has
//! one.

use crate::environment::{Environment, PackageProbe, Runtime};
use crate::ledger::FailureLedger;
use crate::strategies::{StrategyChain, StrategyContext, StrategyKind, StrategyOutcome};
use crate::ui::UserInterface;

use super::InstallRequest;

/// Where an install request ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallState {
    /// The package was already usable; nothing ran.
    AlreadyInstalled,
    /// The ledger lists the package; nothing ran.
    KnownFailed,
    /// A strategy installed the package.
    Installed(StrategyKind),
    /// Every strategy on the route failed.
    Exhausted,
}

/// Result of one install request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Whether the package is usable afterwards.
    pub success: bool,
    /// Winning confirmation, joined diagnostics, or empty on short-circuit.
    pub message: String,
    /// Final state.
    pub state: InstallState,
    /// Strategy attempts in the order they ran.
    pub attempts: Vec<StrategyOutcome>,
}

impl InstallOutcome {
    /// Outcome for a package that was already present.
    pub fn already_installed() -> Self {
        Self {
            success: true,
            message: String::new(),
            state: InstallState::AlreadyInstalled,
            attempts: Vec::new(),
        }
    }

    /// Outcome for a package skipped because of the ledger.
    pub fn known_failed() -> Self {
        Self {
            success: false,
            message: String::new(),
            state: InstallState::KnownFailed,
            attempts: Vec::new(),
        }
    }
}

/// Drives install requests against one set of collaborators.
pub struct InstallOrchestrator<'a> {
    runtime: &'a dyn Runtime,
    probe: &'a dyn PackageProbe,
    ledger: FailureLedger,
    chain: StrategyChain,
}

impl<'a> InstallOrchestrator<'a> {
    /// Create an orchestrator.
    pub fn new(
        runtime: &'a dyn Runtime,
        probe: &'a dyn PackageProbe,
        ledger: FailureLedger,
        chain: StrategyChain,
    ) -> Self {
        Self {
            runtime,
            probe,
            ledger,
            chain,
        }
    }

    /// Ledger consulted and written by this orchestrator.
    pub fn ledger(&self) -> &FailureLedger {
        &self.ledger
    }

    /// Ensure a package is installed in `env`.
    ///
    /// Never fails: strategy problems end up in the outcome's message and a
    /// ledger write error is logged.
    pub fn install_package(
        &self,
        env: &Environment,
        request: &InstallRequest,
        ui: &mut dyn UserInterface,
    ) -> InstallOutcome {
        let package = request.package();

        if self.probe.is_installed(env, package) {
            tracing::info!("{} is already installed in {}", package, env);
            if ui.output_mode().shows_detail() {
                ui.message(&format!("{} already installed in {}", package, env));
            }
            return InstallOutcome::already_installed();
        }

        if request.check_past_fail() && self.ledger.had_failed(package) {
            tracing::info!(
                "{} failed before, skipping (see {})",
                package,
                self.ledger.path().display()
            );
            ui.start_spinner(&format!("Installing {}", package))
                .finish_skipped(&format!("{} skipped, failed in a previous run", package));
            return InstallOutcome::known_failed();
        }

        let route = self.chain.route_for(request);
        tracing::debug!("Routing {} via {:?}", package, route);

        let ctx = StrategyContext {
            env,
            runtime: self.runtime,
            probe: self.probe,
        };

        let mut attempts = Vec::new();
        for strategy in self.chain.strategies(route) {
            let mut spinner =
                ui.start_spinner(&format!("Installing {} ({})", package, strategy.kind()));
            let outcome = strategy.attempt(&ctx, request);

            if outcome.success {
                spinner.finish_success(&format!("{}: {}", package, outcome.message));
                let message = outcome.message.clone();
                let kind = outcome.kind;
                attempts.push(outcome);
                return InstallOutcome {
                    success: true,
                    message,
                    state: InstallState::Installed(kind),
                    attempts,
                };
            }

            spinner.finish_error(&format!("{} ({}) failed", package, outcome.kind));
            tracing::debug!("{}", outcome.message);
            attempts.push(outcome);
        }

        let message = if attempts.is_empty() {
            format!("No installation strategy available for {}", package)
        } else {
            attempts
                .iter()
                .map(|a| a.message.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        };

        tracing::warn!("Could not install {} in {}", package, env);
        if let Err(e) = self.ledger.record(package, &message) {
            tracing::warn!(
                "Could not record {} in {}: {:#}",
                package,
                self.ledger.path().display(),
                e
            );
        }

        InstallOutcome {
            success: false,
            message,
            state: InstallState::Exhausted,
            attempts,
        }
    }
}
