//! Version-control hosted install.

use super::{InstallStrategy, StrategyContext, StrategyKind, StrategyOutcome};
use crate::installer::InstallRequest;

/// `install_github` through each configured installer tool in turn.
///
/// The first tool that exits 0 and leaves the package loadable wins; when
/// every tool fails their diagnostics are combined into one message.
#[derive(Debug, Clone)]
pub struct VersionControlInstall {
    tools: Vec<String>,
}

impl VersionControlInstall {
    /// Create the strategy with installer tools in priority order.
    pub fn new(tools: Vec<String>) -> Self {
        Self { tools }
    }
}

impl InstallStrategy for VersionControlInstall {
    fn kind(&self) -> StrategyKind {
        StrategyKind::VersionControl
    }

    fn attempt(&self, ctx: &StrategyContext<'_>, request: &InstallRequest) -> StrategyOutcome {
        let package = request.package();
        let Some(repo) = request.repo() else {
            return StrategyOutcome::failed(
                self.kind(),
                format!("No repository given for {}", package),
            );
        };

        let mut errors = Vec::new();
        for tool in &self.tools {
            tracing::info!(
                "Installing {} in {} from {} with {}",
                package,
                ctx.env,
                repo,
                tool
            );
            let via = format!("{} ({})", self.kind().label(), tool);
            let expr = format!(r#"{}::install_github("{}")"#, tool, repo);

            let outcome = ctx.confirm(self.kind(), &via, package, ctx.runtime.eval(ctx.env, &expr));
            if outcome.success {
                return outcome;
            }
            tracing::debug!("{}", outcome.message);
            errors.push(outcome.message);
        }

        if errors.is_empty() {
            return StrategyOutcome::failed(
                self.kind(),
                format!(
                    "Installation using {} failed: no installer tools configured",
                    self.kind().label()
                ),
            );
        }

        StrategyOutcome::failed(self.kind(), errors.join("; "))
    }
}
