//! Direct install through the environment's standard primitive.

use super::{InstallStrategy, StrategyContext, StrategyKind, StrategyOutcome};
use crate::installer::InstallRequest;

/// `install.packages` from the configured repository.
#[derive(Debug, Clone)]
pub struct DirectInstall {
    repo_url: String,
}

impl DirectInstall {
    /// Create the strategy for a repository URL.
    pub fn new(repo_url: &str) -> Self {
        Self {
            repo_url: repo_url.to_string(),
        }
    }

    fn expression(&self, package: &str) -> String {
        format!(
            r#"install.packages("{}", repos="{}")"#,
            package, self.repo_url
        )
    }
}

impl InstallStrategy for DirectInstall {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Direct
    }

    fn attempt(&self, ctx: &StrategyContext<'_>, request: &InstallRequest) -> StrategyOutcome {
        let package = request.package();
        tracing::info!("Installing {} in {} with install.packages", package, ctx.env);

        let result = ctx.runtime.eval(ctx.env, &self.expression(package));
        ctx.confirm(self.kind(), self.kind().label(), package, result)
    }
}
