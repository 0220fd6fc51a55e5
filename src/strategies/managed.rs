//! Managed repository install (Bioconductor).

use super::{InstallStrategy, StrategyContext, StrategyKind, StrategyOutcome};
use crate::installer::InstallRequest;

/// `BiocManager::install`, the last resort for ordinary packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManagedRepositoryInstall;

impl InstallStrategy for ManagedRepositoryInstall {
    fn kind(&self) -> StrategyKind {
        StrategyKind::ManagedRepository
    }

    fn attempt(&self, ctx: &StrategyContext<'_>, request: &InstallRequest) -> StrategyOutcome {
        let package = request.package();
        tracing::info!("Installing {} in {} with BiocManager", package, ctx.env);

        let expr = format!(r#"BiocManager::install(c("{}"))"#, package);
        let result = ctx.runtime.eval(ctx.env, &expr);
        ctx.confirm(self.kind(), self.kind().label(), package, result)
    }
}
