//! Specialized bundle install through `pak`.

use super::{InstallStrategy, StrategyContext, StrategyKind, StrategyOutcome};
use crate::installer::InstallRequest;

/// `pak::pkg_install` for names matching the specialized pattern.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecializedInstall;

impl InstallStrategy for SpecializedInstall {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Specialized
    }

    fn attempt(&self, ctx: &StrategyContext<'_>, request: &InstallRequest) -> StrategyOutcome {
        let package = request.package();
        tracing::info!("Installing {} in {} with pak", package, ctx.env);

        let expr = format!(r#"pak::pkg_install("{}")"#, package);
        let result = ctx.runtime.eval(ctx.env, &expr);
        ctx.confirm(self.kind(), self.kind().label(), package, result)
    }
}
