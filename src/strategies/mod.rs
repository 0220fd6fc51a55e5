//! Installation strategies.
//!
//! A strategy is one way of getting a package into an environment. Each one
//! runs an external action and then re-probes the environment, because an
//! installer exiting 0 does not prove the package loads.
//!
//! Strategies are grouped into [`Route`]s. A request follows exactly one
//! route: repository-hosted packages and specialized bundles each have a
//! single dedicated strategy, ordinary packages fall back through direct
//! install, source archive and managed repository in that order. Routes are
//! plain lists, so changing the order is a data change in
//! [`StrategyChain::standard`].
//!
//! # Modules
//!
//! - [`direct`] - `install.packages` from the configured repository
//! - [`archive`] - download and build the latest source archive
//! - [`managed`] - `BiocManager::install`
//! - [`vcs`] - `install_github` through a list of installer tools
//! - [`specialized`] - `pak::pkg_install` for specialized bundles

pub mod archive;
pub mod direct;
pub mod managed;
pub mod specialized;
pub mod vcs;

pub use archive::{latest_archive, SourceArchiveInstall};
pub use direct::DirectInstall;
pub use managed::ManagedRepositoryInstall;
pub use specialized::SpecializedInstall;
pub use vcs::VersionControlInstall;

use std::fmt;

use regex::Regex;

use crate::config::RepositoryConfig;
use crate::environment::{Environment, PackageProbe, Runtime};
use crate::error::{InstallError, Result};
use crate::installer::InstallRequest;
use crate::shell::CommandResult;

/// The kinds of strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Install from a version-control repository.
    VersionControl,
    /// Install a specialized bundle with its dedicated tool.
    Specialized,
    /// The environment's standard install primitive.
    Direct,
    /// Download and build the latest source archive.
    SourceArchive,
    /// Dependency-aware managed repository.
    ManagedRepository,
}

impl StrategyKind {
    /// Human-readable name used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::VersionControl => "version control",
            Self::Specialized => "specialized installer",
            Self::Direct => "direct install",
            Self::SourceArchive => "source archive",
            Self::ManagedRepository => "managed repository",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one strategy attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyOutcome {
    /// Strategy that produced this outcome.
    pub kind: StrategyKind,
    /// Whether the package is now installed.
    pub success: bool,
    /// Confirmation or diagnostic; never empty.
    pub message: String,
}

impl StrategyOutcome {
    /// Successful attempt.
    pub fn installed(kind: StrategyKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            success: true,
            message: message.into(),
        }
    }

    /// Failed attempt.
    pub fn failed(kind: StrategyKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            success: false,
            message: message.into(),
        }
    }
}

/// Everything a strategy needs to act on one environment.
pub struct StrategyContext<'a> {
    /// Target environment.
    pub env: &'a Environment,
    /// Runtime used for external actions.
    pub runtime: &'a dyn Runtime,
    /// Probe used to confirm an install took effect.
    pub probe: &'a dyn PackageProbe,
}

impl StrategyContext<'_> {
    /// Turn the result of an install command into an outcome.
    ///
    /// Success needs both a zero exit and a positive probe. `via` names the
    /// mechanism in messages (e.g. `version control (devtools)`).
    pub fn confirm(
        &self,
        kind: StrategyKind,
        via: &str,
        package: &str,
        result: Result<CommandResult>,
    ) -> StrategyOutcome {
        let result = match result {
            Ok(result) => result,
            Err(e) => {
                return StrategyOutcome::failed(
                    kind,
                    format!("Installation using {} could not run: {}", via, e),
                )
            }
        };

        if result.success && self.probe.is_installed(self.env, package) {
            return StrategyOutcome::installed(
                kind,
                format!("Successfully installed in {} with {}", self.env, via),
            );
        }

        StrategyOutcome::failed(kind, failure_message(via, package, self.env, &result))
    }
}

/// Diagnostic for a command that ran but did not leave the package usable.
pub fn failure_message(
    via: &str,
    package: &str,
    env: &Environment,
    result: &CommandResult,
) -> String {
    match (result.success, result.diagnostic()) {
        (true, Some(output)) => format!(
            "Installation using {} finished but {} does not load in {}: {}",
            via, package, env, output
        ),
        (true, None) => format!(
            "Installation using {} finished but {} does not load in {}",
            via, package, env
        ),
        (false, Some(output)) => {
            format!("Installation using {} failed with error: {}", via, output)
        }
        (false, None) => format!(
            "Installation using {} failed with return code {} (no output captured)",
            via,
            result.code_label()
        ),
    }
}

/// One mechanism for installing a package.
pub trait InstallStrategy {
    /// Which kind of strategy this is.
    fn kind(&self) -> StrategyKind;

    /// Try to install the requested package. Never fails: problems are
    /// reported through the outcome's message.
    fn attempt(&self, ctx: &StrategyContext<'_>, request: &InstallRequest) -> StrategyOutcome;
}

/// The path a request takes through the strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A repository locator was supplied.
    Repository,
    /// The package name matches the specialized pattern.
    Specialized,
    /// Everything else.
    Ordinary,
}

/// Strategies grouped by route.
pub struct StrategyChain {
    specialized_pattern: Regex,
    repository: Vec<Box<dyn InstallStrategy>>,
    specialized: Vec<Box<dyn InstallStrategy>>,
    ordinary: Vec<Box<dyn InstallStrategy>>,
}

impl StrategyChain {
    /// Create an empty chain with the given specialized-name pattern.
    pub fn new(specialized_pattern: Regex) -> Self {
        Self {
            specialized_pattern,
            repository: Vec::new(),
            specialized: Vec::new(),
            ordinary: Vec::new(),
        }
    }

    /// The production chain.
    pub fn standard(repositories: &RepositoryConfig) -> Result<Self> {
        let pattern = Regex::new(&repositories.specialized_pattern).map_err(|e| {
            InstallError::ConfigValidationError {
                message: format!("invalid specialized pattern: {}", e),
            }
        })?;

        Ok(Self::new(pattern)
            .with_route(
                Route::Repository,
                vec![Box::new(VersionControlInstall::new(
                    repositories.vcs_tools.clone(),
                ))],
            )
            .with_route(Route::Specialized, vec![Box::new(SpecializedInstall)])
            .with_route(
                Route::Ordinary,
                vec![
                    Box::new(DirectInstall::new(&repositories.source)),
                    Box::new(SourceArchiveInstall::new(&repositories.source)),
                    Box::new(ManagedRepositoryInstall),
                ],
            ))
    }

    /// Replace the strategies of one route.
    pub fn with_route(mut self, route: Route, strategies: Vec<Box<dyn InstallStrategy>>) -> Self {
        match route {
            Route::Repository => self.repository = strategies,
            Route::Specialized => self.specialized = strategies,
            Route::Ordinary => self.ordinary = strategies,
        }
        self
    }

    /// Route a request takes. A repository locator wins over the name.
    pub fn route_for(&self, request: &InstallRequest) -> Route {
        if request.repo().is_some() {
            Route::Repository
        } else if self.specialized_pattern.is_match(request.package()) {
            Route::Specialized
        } else {
            Route::Ordinary
        }
    }

    /// Strategies of a route, in the order they are tried.
    pub fn strategies(&self, route: Route) -> &[Box<dyn InstallStrategy>] {
        match route {
            Route::Repository => &self.repository,
            Route::Specialized => &self.specialized,
            Route::Ordinary => &self.ordinary,
        }
    }
}
