//! Resolved working root and configuration shared by commands.

use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::config::{load_config, RinstallConfig};
use crate::environment::{Environment, ShellRuntime};
use crate::error::Result;
use crate::ledger::FailureLedger;
use crate::outcome::OutcomeLog;
use crate::strategies::StrategyChain;

/// Where a run keeps its files, and the configuration it runs with.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: RinstallConfig,
}

impl Workspace {
    /// Create a workspace from an already loaded configuration.
    pub fn new(root: impl Into<PathBuf>, config: RinstallConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Resolve the workspace for a command line.
    ///
    /// The config is `--config`, else `rinstall.yml` in `--root` (or `cwd`),
    /// else built-in defaults. The working root is `--root`, else the
    /// config's `work_dir`, else `cwd`.
    pub fn resolve(cli: &Cli, cwd: &Path) -> Result<Self> {
        let search_root = cli.root.as_deref().unwrap_or(cwd);
        let config = load_config(cli.config.as_deref(), search_root)?;

        let root = cli
            .root
            .clone()
            .or_else(|| config.work_dir.clone())
            .unwrap_or_else(|| cwd.to_path_buf());
        tracing::debug!("Working root: {}", root.display());

        Ok(Self::new(root, config))
    }

    /// Working root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loaded configuration.
    pub fn config(&self) -> &RinstallConfig {
        &self.config
    }

    /// Environment for a version, laid out per the configuration.
    pub fn environment(&self, version: &str) -> Environment {
        Environment::new(
            version,
            &self.config.runtime.module_name,
            &self.config.layout,
        )
    }

    /// Runtime invoking the configured shell templates.
    pub fn runtime(&self) -> ShellRuntime {
        ShellRuntime::new(self.config.runtime.clone())
    }

    /// Production strategy chain.
    pub fn chain(&self) -> Result<StrategyChain> {
        StrategyChain::standard(&self.config.repositories)
    }

    /// Failure ledger in the working root.
    pub fn ledger(&self) -> FailureLedger {
        FailureLedger::in_root(&self.root)
    }

    /// Dated outcome log in the working root.
    pub fn outcome_log(&self) -> OutcomeLog {
        OutcomeLog::new(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE_NAME;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_to_cwd_and_builtin_config() {
        let temp = TempDir::new().unwrap();

        let ws = Workspace::resolve(&Cli::default(), temp.path()).unwrap();

        assert_eq!(ws.root(), temp.path());
        assert_eq!(ws.config().defaults.new_version, "4.5.0");
    }

    #[test]
    fn root_flag_wins_over_work_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("work");
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(CONFIG_FILE_NAME), "work_dir: /elsewhere\n").unwrap();
        let cli = Cli {
            root: Some(root.clone()),
            ..Cli::default()
        };

        let ws = Workspace::resolve(&cli, temp.path()).unwrap();

        assert_eq!(ws.root(), root);
    }

    #[test]
    fn work_dir_used_without_root_flag() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "work_dir: /group/work/R\n",
        )
        .unwrap();

        let ws = Workspace::resolve(&Cli::default(), temp.path()).unwrap();

        assert_eq!(ws.root(), Path::new("/group/work/R"));
    }

    #[test]
    fn explicit_config_is_required_to_exist() {
        let temp = TempDir::new().unwrap();
        let cli = Cli {
            config: Some(temp.path().join("nope.yml")),
            ..Cli::default()
        };

        assert!(Workspace::resolve(&cli, temp.path()).is_err());
    }

    #[test]
    fn environment_follows_layout() {
        let ws = Workspace::new("/work", RinstallConfig::default());

        let env = ws.environment("4.5.0");

        assert_eq!(env.module(), "R/4.5.0");
        assert_eq!(
            env.library_dir(),
            Path::new("/hpc/apps/R/4.5.0/lib64/R/library")
        );
        assert_eq!(ws.ledger().path(), Path::new("/work/fail.txt"));
    }
}
