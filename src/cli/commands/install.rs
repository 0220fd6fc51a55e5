//! Install command implementation.
//!
//! `rinstall --install PACKAGE` installs one package into the new
//! environment. The failure ledger is bypassed, so a package that failed
//! before is tried again.

use crate::environment::RuntimeProbe;
use crate::error::Result;
use crate::installer::{log_outcome, InstallOrchestrator, InstallRequest};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::workspace::Workspace;

/// The install command implementation.
pub struct InstallCommand<'a> {
    workspace: &'a Workspace,
    version: String,
    package: String,
    repo: Option<String>,
}

impl<'a> InstallCommand<'a> {
    /// Create a new install command.
    pub fn new(workspace: &'a Workspace, version: &str, package: &str, repo: Option<String>) -> Self {
        Self {
            workspace,
            version: version.to_string(),
            package: package.to_string(),
            repo,
        }
    }

    /// The request this command makes.
    pub fn request(&self) -> InstallRequest {
        let request = InstallRequest::new(self.package.as_str()).bypass_ledger();
        match &self.repo {
            Some(repo) => request.with_repo(repo.as_str()),
            None => request,
        }
    }
}

impl Command for InstallCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ws = self.workspace;
        let env = ws.environment(&self.version);

        let runtime = ws.runtime();
        let probe = RuntimeProbe::new(&runtime);
        let orchestrator = InstallOrchestrator::new(&runtime, &probe, ws.ledger(), ws.chain()?);

        let outcome = orchestrator.install_package(&env, &self.request(), ui);
        log_outcome(&ws.outcome_log(), &self.package, &outcome);

        if !outcome.success {
            ui.error(&format!(
                "Could not install {} in {}: {}",
                self.package, env, outcome.message
            ));
            return Ok(CommandResult::failure(1));
        }

        if outcome.message.is_empty() {
            ui.success(&format!("{} is already installed in {}", self.package, env));
        } else {
            ui.success(&format!("{}: {}", self.package, outcome.message));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RinstallConfig;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    /// Workspace whose runtime is plain `sh`; every R call exits `code`.
    fn sh_workspace(temp: &TempDir, code: i32) -> Workspace {
        let mut config = RinstallConfig::default();
        config.layout.apps_root = temp.path().join("apps");
        config.layout.builds_root = temp.path().join("builds");
        config.runtime.shell = "sh".to_string();
        config.runtime.shell_args = vec!["-c".to_string()];
        config.runtime.load = "true".to_string();
        config.runtime.eval = format!("echo {{expr}} >/dev/null; exit {}", code);
        config.runtime.install_archive = "echo {archive} >/dev/null; exit 1".to_string();
        Workspace::new(temp.path().join("work"), config)
    }

    #[test]
    fn request_bypasses_ledger() {
        let temp = TempDir::new().unwrap();
        let ws = sh_workspace(&temp, 1);
        let cmd = InstallCommand::new(&ws, "4.5.0", "presto", Some("immunogenomics/presto".into()));

        let request = cmd.request();

        assert!(!request.check_past_fail());
        assert_eq!(request.repo(), Some("immunogenomics/presto"));
    }

    #[test]
    fn present_package_succeeds_without_installing() {
        let temp = TempDir::new().unwrap();
        let ws = sh_workspace(&temp, 0);
        fs::create_dir_all(ws.environment("4.5.0").package_dir("terra")).unwrap();
        let mut ui = MockUI::new();

        let result = InstallCommand::new(&ws, "4.5.0", "terra", None)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.has_success("terra is already installed in R/4.5.0"));
        assert!(ui.spinners().is_empty());
    }

    #[test]
    fn failed_install_exits_one_and_records() {
        let temp = TempDir::new().unwrap();
        let ws = sh_workspace(&temp, 1);
        let mut ui = MockUI::new();

        let result = InstallCommand::new(&ws, "4.5.0", "terra", None)
            .execute(&mut ui)
            .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Could not install terra in R/4.5.0"));
        assert!(ws.ledger().had_failed("terra"));
        let failed_log = fs::read_dir(ws.root())
            .unwrap()
            .filter_map(|e| e.ok())
            .any(|e| e.file_name().to_string_lossy().starts_with("failed_"));
        assert!(failed_log);
    }
}
