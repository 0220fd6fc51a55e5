//! Integration tests for installing through the public library API.
//!
//! The runtime is faked at the `Runtime` trait: every R call is recorded and
//! answered by a handler that can mark packages as installed.

use rinstall::config::{MigrationConfig, RepositoryConfig};
use rinstall::environment::{library_name, Environment, PackageProbe, Runtime};
use rinstall::installer::{InstallOrchestrator, InstallRequest, InstallState, Migration};
use rinstall::ledger::FailureLedger;
use rinstall::shell::CommandResult;
use rinstall::strategies::{StrategyChain, StrategyKind};
use rinstall::ui::MockUI;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

/// Shared state of the fake site.
#[derive(Default, Clone)]
struct Site {
    installed: Rc<RefCell<HashSet<String>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl Site {
    fn install(&self, package: &str) {
        self.installed.borrow_mut().insert(package.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

type Handler = Box<dyn Fn(&Site, &str) -> CommandResult>;

struct SiteRuntime {
    site: Site,
    handler: Handler,
}

impl SiteRuntime {
    fn new(site: &Site, handler: impl Fn(&Site, &str) -> CommandResult + 'static) -> Self {
        Self {
            site: site.clone(),
            handler: Box::new(handler),
        }
    }

    fn call(&self, call: String) -> rinstall::Result<CommandResult> {
        self.site.calls.borrow_mut().push(call.clone());
        Ok((self.handler)(&self.site, &call))
    }
}

impl Runtime for SiteRuntime {
    fn eval(&self, _env: &Environment, expr: &str) -> rinstall::Result<CommandResult> {
        self.call(expr.to_string())
    }

    fn install_archive(&self, _env: &Environment, archive: &Path) -> rinstall::Result<CommandResult> {
        self.call(format!("R CMD INSTALL {}", archive.display()))
    }
}

struct SiteProbe(Site);

impl PackageProbe for SiteProbe {
    fn is_installed(&self, _env: &Environment, package: &str) -> bool {
        self.0.installed.borrow().contains(library_name(package))
    }
}

fn ok() -> CommandResult {
    CommandResult::success(String::new(), String::new())
}

fn fail(stderr: &str) -> CommandResult {
    CommandResult::failure(Some(1), String::new(), stderr.to_string())
}

fn env(temp: &TempDir, version: &str) -> Environment {
    Environment::from_paths(
        version,
        "R",
        temp.path().join(version).join("library"),
        temp.path().join(version).join("build"),
    )
}

fn chain(pattern: &str) -> StrategyChain {
    StrategyChain::standard(&RepositoryConfig {
        specialized_pattern: pattern.to_string(),
        ..RepositoryConfig::default()
    })
    .unwrap()
}

#[test]
fn installed_package_runs_nothing() {
    let temp = TempDir::new().unwrap();
    let site = Site::default();
    site.install("ggplot2");
    let runtime = SiteRuntime::new(&site, |_, _| ok());
    let probe = SiteProbe(site.clone());
    let orchestrator =
        InstallOrchestrator::new(&runtime, &probe, FailureLedger::in_root(temp.path()), chain("/Giotto$"));

    let outcome = orchestrator.install_package(
        &env(&temp, "4.5.0"),
        &InstallRequest::new("ggplot2"),
        &mut MockUI::new(),
    );

    assert!(outcome.success);
    assert!(outcome.message.is_empty());
    assert!(site.calls().is_empty());
}

#[test]
fn ledger_gates_migrations_but_not_ad_hoc_installs() {
    let temp = TempDir::new().unwrap();
    let ledger = FailureLedger::in_root(temp.path());
    ledger.record("terra", "gdal missing").unwrap();
    let site = Site::default();
    let runtime = SiteRuntime::new(&site, |site, _| {
        site.install("terra");
        ok()
    });
    let probe = SiteProbe(site.clone());
    let orchestrator = InstallOrchestrator::new(&runtime, &probe, ledger, chain("/Giotto$"));
    let env = env(&temp, "4.5.0");

    let gated = orchestrator.install_package(&env, &InstallRequest::new("terra"), &mut MockUI::new());
    assert_eq!(gated.state, InstallState::KnownFailed);
    assert!(gated.message.is_empty());
    assert!(site.calls().is_empty());

    let forced = orchestrator.install_package(
        &env,
        &InstallRequest::new("terra").bypass_ledger(),
        &mut MockUI::new(),
    );
    assert!(forced.success);
    assert_eq!(site.calls().len(), 1);
}

#[test]
fn archive_fallback_stops_before_managed_repository() {
    let temp = TempDir::new().unwrap();
    let env = env(&temp, "4.5.0");
    let build_dir = env.build_dir().to_path_buf();
    let site = Site::default();
    let runtime = SiteRuntime::new(&site, move |site, call| {
        if call.starts_with("install.packages") {
            fail("package 'sf' is not available")
        } else if call.starts_with("download.packages") {
            fs::write(build_dir.join("sf_1.0-16.tar.gz"), "").unwrap();
            ok()
        } else if call.starts_with("R CMD INSTALL") {
            site.install("sf");
            ok()
        } else {
            fail("unexpected")
        }
    });
    let probe = SiteProbe(site.clone());
    let orchestrator =
        InstallOrchestrator::new(&runtime, &probe, FailureLedger::in_root(temp.path()), chain("/Giotto$"));

    let outcome = orchestrator.install_package(&env, &InstallRequest::new("sf"), &mut MockUI::new());

    assert!(outcome.success);
    assert_eq!(outcome.state, InstallState::Installed(StrategyKind::SourceArchive));
    assert_eq!(
        outcome.message,
        "Successfully installed in R/4.5.0 with source archive"
    );
    assert!(site.calls().iter().all(|c| !c.starts_with("BiocManager")));
    assert_eq!(site.calls().len(), 3);
}

#[test]
fn exhaustion_aggregates_every_diagnostic() {
    let temp = TempDir::new().unwrap();
    let site = Site::default();
    let runtime = SiteRuntime::new(&site, |_, call| {
        if call.starts_with("install.packages") {
            fail("direct boom")
        } else if call.starts_with("download.packages") {
            fail("download boom")
        } else {
            fail("managed boom")
        }
    });
    let probe = SiteProbe(site.clone());
    let ledger = FailureLedger::in_root(temp.path());
    let orchestrator = InstallOrchestrator::new(&runtime, &probe, ledger.clone(), chain("/Giotto$"));

    let outcome =
        orchestrator.install_package(&env(&temp, "4.5.0"), &InstallRequest::new("x"), &mut MockUI::new());

    assert!(!outcome.success);
    assert_eq!(outcome.state, InstallState::Exhausted);
    let parts: Vec<_> = outcome.message.split("; ").collect();
    assert_eq!(parts.len(), 3);
    assert!(parts[0].ends_with("direct boom"));
    assert!(parts[1].ends_with("download boom"));
    assert!(parts[2].ends_with("managed boom"));
    assert!(ledger.had_failed("x"));
}

#[test]
fn specialized_bundle_uses_only_its_installer() {
    let temp = TempDir::new().unwrap();
    let site = Site::default();
    let runtime = SiteRuntime::new(&site, |site, call| {
        if call.starts_with("pak::pkg_install") {
            site.install("Giotto_pkg");
        }
        ok()
    });
    let probe = SiteProbe(site.clone());
    let orchestrator = InstallOrchestrator::new(
        &runtime,
        &probe,
        FailureLedger::in_root(temp.path()),
        chain("/Giotto_pkg$"),
    );

    let outcome = orchestrator.install_package(
        &env(&temp, "4.5.0"),
        &InstallRequest::new("drieslab/Giotto_pkg"),
        &mut MockUI::new(),
    );

    assert!(outcome.success);
    assert_eq!(
        site.calls(),
        vec![r#"pak::pkg_install("drieslab/Giotto_pkg")"#]
    );
}

#[test]
fn version_control_attributes_successful_tool() {
    let temp = TempDir::new().unwrap();
    let site = Site::default();
    let runtime = SiteRuntime::new(&site, |site, call| {
        if call.starts_with("remotes::") {
            fail("rate limited")
        } else {
            site.install("repo");
            ok()
        }
    });
    let probe = SiteProbe(site.clone());
    let orchestrator =
        InstallOrchestrator::new(&runtime, &probe, FailureLedger::in_root(temp.path()), chain("/Giotto$"));

    let outcome = orchestrator.install_package(
        &env(&temp, "4.5.0"),
        &InstallRequest::new("repo").with_repo("org/repo"),
        &mut MockUI::new(),
    );

    assert!(outcome.success);
    assert!(outcome.message.contains("devtools"));
    assert_eq!(
        site.calls(),
        vec![
            r#"remotes::install_github("org/repo")"#,
            r#"devtools::install_github("org/repo")"#
        ]
    );
}

#[test]
fn migration_carries_missing_package_forward() {
    let temp = TempDir::new().unwrap();
    let new = env(&temp, "4.5.0");
    let old = env(&temp, "4.4.2");
    for dir in [
        old.library_dir().join("ggplot2"),
        old.library_dir().join("survival"),
        new.library_dir().join("ggplot2"),
    ] {
        fs::create_dir_all(dir).unwrap();
    }
    let root = temp.path().join("work");
    let site = Site::default();
    site.install("ggplot2");
    let runtime = SiteRuntime::new(&site, |site, call| {
        if call == r#"install.packages("survival", repos="https://cran.r-project.org")"# {
            site.install("survival");
            ok()
        } else {
            fail("unexpected")
        }
    });
    let probe = SiteProbe(site.clone());
    let orchestrator =
        InstallOrchestrator::new(&runtime, &probe, FailureLedger::in_root(&root), chain("/Giotto$"));
    let config = MigrationConfig {
        seed_packages: vec![],
        vcs_packages: vec![],
    };
    let migration = Migration::new(&orchestrator, &root, &config);
    let mut ui = MockUI::new();

    let report = migration.run(&new, &old, &mut ui).unwrap();

    assert_eq!(report.missing, vec!["survival"]);
    assert_eq!(report.installed, 1);
    assert_eq!(fs::read_to_string(root.join("missing.txt")).unwrap(), "survival\n");
    assert!(site.installed.borrow().contains("survival"));
    assert!(!root.join("fail.txt").exists());
}
