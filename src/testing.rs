//! Hand-written fakes shared by unit tests.

use crate::environment::{Environment, PackageProbe, Runtime};
use crate::error::{InstallError, Result};
use crate::shell::CommandResult;
use std::cell::RefCell;
use std::collections::HashSet;
use std::path::Path;

type Responder<'a> = Box<dyn Fn(&str) -> Result<CommandResult> + 'a>;

/// Runtime answering from pattern rules; unmatched calls exit 1 silently.
///
/// Archive installs are seen by the rules as `R CMD INSTALL <path>`.
#[derive(Default)]
pub struct FakeRuntime<'a> {
    rules: Vec<(String, Responder<'a>)>,
    calls: RefCell<Vec<String>>,
}

impl<'a> FakeRuntime<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond with a custom closure to calls containing `pattern`.
    pub fn on(mut self, pattern: &str, f: impl Fn(&str) -> Result<CommandResult> + 'a) -> Self {
        self.rules.push((pattern.to_string(), Box::new(f)));
        self
    }

    pub fn succeed_on(self, pattern: &str) -> Self {
        self.on(pattern, |_| Ok(ok("")))
    }

    pub fn fail_on(self, pattern: &str, code: i32, stderr: &str) -> Self {
        let stderr = stderr.to_string();
        self.on(pattern, move |_| Ok(failed(code, "", &stderr)))
    }

    pub fn error_on(self, pattern: &str) -> Self {
        self.on(pattern, |call| {
            Err(InstallError::CommandFailed {
                command: call.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "shell not found"),
            })
        })
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn respond(&self, call: String) -> Result<CommandResult> {
        self.calls.borrow_mut().push(call.clone());
        match self.rules.iter().find(|(pattern, _)| call.contains(pattern)) {
            Some((_, responder)) => responder(&call),
            None => Ok(failed(1, "", "")),
        }
    }
}

impl Runtime for FakeRuntime<'_> {
    fn eval(&self, _env: &Environment, expr: &str) -> Result<CommandResult> {
        self.respond(expr.to_string())
    }

    fn install_archive(&self, _env: &Environment, archive: &Path) -> Result<CommandResult> {
        self.respond(format!("R CMD INSTALL {}", archive.display()))
    }
}

/// Probe backed by an in-memory set of installed names.
#[derive(Default)]
pub struct FakeProbe {
    installed: RefCell<HashSet<String>>,
    checks: RefCell<Vec<String>>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_installed(names: &[&str]) -> Self {
        let probe = Self::new();
        for name in names {
            probe.install(name);
        }
        probe
    }

    pub fn install(&self, name: &str) {
        self.installed.borrow_mut().insert(name.to_string());
    }

    pub fn checks(&self) -> Vec<String> {
        self.checks.borrow().clone()
    }
}

impl PackageProbe for FakeProbe {
    fn is_installed(&self, _env: &Environment, package: &str) -> bool {
        self.checks.borrow_mut().push(package.to_string());
        self.installed.borrow().contains(package)
    }
}

pub fn ok(stdout: &str) -> CommandResult {
    CommandResult::success(stdout.to_string(), String::new())
}

pub fn failed(code: i32, stdout: &str, stderr: &str) -> CommandResult {
    CommandResult::failure(Some(code), stdout.to_string(), stderr.to_string())
}

pub fn test_env(root: &Path) -> Environment {
    Environment::from_paths("4.5.0", "R", root.join("library"), root.join("build"))
}
