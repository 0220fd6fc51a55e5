//! Running commands inside an environment.
//!
//! Every invocation is a single shell call that first loads the environment
//! module and then runs the requested command, so nothing leaks between
//! calls.

use crate::config::RuntimeConfig;
use crate::environment::Environment;
use crate::error::Result;
use crate::shell::{execute, quote, CommandOptions, CommandResult};
use std::path::Path;

/// Access to an environment's R runtime.
pub trait Runtime {
    /// Evaluate an R expression inside the environment.
    fn eval(&self, env: &Environment, expr: &str) -> Result<CommandResult>;

    /// Install a source archive into the environment.
    fn install_archive(&self, env: &Environment, archive: &Path) -> Result<CommandResult>;
}

/// [`Runtime`] backed by shell command templates.
#[derive(Debug, Clone)]
pub struct ShellRuntime {
    config: RuntimeConfig,
}

impl ShellRuntime {
    /// Create a runtime from its configuration.
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    /// Full shell command for evaluating an expression.
    pub fn render_eval(&self, env: &Environment, expr: &str) -> String {
        let body = self.config.eval.replace("{expr}", &quote(expr));
        self.in_environment(env, &body)
    }

    /// Full shell command for installing an archive.
    pub fn render_install_archive(&self, env: &Environment, archive: &Path) -> String {
        let body = self
            .config
            .install_archive
            .replace("{archive}", &quote(&archive.to_string_lossy()));
        self.in_environment(env, &body)
    }

    fn in_environment(&self, env: &Environment, body: &str) -> String {
        let load = self
            .config
            .load
            .replace("{module}", &quote(env.module()))
            .replace("{version}", &quote(env.version()));
        format!("{} && {}", load, body)
    }

    fn run(&self, command: &str) -> Result<CommandResult> {
        let options = CommandOptions {
            shell: Some(self.config.shell.clone()),
            shell_args: self.config.shell_args.clone(),
        };
        execute(command, &options)
    }
}

impl Runtime for ShellRuntime {
    fn eval(&self, env: &Environment, expr: &str) -> Result<CommandResult> {
        self.run(&self.render_eval(env, expr))
    }

    fn install_archive(&self, env: &Environment, archive: &Path) -> Result<CommandResult> {
        self.run(&self.render_install_archive(env, archive))
    }
}
