//! Package presence probe.
//!
//! A directory in the library alone is not enough (interrupted installs leave
//! partial directories behind), and a successful namespace load alone is not
//! enough either (the package could come from another library on the search
//! path). A package counts as installed only when both hold.

use crate::environment::{library_name, Environment, Runtime};

/// Answers whether a package is usably installed in an environment.
pub trait PackageProbe {
    /// Check a package; never fails, an error means "not installed".
    fn is_installed(&self, env: &Environment, package: &str) -> bool;
}

/// [`PackageProbe`] that checks the library directory and loads the
/// namespace through the environment's runtime.
pub struct RuntimeProbe<'a> {
    runtime: &'a dyn Runtime,
}

impl<'a> RuntimeProbe<'a> {
    /// Create a probe over a runtime.
    pub fn new(runtime: &'a dyn Runtime) -> Self {
        Self { runtime }
    }
}

impl PackageProbe for RuntimeProbe<'_> {
    fn is_installed(&self, env: &Environment, package: &str) -> bool {
        let dir = env.package_dir(package);
        if !dir.is_dir() {
            tracing::debug!("{} not present in {}", package, env.library_dir().display());
            return false;
        }

        let expr = require_namespace_expr(library_name(package));
        match self.runtime.eval(env, &expr) {
            Ok(result) => {
                if !result.success {
                    tracing::debug!("{} present in {} but fails to load", package, env);
                }
                result.success
            }
            Err(e) => {
                tracing::warn!("Could not probe {} in {}: {}", package, env, e);
                false
            }
        }
    }
}

/// R expression exiting 0 when the namespace loads, 1 otherwise.
pub fn require_namespace_expr(name: &str) -> String {
    format!(
        r#"quit(status = if (requireNamespace("{}", quietly=TRUE)) 0 else 1)"#,
        name
    )
}
