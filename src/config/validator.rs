//! Configuration validation.

use crate::config::schema::RinstallConfig;
use crate::error::{InstallError, Result};
use regex::Regex;

/// Validate a loaded configuration, returning the first problem found.
pub fn validate(config: &RinstallConfig) -> Result<()> {
    let errors = validation_errors(config);
    match errors.into_iter().next() {
        None => Ok(()),
        Some(message) => Err(InstallError::ConfigValidationError { message }),
    }
}

/// Collect every validation problem in a configuration.
pub fn validation_errors(config: &RinstallConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.defaults.new_version.trim().is_empty() {
        errors.push("defaults.new_version must not be empty".to_string());
    }
    if config.defaults.old_version.trim().is_empty() {
        errors.push("defaults.old_version must not be empty".to_string());
    }

    if let Err(e) = Regex::new(&config.repositories.specialized_pattern) {
        errors.push(format!("repositories.specialized_pattern is not a valid regex: {}", e));
    }

    if config.repositories.vcs_tools.is_empty() {
        errors.push("repositories.vcs_tools needs at least one installer".to_string());
    }

    for template in [&config.runtime.load, &config.runtime.eval] {
        if template.trim().is_empty() {
            errors.push("runtime.load and runtime.eval must not be empty".to_string());
            break;
        }
    }
    if !config.runtime.eval.contains("{expr}") {
        errors.push("runtime.eval must contain {expr}".to_string());
    }
    if !config.runtime.install_archive.contains("{archive}") {
        errors.push("runtime.install_archive must contain {archive}".to_string());
    }

    for pkg in &config.migration.vcs_packages {
        if !is_repo_locator(&pkg.repo) {
            errors.push(format!(
                "migration.vcs_packages: '{}' has invalid repo '{}' (expected owner/name)",
                pkg.name, pkg.repo
            ));
        }
    }

    if config.migration.seed_packages.iter().any(|p| p.trim().is_empty()) {
        errors.push("migration.seed_packages contains an empty name".to_string());
    }

    errors
}

/// Whether a string looks like `owner/name`.
pub fn is_repo_locator(repo: &str) -> bool {
    match repo.split_once('/') {
        Some((owner, name)) => !owner.is_empty() && !name.is_empty() && !name.contains('/'),
        None => false,
    }
}
