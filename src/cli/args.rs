//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

/// rinstall - R package installation and migration for versioned environments.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "rinstall")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Version of the environment to install into (defaults to the config)
    #[arg(long, value_name = "VERSION")]
    pub vnew: Option<String>,

    /// Version of the environment to migrate from (defaults to the config)
    #[arg(long, value_name = "VERSION")]
    pub vold: Option<String>,

    /// Migrate packages from the old environment into the new one
    #[arg(long)]
    pub migrate: bool,

    /// Install a single package into the new environment
    #[arg(long, value_name = "PACKAGE")]
    pub install: Option<String>,

    /// Install the package from this repository (owner/name); ignored without --install
    #[arg(long, value_name = "ORG/REPO")]
    pub git_repo: Option<String>,

    /// Working directory for inventories, logs and the failure ledger
    #[arg(long, value_name = "DIR", env = "RINSTALL_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to config file (overrides rinstall.yml in the working directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Whether any action was requested.
    pub fn has_action(&self) -> bool {
        self.migrate || self.install.is_some()
    }
}
