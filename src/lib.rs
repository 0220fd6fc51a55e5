//! rinstall - R package installation and migration for versioned environments.
//!
//! rinstall installs third-party R packages into module-loaded R environments
//! on a cluster. Each request is checked against the target environment and a
//! ledger of past failures before a fixed chain of installation strategies is
//! tried. A migration carries an old environment's package set over into a
//! new one.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`environment`] - Environment layout, runtime, probing and inventories
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Install orchestration and migration
//! - [`ledger`] - Record of packages that failed to install
//! - [`outcome`] - Dated success and failure logs
//! - [`shell`] - Shell command execution
//! - [`strategies`] - Installation strategies and their routes
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use rinstall::environment::{Inventory, InventoryDiff};
//!
//! let old = Inventory::from_names("4.4.2", ["ggplot2", "survival"]);
//! let new = Inventory::from_names("4.5.0", ["ggplot2"]);
//!
//! let diff = InventoryDiff::between(&old, &new);
//! assert_eq!(diff.missing(), &["survival"]);
//! ```
//!
//! For end-to-end runs, see the integration tests.

pub mod cli;
pub mod config;
pub mod environment;
pub mod error;
pub mod installer;
pub mod ledger;
pub mod outcome;
pub mod shell;
pub mod strategies;
pub mod ui;

#[cfg(test)]
mod testing;

pub use error::{InstallError, Result};
