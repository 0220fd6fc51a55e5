//! Versioned R environments.
//!
//! An [`Environment`] is one installed R version with its package library.
//! This module knows where environments live on disk ([`layout`]), how to run
//! code inside them ([`runtime`]), how to tell whether a package is usably
//! installed ([`probe`]), and how to snapshot and compare their package sets
//! ([`inventory`]).

pub mod inventory;
pub mod layout;
pub mod probe;
pub mod runtime;

pub use inventory::{parse_sweep_entries, snapshot, Inventory, InventoryDiff, LOCK_PREFIX};
pub use layout::{library_name, Environment};
pub use probe::{require_namespace_expr, PackageProbe, RuntimeProbe};
pub use runtime::{Runtime, ShellRuntime};
