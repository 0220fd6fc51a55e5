//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which resolves the
//! [`Workspace`] once and then runs the requested actions against it:
//! - `--migrate` runs [`MigrateCommand`]
//! - `--install` runs [`InstallCommand`] (after the migration when both are
//!   given)

pub mod dispatcher;
pub mod install;
pub mod migrate;
pub mod workspace;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use install::InstallCommand;
pub use migrate::MigrateCommand;
pub use workspace::Workspace;
