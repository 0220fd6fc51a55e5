//! Configuration loading, parsing, and validation for rinstall.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use rinstall::config::{load_config, CONFIG_FILE_NAME};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join(CONFIG_FILE_NAME),
//!     "migration:\n  seed_packages: [terra]\n",
//! )
//! .unwrap();
//!
//! let config = load_config(None, temp.path()).unwrap();
//! assert_eq!(config.migration.seed_packages, vec!["terra"]);
//! assert_eq!(config.defaults.new_version, "4.5.0");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{discover, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{
    Defaults, LayoutConfig, MigrationConfig, RepositoryConfig, RinstallConfig, RuntimeConfig,
    VcsPackage,
};
pub use validator::{is_repo_locator, validate, validation_errors};
