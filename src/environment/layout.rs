//! On-disk layout of a versioned environment.

use crate::config::LayoutConfig;
use std::fmt;
use std::path::{Path, PathBuf};

/// One versioned R installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    version: String,
    module: String,
    library_dir: PathBuf,
    build_dir: PathBuf,
}

impl Environment {
    /// Resolve an environment from the configured layout.
    pub fn new(version: &str, module_name: &str, layout: &LayoutConfig) -> Self {
        Self {
            version: version.to_string(),
            module: format!("{}/{}", module_name, version),
            library_dir: layout.apps_root.join(version).join(&layout.library_subpath),
            build_dir: layout
                .builds_root
                .join(format!("{}-{}", module_name, version))
                .join("packages"),
        }
    }

    /// Build an environment from explicit paths.
    pub fn from_paths(
        version: &str,
        module_name: &str,
        library_dir: impl Into<PathBuf>,
        build_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            version: version.to_string(),
            module: format!("{}/{}", module_name, version),
            library_dir: library_dir.into(),
            build_dir: build_dir.into(),
        }
    }

    /// Version string, e.g. `4.5.0`.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Module identifier, e.g. `R/4.5.0`.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Directory holding one subdirectory per installed package.
    pub fn library_dir(&self) -> &Path {
        &self.library_dir
    }

    /// Directory source archives are downloaded into.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Library directory a package installs into.
    pub fn package_dir(&self, package: &str) -> PathBuf {
        self.library_dir.join(library_name(package))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.module)
    }
}

/// Name a package is installed under.
///
/// Qualified names (`drieslab/Giotto`) install under their last segment.
pub fn library_name(package: &str) -> &str {
    package.rsplit('/').next().unwrap_or(package)
}
