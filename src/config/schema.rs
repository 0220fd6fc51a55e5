//! Configuration schema definitions for rinstall.
//!
//! This module contains the struct definitions that map to the
//! `rinstall.yml` file format. Every section has defaults matching the
//! cluster layout rinstall was written for, so an empty file (or no file)
//! is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for rinstall.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RinstallConfig {
    /// Directory holding ledger, inventory, diff and outcome files.
    /// Overridden by `--root`; falls back to the current directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,

    /// Default environment versions
    pub defaults: Defaults,

    /// Where environments live on disk
    pub layout: LayoutConfig,

    /// How the R runtime of an environment is invoked
    pub runtime: RuntimeConfig,

    /// Package sources
    pub repositories: RepositoryConfig,

    /// Hand-curated migration data
    pub migration: MigrationConfig,
}

/// Default environment versions used when no CLI flag is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Environment packages are installed into
    pub new_version: String,

    /// Environment a migration copies from
    pub old_version: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            new_version: "4.5.0".to_string(),
            old_version: "4.4.2".to_string(),
        }
    }
}

/// Filesystem layout of the versioned environments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Root holding one directory per version
    pub apps_root: PathBuf,

    /// Package library path relative to a version directory
    pub library_subpath: PathBuf,

    /// Root for per-version build directories (`R-<version>/packages`)
    pub builds_root: PathBuf,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            apps_root: PathBuf::from("/hpc/apps/R"),
            library_subpath: PathBuf::from("lib64/R/library"),
            builds_root: PathBuf::from("/adminfs/builds"),
        }
    }
}

/// Command templates used to reach an environment's runtime.
///
/// Placeholders: `{module}` is `<module_name>/<version>`, `{expr}` is the
/// shell-quoted R expression, `{archive}` the shell-quoted archive path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Environment module name (`module load R/4.5.0`)
    pub module_name: String,

    /// Shell used for every runtime invocation
    pub shell: String,

    /// Arguments passed to the shell before the command string
    pub shell_args: Vec<String>,

    /// Command that activates an environment
    pub load: String,

    /// Command that evaluates an expression inside the environment
    pub eval: String,

    /// Command that installs a source archive inside the environment
    pub install_archive: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            module_name: "R".to_string(),
            shell: "bash".to_string(),
            shell_args: vec!["-lc".to_string()],
            load: "module load {module}".to_string(),
            eval: "Rscript -e {expr}".to_string(),
            install_archive: "R CMD INSTALL {archive}".to_string(),
        }
    }
}

/// Package sources and installer tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository used for direct installs and source archive downloads
    pub source: String,

    /// Version-control installer packages, tried in order
    pub vcs_tools: Vec<String>,

    /// Regex identifying specialized bundles installed through `pak`
    pub specialized_pattern: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            source: "https://cran.r-project.org".to_string(),
            vcs_tools: vec!["remotes".to_string(), "devtools".to_string()],
            specialized_pattern: "/Giotto$".to_string(),
        }
    }
}

/// Packages installed ahead of the inventory sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    /// Known dependencies of packages in the sweep, installed first
    pub seed_packages: Vec<String>,

    /// Packages that only install from a version-control repository
    pub vcs_packages: Vec<VcsPackage>,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        let seed_packages = ["ggforce", "terra", "pak", "remotes", "multicross", "drieslab/Giotto"]
            .into_iter()
            .map(String::from)
            .collect();

        let vcs_packages = [
            ("SeuratData", "satijalab/seurat-data"),
            ("SeuratDisk", "mojaveazure/seurat-disk"),
            ("SeuratWrappers", "satijalab/seurat-wrappers"),
            ("CellChat", "jinworks/CellChat"),
            ("monocle3", "cole-trapnell-lab/monocle3"),
            ("presto", "immunogenomics/presto"),
            ("proteoDA", "ByrumLab/proteoDA"),
            ("rbokeh", "hafen/rbokeh"),
            ("SCENIC", "aertslab/SCENIC"),
            ("SCopeLoomR", "aertslab/SCopeLoomR"),
            ("velocyto.R", "velocyto-team/velocyto.R"),
            ("SCPA", "jackbibby1/SCPA"),
        ]
        .into_iter()
        .map(|(name, repo)| VcsPackage::new(name, repo))
        .collect();

        Self {
            seed_packages,
            vcs_packages,
        }
    }
}

/// A package paired with the repository it installs from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VcsPackage {
    /// Package name as it appears in the library
    pub name: String,

    /// Repository locator (`owner/repo`)
    pub repo: String,
}

impl VcsPackage {
    /// Create a new entry.
    pub fn new(name: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            repo: repo.into(),
        }
    }
}
