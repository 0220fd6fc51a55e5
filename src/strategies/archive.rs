//! Build from the latest source archive.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{InstallStrategy, StrategyContext, StrategyKind, StrategyOutcome};
use crate::installer::InstallRequest;

/// Download the newest source tarball into the environment's build area and
/// install it with `R CMD INSTALL`.
#[derive(Debug, Clone)]
pub struct SourceArchiveInstall {
    repo_url: String,
}

impl SourceArchiveInstall {
    /// Create the strategy for a repository URL.
    pub fn new(repo_url: &str) -> Self {
        Self {
            repo_url: repo_url.to_string(),
        }
    }

    fn download_expression(&self, package: &str, dir: &Path) -> String {
        format!(
            r#"download.packages("{}", destdir="{}", repos="{}", type="source")"#,
            package,
            dir.display(),
            self.repo_url
        )
    }
}

impl InstallStrategy for SourceArchiveInstall {
    fn kind(&self) -> StrategyKind {
        StrategyKind::SourceArchive
    }

    fn attempt(&self, ctx: &StrategyContext<'_>, request: &InstallRequest) -> StrategyOutcome {
        let package = request.package();
        let build_dir = ctx.env.build_dir();

        if let Err(e) = fs::create_dir_all(build_dir) {
            return StrategyOutcome::failed(
                self.kind(),
                format!(
                    "Could not create build directory {}: {}",
                    build_dir.display(),
                    e
                ),
            );
        }

        tracing::info!(
            "Downloading source archive of {} into {}",
            package,
            build_dir.display()
        );
        let download = ctx
            .runtime
            .eval(ctx.env, &self.download_expression(package, build_dir));

        let failure = match download {
            Ok(result) if result.success => None,
            Ok(result) => Some(result.diagnostic()),
            Err(e) => Some(Some(e.to_string())),
        };
        if let Some(diagnostic) = failure {
            let mut message = format!(
                "Could not download latest source archive for {} from {}",
                package, self.repo_url
            );
            if let Some(diagnostic) = diagnostic {
                message.push_str(": ");
                message.push_str(&diagnostic);
            }
            return StrategyOutcome::failed(self.kind(), message);
        }

        let Some(archive) = latest_archive(build_dir, package) else {
            return StrategyOutcome::failed(
                self.kind(),
                format!(
                    "No source archive found for {} in {}",
                    package,
                    build_dir.display()
                ),
            );
        };

        tracing::info!("Installing {} from {}", package, archive.display());
        let result = ctx.runtime.install_archive(ctx.env, &archive);
        ctx.confirm(self.kind(), self.kind().label(), package, result)
    }
}

/// Most recently modified `<package>_*.tar.gz` in `dir`.
///
/// Ties on modification time go to the lexically greatest name. Returns
/// `None` when the directory is unreadable or holds no matching archive.
pub fn latest_archive(dir: &Path, package: &str) -> Option<PathBuf> {
    let prefix = format!("{}_", package);
    let entries = fs::read_dir(dir).ok()?;

    entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with(&prefix) && name.ends_with(".tar.gz")
        })
        .map(|entry| {
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            (modified, entry.path())
        })
        .max()
        .map(|(_, path)| path)
}
