//! Install requests.

/// A package to install.
///
/// `package` may be qualified (`drieslab/Giotto`); probing uses the last
/// segment. A repository locator (`owner/name`) routes the request to the
/// version-control strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    package: String,
    repo: Option<String>,
    check_past_fail: bool,
}

impl InstallRequest {
    /// Request for `package` that honors the failure ledger.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            repo: None,
            check_past_fail: true,
        }
    }

    /// Install from a version-control repository.
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Attempt the install even when the ledger lists the package.
    pub fn bypass_ledger(mut self) -> Self {
        self.check_past_fail = false;
        self
    }

    /// Package name as given.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Repository locator, if any.
    pub fn repo(&self) -> Option<&str> {
        self.repo.as_deref()
    }

    /// Whether the ledger gates this request.
    pub fn check_past_fail(&self) -> bool {
        self.check_past_fail
    }
}
