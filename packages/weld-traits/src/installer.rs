use std::path::Path;

use thiserror::Error;

/// External package-manager collaborator.
///
/// Adds the dependency named by `spec` into the working directory `dir`,
/// production-only. Implementations capture the process's stderr so that a
/// failed install can be surfaced to the caller.
pub trait PackageInstaller {
    fn install(
        &self,
        dir: &Path,
        spec: &str,
    ) -> impl Future<Output = Result<(), InstallError>>;
}

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("failed to spawn package manager: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("package install exited with status {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },
}
