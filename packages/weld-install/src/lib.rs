//! The external package-manager collaborator: an npm-spawning implementation
//! of [`weld_traits::PackageInstaller`].

use std::path::Path;

use weld_traits::{InstallError, PackageInstaller};

/// Installs one dependency into a working directory by spawning
/// `npm install --production <spec>` with the directory as cwd.
///
/// npm only records installed dependencies in a `package.json` that already
/// exists, so a stub private manifest is written first when the directory has
/// none. The spawned process's stderr is captured and surfaced on failure.
pub struct NpmInstaller {
    program: String,
}

impl Default for NpmInstaller {
    fn default() -> Self {
        Self::new()
    }
}

impl NpmInstaller {
    pub fn new() -> Self {
        Self::with_program("npm")
    }

    /// Use an npm-compatible binary other than `npm` on the PATH
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn ensure_manifest(dir: &Path) -> std::io::Result<()> {
        let manifest_path = dir.join("package.json");
        if tokio::fs::try_exists(&manifest_path).await? {
            return Ok(());
        }
        let stub = serde_json::json!({ "private": true });
        tokio::fs::write(&manifest_path, stub.to_string()).await
    }
}

impl PackageInstaller for NpmInstaller {
    async fn install(&self, dir: &Path, spec: &str) -> Result<(), InstallError> {
        Self::ensure_manifest(dir).await.map_err(InstallError::Spawn)?;

        tracing::debug!(dir = %dir.display(), spec, "installing package");
        let output = tokio::process::Command::new(&self.program)
            .current_dir(dir)
            .args(["install", "--production", spec])
            .output()
            .await
            .map_err(InstallError::Spawn)?;

        if !output.status.success() {
            return Err(InstallError::Failed {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(())
    }
}
