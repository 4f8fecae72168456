//! Script acquisition for module-mode host scripts: a minimal package-fetch
//! pipeline around the external package-manager collaborator.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;
use weld_traits::PackageInstaller;

use crate::error::ResolveError;
use crate::options::{ModuleText, ResolveOptions};

/// An acquired module script: where its entry file lives, and its text unless
/// the read was deferred to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleScript {
    pub local_path: PathBuf,
    pub text: Option<String>,
}

/// The subset of a package manifest the pipeline reads.
#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    dependencies: BTreeMap<String, String>,
    main: Option<String>,
}

/// Install the dependency named by `spec` into a fresh working directory and
/// locate its entry file.
///
/// The engine assumes exactly one dependency is installed per request; any
/// install, filesystem or manifest failure is fatal to the whole resolution.
pub(crate) async fn acquire_module<I: PackageInstaller>(
    installer: &I,
    spec: &str,
    options: &ResolveOptions,
) -> Result<ModuleScript, ResolveError> {
    let parent = options
        .install_root
        .clone()
        .unwrap_or_else(std::env::temp_dir);
    tokio::fs::create_dir_all(&parent).await?;
    let tempdir = tempfile::Builder::new()
        .prefix("weld-module-")
        .tempdir_in(&parent)?;

    // Apply the retention policy up front so that directories survive failed
    // installs too, as a host debugging what went wrong would expect.
    let (dir, _cleanup) = if options.keep_install_dirs {
        (tempdir.keep(), None)
    } else {
        (tempdir.path().to_path_buf(), Some(tempdir))
    };
    tracing::debug!(dir = %dir.display(), spec, retained = options.keep_install_dirs, "acquiring module");

    installer.install(&dir, spec).await?;

    let manifest = read_manifest(dir.join("package.json")).await?;
    if manifest.dependencies.len() != 1 {
        return Err(ResolveError::DependencyCount {
            spec: spec.to_string(),
            count: manifest.dependencies.len(),
        });
    }
    let dep_name = manifest
        .dependencies
        .keys()
        .next()
        .cloned()
        .unwrap_or_default();

    let dep_dir = dir.join("node_modules").join(&dep_name);
    let dep_manifest = read_manifest(dep_dir.join("package.json")).await?;
    let entry = dep_manifest.main.as_deref().unwrap_or("index.js");
    let local_path = tokio::fs::canonicalize(dep_dir.join(entry)).await?;

    let text = match options.module_text {
        ModuleText::Inline => Some(tokio::fs::read_to_string(&local_path).await?),
        ModuleText::Deferred => None,
    };

    Ok(ModuleScript { local_path, text })
}

async fn read_manifest(path: PathBuf) -> Result<PackageManifest, ResolveError> {
    let bytes = tokio::fs::read(&path).await?;
    serde_json::from_slice(&bytes).map_err(|source| ResolveError::ManifestParse { path, source })
}
