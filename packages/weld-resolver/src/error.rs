use std::path::PathBuf;

use thiserror::Error;
use weld_traits::net::FetchError;
use weld_traits::{HookError, InstallError};

/// A fatal resolution failure. Any of these aborts the whole resolution run;
/// mutations already applied to earlier elements remain in the in-memory tree
/// but the caller receives this error instead of the document.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("{0}")]
    Fetch(#[from] FetchError),
    #[error("{0}")]
    Install(#[from] InstallError),
    #[error("{0}")]
    Hook(#[from] HookError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid script url: {0}")]
    Url(#[from] url::ParseError),
    #[error("package manifest at {} is invalid: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("install of {spec} declared {count} dependencies, expected exactly one")]
    DependencyCount { spec: String, count: usize },
}
