use std::path::PathBuf;

use url::Url;

/// What to do with a module-mode script's entry file once it is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModuleText {
    /// Read the entry file and pass its text to the host hook.
    #[default]
    Inline,
    /// Skip the read; the hook receives `None` and the host loads the module
    /// itself via the binding's `local_path`.
    Deferred,
}

/// Options for one resolution run.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Base address that relative `hostScript` srcs are resolved against.
    pub base_url: Url,

    /// Where module install directories are created. Defaults to the system
    /// temp directory.
    pub install_root: Option<PathBuf>,

    /// Whether install directories are left on disk after acquisition.
    ///
    /// Retention is deliberate: the directories are process-level resources a
    /// host may want to reuse or cache, and the engine never cleans them.
    /// Set to `false` to have each directory removed once its entry file has
    /// been read.
    pub keep_install_dirs: bool,

    /// See [`ModuleText`].
    pub module_text: ModuleText,
}

impl ResolveOptions {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            install_root: None,
            keep_install_dirs: true,
            module_text: ModuleText::Inline,
        }
    }
}
