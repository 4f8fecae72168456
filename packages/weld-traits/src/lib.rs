pub mod net;

mod hooks;
pub use hooks::{HookError, ResolveHooks, ScriptMode};

mod installer;
pub use installer::{InstallError, PackageInstaller};
