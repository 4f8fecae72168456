//! Abstractions allowing embedders to turn manifest link references into
//! bound runtime addresses.

use thiserror::Error;

/// Execution mode of a host script, derived from a link's `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptMode {
    /// Plain script text (`text/javascript` and friends, or no `type`).
    Script,
    /// A dynamically installed package (`application/nodejs`).
    Module,
}

/// Host hooks invoked by the resolver for each recognized link element.
///
/// Returning `Ok(None)` declines the reference: the element is left untouched
/// and no binding is recorded. Returning `Err` aborts the whole resolution.
pub trait ResolveHooks {
    /// Resolve a `rel="directory"` link to a bound address.
    fn resolve_directory(
        &mut self,
        name: &str,
        src: &str,
    ) -> impl Future<Output = Result<Option<String>, HookError>>;

    /// Resolve a `rel="hostScript"` link to a bound address.
    ///
    /// `script_text` is the acquired script source, or `None` when
    /// acquisition was deferred to the host.
    fn resolve_host_script(
        &mut self,
        name: &str,
        src: &str,
        mode: ScriptMode,
        script_text: Option<&str>,
    ) -> impl Future<Output = Result<Option<String>, HookError>>;
}

/// A rejection raised by a host hook, propagated to the caller unchanged.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct HookError(#[from] pub Box<dyn std::error::Error + Send + Sync>);

impl HookError {
    pub fn msg(msg: impl Into<String>) -> Self {
        HookError(msg.into().into())
    }
}
