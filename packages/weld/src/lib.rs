//! Weld resolves a declarative HTML "manifest" document into a concrete
//! runtime configuration.
//!
//! A manifest references external directories and executable host scripts
//! through `<link>` elements:
//!
//! ```html
//! <html>
//!   <link rel="directory" name="root" src="/data">
//!   <link rel="hostScript" name="server" src="server.js" type="application/javascript">
//! </html>
//! ```
//!
//! [`resolve_manifest`] parses the markup, walks the tree in document order,
//! resolves each link to a runtime address through the caller's
//! [`ResolveHooks`], acquires script text where needed (inline fragment,
//! remote fetch, or dynamic package install), records a `boundUrl` attribute
//! on each resolved element and re-serializes the document. The result is the
//! mutated markup plus a [`BindingsTable`] mapping link names to bindings.
//!
//! Weld never executes acquired scripts; it hands text and addresses to the
//! host, which owns execution.

pub use weld_dom::{
    Attribute, Attributes, Document, ElementData, Node, NodeData, NodeVisitor, SourceLocation,
    traverse,
};
pub use weld_html::{parse_html, serialize_document};
pub use weld_install::NpmInstaller;
pub use weld_net::ReqwestProvider;
pub use weld_resolver::{
    Binding, BindingsTable, LinkResolver, ModuleText, ResolveError, ResolveOptions,
};
pub use weld_traits::net::{DummyFetchProvider, FetchError, FetchProvider, Request, Response};
pub use weld_traits::{HookError, InstallError, PackageInstaller, ResolveHooks, ScriptMode};

/// The output of one resolution run: the re-serialized (possibly mutated)
/// markup and the completed bindings table.
#[derive(Debug)]
pub struct ResolvedManifest {
    pub html: String,
    pub bindings: BindingsTable,
}

/// Parse `html`, resolve every link element against the given collaborators
/// and serialize the result.
///
/// Side effects happen in strict document order; the first fatal failure
/// (fetch status, install failure, hook rejection) aborts the whole run and
/// is returned instead of a document.
pub async fn resolve_manifest<H, F, I>(
    html: &str,
    hooks: &mut H,
    fetcher: &F,
    installer: &I,
    options: &ResolveOptions,
) -> Result<ResolvedManifest, ResolveError>
where
    H: ResolveHooks,
    F: FetchProvider,
    I: PackageInstaller,
{
    let mut doc = parse_html(html);
    let bindings = LinkResolver::new(hooks, fetcher, installer, options)
        .resolve(&mut doc)
        .await?;
    let html = serialize_document(&doc)?;
    Ok(ResolvedManifest { html, bindings })
}
