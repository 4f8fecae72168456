//! Per-link-type resolution dispatch, run as the visitor of the suspending
//! document traversal.

use weld_dom::{Document, LocalName, NodeVisitor, QualName, SourceLocation, local_name, ns, traverse};
use weld_traits::net::{FetchError, FetchProvider, Request};
use weld_traits::{PackageInstaller, ResolveHooks, ScriptMode};

use crate::acquire::acquire_module;
use crate::bindings::{Binding, BindingsTable};
use crate::error::ResolveError;
use crate::options::ResolveOptions;

const REL_DIRECTORY: &str = "directory";
const REL_HOST_SCRIPT: &str = "hostScript";

fn bound_url_attr() -> QualName {
    QualName::new(None, ns!(), LocalName::from("boundUrl"))
}

/// Derive the execution mode from a `type` attribute value. `None` means the
/// value is unresolvable and the element must be skipped.
fn parse_script_mode(value: &str) -> Option<ScriptMode> {
    match value {
        "text/javascript" | "application/javascript" | "application/ecmascript" => {
            Some(ScriptMode::Script)
        }
        "application/nodejs" => Some(ScriptMode::Module),
        _ => None,
    }
}

/// Formats an optional source location for diagnostics
fn loc(location: Option<SourceLocation>) -> String {
    match location {
        Some(location) => location.to_string(),
        None => "unknown".to_string(),
    }
}

/// The attributes of one link element, copied out so the document can be
/// mutated while they are in scope.
struct LinkAttrs {
    rel: Option<String>,
    name: Option<String>,
    src: Option<String>,
    type_attr: Option<String>,
    location: Option<SourceLocation>,
}

impl LinkAttrs {
    fn read(doc: &Document, node_id: usize) -> Option<LinkAttrs> {
        let element = doc[node_id].element_data()?;
        if element.name.local != local_name!("link") {
            return None;
        }
        Some(LinkAttrs {
            rel: element.attr(local_name!("rel")).map(String::from),
            name: element.attr(local_name!("name")).map(String::from),
            src: element.attr(local_name!("src")).map(String::from),
            type_attr: element.attr(local_name!("type")).map(String::from),
            location: element.location,
        })
    }
}

/// One resolution run over one document.
///
/// Holds no state beyond the bindings table under construction and borrows of
/// the caller's collaborators; dispatch is per element, in document order,
/// one suspension at a time.
pub struct LinkResolver<'a, H, F, I> {
    hooks: &'a mut H,
    fetcher: &'a F,
    installer: &'a I,
    options: &'a ResolveOptions,
    bindings: BindingsTable,
}

impl<'a, H, F, I> LinkResolver<'a, H, F, I>
where
    H: ResolveHooks,
    F: FetchProvider,
    I: PackageInstaller,
{
    pub fn new(
        hooks: &'a mut H,
        fetcher: &'a F,
        installer: &'a I,
        options: &'a ResolveOptions,
    ) -> Self {
        Self {
            hooks,
            fetcher,
            installer,
            options,
            bindings: BindingsTable::new(),
        }
    }

    /// Walk the whole tree, resolving every recognized link element, and
    /// return the completed bindings table. The first fatal failure aborts
    /// the walk; elements after it in document order are not visited.
    pub async fn resolve(mut self, doc: &mut Document) -> Result<BindingsTable, ResolveError> {
        let root_id = doc.root_id();
        traverse(doc, root_id, &mut self).await?;
        Ok(self.bindings)
    }

    async fn resolve_link(
        &mut self,
        doc: &mut Document,
        node_id: usize,
        attrs: LinkAttrs,
    ) -> Result<(), ResolveError> {
        match attrs.rel.as_deref() {
            Some(REL_DIRECTORY) => self.resolve_directory_link(doc, node_id, attrs).await,
            Some(REL_HOST_SCRIPT) => self.resolve_host_script_link(doc, node_id, attrs).await,
            rel => {
                tracing::warn!(
                    rel = rel.unwrap_or("<missing>"),
                    location = %loc(attrs.location),
                    "ignoring link with unrecognized rel"
                );
                Ok(())
            }
        }
    }

    async fn resolve_directory_link(
        &mut self,
        doc: &mut Document,
        node_id: usize,
        attrs: LinkAttrs,
    ) -> Result<(), ResolveError> {
        let (Some(name), Some(src)) = (attrs.name, attrs.src) else {
            tracing::warn!(
                location = %loc(attrs.location),
                "directory link requires name and src attributes; skipping"
            );
            return Ok(());
        };

        let Some(address) = self.hooks.resolve_directory(&name, &src).await? else {
            tracing::debug!(name, src, "directory hook declined");
            return Ok(());
        };

        doc.set_attr(node_id, bound_url_attr(), &address);
        self.bindings.insert(Binding {
            name,
            local_path: None,
            bound_address: address,
            script_text: None,
        });
        Ok(())
    }

    async fn resolve_host_script_link(
        &mut self,
        doc: &mut Document,
        node_id: usize,
        attrs: LinkAttrs,
    ) -> Result<(), ResolveError> {
        let location = attrs.location;
        let (Some(name), Some(src)) = (attrs.name, attrs.src) else {
            tracing::warn!(
                location = %loc(location),
                "hostScript link requires name and src attributes; skipping"
            );
            return Ok(());
        };

        let mode = match attrs.type_attr.as_deref() {
            None => ScriptMode::Script,
            Some(value) => match parse_script_mode(value) {
                Some(mode) => mode,
                None => {
                    tracing::warn!(
                        type_attr = value,
                        location = %loc(location),
                        "hostScript link has unresolvable type; skipping"
                    );
                    return Ok(());
                }
            },
        };

        // Acquire the script. A fragment reference is always treated as an
        // inline script regardless of the declared mode.
        let (mode, script_text, local_path) = if let Some(fragment) = src.strip_prefix('#') {
            match self.extract_inline_text(doc, fragment, location) {
                Some(text) => (ScriptMode::Script, Some(text), None),
                None => return Ok(()),
            }
        } else {
            match mode {
                ScriptMode::Script => {
                    let text = self.fetch_script(&src).await?;
                    (ScriptMode::Script, Some(text), None)
                }
                ScriptMode::Module => {
                    let module = acquire_module(self.installer, &src, self.options).await?;
                    (ScriptMode::Module, module.text, Some(module.local_path))
                }
            }
        };

        let Some(address) = self
            .hooks
            .resolve_host_script(&name, &src, mode, script_text.as_deref())
            .await?
        else {
            tracing::debug!(name, src, "hostScript hook declined");
            return Ok(());
        };

        doc.set_attr(node_id, bound_url_attr(), &address);
        self.bindings.insert(Binding {
            name,
            local_path,
            bound_address: address,
            script_text,
        });
        Ok(())
    }

    /// Look up a `#fragment` src: the referenced element must exist and
    /// contain exactly one Text child, whose content is the script source.
    fn extract_inline_text(
        &self,
        doc: &Document,
        fragment: &str,
        location: Option<SourceLocation>,
    ) -> Option<String> {
        if fragment.is_empty() {
            tracing::warn!(
                location = %loc(location),
                "hostScript link has empty fragment reference; skipping"
            );
            return None;
        }
        let Some(target_id) = doc.get_element_by_id(fragment) else {
            tracing::warn!(
                fragment,
                location = %loc(location),
                "fragment reference does not match any element; skipping"
            );
            return None;
        };
        let children = &doc[target_id].children;
        let text = match children.as_slice() {
            [only] => doc[*only].text_data(),
            _ => None,
        };
        match text {
            Some(text) => Some(text.content.clone()),
            None => {
                tracing::warn!(
                    fragment,
                    location = %loc(location),
                    "fragment target must contain exactly one text node; skipping"
                );
                None
            }
        }
    }

    /// Fetch a remote script. Any non-success status fails the whole
    /// resolution; there is no retry.
    async fn fetch_script(&self, src: &str) -> Result<String, ResolveError> {
        let url = self.options.base_url.join(src)?;
        let response = self.fetcher.fetch(Request::get(url.clone())).await?;
        if !response.is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status,
            }
            .into());
        }
        Ok(response.text())
    }
}

impl<H, F, I> NodeVisitor for LinkResolver<'_, H, F, I>
where
    H: ResolveHooks,
    F: FetchProvider,
    I: PackageInstaller,
{
    // The resolver always walks the full tree; it short-circuits only via Err.
    type Output = ();
    type Error = ResolveError;

    async fn visit(
        &mut self,
        doc: &mut Document,
        node_id: usize,
    ) -> Result<Option<()>, ResolveError> {
        if let Some(attrs) = LinkAttrs::read(doc, node_id) {
            self.resolve_link(doc, node_id, attrs).await?;
        }
        Ok(None)
    }
}
