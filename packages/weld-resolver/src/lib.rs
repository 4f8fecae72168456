//! The link resolution engine.
//!
//! Walks a parsed manifest document in document order, dispatches on each
//! `<link>` element's `rel` attribute, acquires script text where required
//! (inline fragment, remote fetch, or dynamic package install) and invokes the
//! caller's [`weld_traits::ResolveHooks`] to obtain bound addresses. Resolved
//! elements gain a `boundUrl` attribute and an entry in the [`BindingsTable`].
//!
//! The engine never executes acquired script text; execution is a host
//! capability exercised through the hooks.

mod acquire;
mod bindings;
mod error;
mod options;
mod resolver;

pub use acquire::ModuleScript;
pub use bindings::{Binding, BindingsTable};
pub use error::ResolveError;
pub use options::{ModuleText, ResolveOptions};
pub use resolver::LinkResolver;
