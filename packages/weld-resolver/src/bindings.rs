use std::path::PathBuf;

/// The result of resolving one link element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// The link's `name` attribute, the key in the bindings table.
    pub name: String,
    /// Local filesystem path of the acquired script, for module-mode host
    /// scripts. `None` for directories, inline scripts and remote scripts.
    pub local_path: Option<PathBuf>,
    /// The runtime address the host hook bound the reference to.
    pub bound_address: String,
    /// The acquired script source, when acquisition was not deferred.
    pub script_text: Option<String>,
}

/// The complete name→binding map produced by one resolution run.
///
/// Entries are kept in insertion (document) order; lookups observe the first
/// entry with a matching name. Inserting a duplicate name replaces the
/// existing binding in place, so the table stays a map while preserving the
/// position of the first occurrence.
#[derive(Debug, Default)]
pub struct BindingsTable {
    inner: Vec<Binding>,
}

impl BindingsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, binding: Binding) {
        match self.inner.iter_mut().find(|b| b.name == binding.name) {
            Some(existing) => *existing = binding,
            None => self.inner.push(binding),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.inner.iter().find(|b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.inner.iter()
    }

    /// Project the table into environment-variable-style entries
    /// `BINDING_<name> = bound_address`, in table order.
    pub fn env_vars(&self) -> impl Iterator<Item = (String, String)> {
        self.inner
            .iter()
            .map(|b| (format!("BINDING_{}", b.name), b.bound_address.clone()))
    }
}

impl<'a> IntoIterator for &'a BindingsTable {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}
