//! Pre-order, document-order tree walks with first-match short-circuiting.
//!
//! Both primitives visit a node before any of its children and complete each
//! child's subtree before moving to the next sibling. The suspending variant
//! is strictly sequential: one visit is awaited to completion before the next
//! node is touched. Resolution side effects (hook calls, fetches, process
//! spawns, tree mutation) rely on this ordering, so sibling visits must never
//! be fanned out concurrently.

use crate::Document;

impl Document {
    /// Walk the subtree rooted at `root_id` in pre-order, calling `visitor`
    /// for every node. The first visit returning `Some` stops the walk and
    /// that value is propagated; `None` is returned if the walk is exhausted.
    pub fn find<T>(
        &self,
        root_id: usize,
        mut visitor: impl FnMut(&Document, usize) -> Option<T>,
    ) -> Option<T> {
        let mut stack = vec![root_id];
        while let Some(id) = stack.pop() {
            if let Some(result) = visitor(self, id) {
                return Some(result);
            }
            if let Some(node) = self.get_node(id) {
                stack.extend(node.children.iter().rev());
            }
        }
        None
    }
}

/// A visitor for [`traverse`] which may suspend per node and may mutate the
/// document it is walking.
pub trait NodeVisitor {
    type Output;
    type Error;

    /// Visit one node. `Ok(Some(_))` short-circuits the traversal, `Ok(None)`
    /// continues it, `Err(_)` aborts it.
    fn visit(
        &mut self,
        doc: &mut Document,
        node_id: usize,
    ) -> impl Future<Output = Result<Option<Self::Output>, Self::Error>>;
}

/// Suspending counterpart of [`Document::find`]: same pre-order walk and
/// short-circuit contract, but each visit is awaited before the walk advances.
pub async fn traverse<V: NodeVisitor>(
    doc: &mut Document,
    root_id: usize,
    visitor: &mut V,
) -> Result<Option<V::Output>, V::Error> {
    let mut stack = vec![root_id];
    while let Some(id) = stack.pop() {
        if let Some(result) = visitor.visit(doc, id).await? {
            return Ok(Some(result));
        }
        // Children are read back after the visit so that visitors which
        // mutate the tree see their own changes reflected in the walk.
        if let Some(node) = doc.get_node(id) {
            stack.extend(node.children.iter().rev());
        }
    }
    Ok(None)
}
