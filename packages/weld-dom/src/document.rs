use std::ops::{Index, IndexMut};

use markup5ever::{QualName, local_name};
use slab::Slab;

use crate::attributes::Attribute;
use crate::node::{CommentData, ElementData, Node, NodeData, SourceLocation, TextNodeData};

/// Error returned by [`Document::append_text_to_node`]
pub enum AppendTextErr {
    /// The node is not a text node
    NotTextNode,
}

/// The in-memory tree of Element/Text/Comment nodes derived from parsed markup.
///
/// Nodes live in a slab and are addressed by `usize` ids; id 0 is always the
/// document root. The tree holds a single ownership edge per node (its slot in
/// the parent's `children` list); every navigation accessor is computed from
/// that list and the node's position in it.
pub struct Document {
    pub nodes: Slab<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        let mut nodes = Slab::new();
        let root_id = nodes.insert(Node::new(0, NodeData::Document));
        debug_assert_eq!(root_id, 0);
        Document { nodes }
    }

    /// The id of the document root node (always 0)
    pub fn root_id(&self) -> usize {
        0
    }

    pub fn get_node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: usize) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    // Creation

    pub fn create_node(&mut self, data: NodeData) -> usize {
        let entry = self.nodes.vacant_entry();
        let id = entry.key();
        entry.insert(Node::new(id, data));
        id
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> usize {
        self.create_node(NodeData::Element(ElementData::new(name, attrs)))
    }

    pub fn create_element_with_location(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        location: Option<SourceLocation>,
    ) -> usize {
        self.create_node(NodeData::Element(ElementData::with_location(
            name, attrs, location,
        )))
    }

    pub fn create_text_node(&mut self, text: &str) -> usize {
        self.create_node(NodeData::Text(TextNodeData::new(text.to_string())))
    }

    pub fn create_comment_node(&mut self, text: &str) -> usize {
        self.create_node(NodeData::Comment(CommentData::new(text.to_string())))
    }

    // Mutation

    pub fn append_children(&mut self, parent_id: usize, child_ids: &[usize]) {
        for child_id in child_ids.iter().copied() {
            self.nodes[parent_id].children.push(child_id);
            let old_parent = self.nodes[child_id].parent.replace(parent_id);
            if let Some(old_parent_id) = old_parent {
                self.nodes[old_parent_id]
                    .children
                    .retain(|id| *id != child_id);
            }
        }
    }

    /// Insert the given nodes as siblings immediately before `anchor_id`
    pub fn insert_nodes_before(&mut self, anchor_id: usize, new_node_ids: &[usize]) {
        let parent_id = self.nodes[anchor_id]
            .parent
            .expect("insert_nodes_before called on node without parent");
        let anchor_idx = self.nodes[parent_id]
            .children
            .iter()
            .position(|id| *id == anchor_id)
            .unwrap();
        for (i, id) in new_node_ids.iter().copied().enumerate() {
            let old_parent = self.nodes[id].parent.replace(parent_id);
            if let Some(old_parent_id) = old_parent {
                self.nodes[old_parent_id].children.retain(|cid| *cid != id);
            }
            self.nodes[parent_id].children.insert(anchor_idx + i, id);
        }
    }

    /// Unlink a node from its parent, keeping it (and its subtree) alive for
    /// re-insertion elsewhere
    pub fn detach(&mut self, node_id: usize) {
        if let Some(parent_id) = self.nodes[node_id].parent.take() {
            self.nodes[parent_id].children.retain(|id| *id != node_id);
        }
    }

    /// Detach a node from its parent and drop it together with its subtree
    pub fn remove_node(&mut self, node_id: usize) {
        if let Some(parent_id) = self.nodes[node_id].parent {
            self.nodes[parent_id].children.retain(|id| *id != node_id);
        }
        self.drop_subtree(node_id);
    }

    fn drop_subtree(&mut self, node_id: usize) {
        let children = std::mem::take(&mut self.nodes[node_id].children);
        for child_id in children {
            self.drop_subtree(child_id);
        }
        self.nodes.remove(node_id);
    }

    /// Remove all of the children from `old_parent_id` and append them to `new_parent_id`
    pub fn reparent_children(&mut self, old_parent_id: usize, new_parent_id: usize) {
        let child_ids = std::mem::take(&mut self.nodes[old_parent_id].children);
        self.append_children(new_parent_id, &child_ids);
    }

    pub fn append_text_to_node(&mut self, node_id: usize, text: &str) -> Result<(), AppendTextErr> {
        match self.nodes[node_id].text_data_mut() {
            Some(data) => {
                data.content.push_str(text);
                Ok(())
            }
            None => Err(AppendTextErr::NotTextNode),
        }
    }

    /// Set an attribute, replacing the value of the first existing attribute
    /// with the same name (elements only; no-op otherwise)
    pub fn set_attr(&mut self, node_id: usize, name: QualName, value: &str) {
        if let Some(element) = self.nodes[node_id].element_data_mut() {
            element.attrs.set(name, value);
        }
    }

    pub fn remove_attr(&mut self, node_id: usize, name: &QualName) -> Option<Attribute> {
        self.nodes[node_id].element_data_mut()?.attrs.remove(name)
    }

    // Navigation. All of these are pure functions of the parent's child list
    // and the node's position in it.

    /// Get the index of the node in its parent's child list
    pub fn child_index(&self, node_id: usize) -> Option<usize> {
        let parent_id = self.nodes[node_id].parent?;
        self.nodes[parent_id]
            .children
            .iter()
            .position(|id| *id == node_id)
    }

    /// Get the nth-next node in the parent's child list
    pub fn forward(&self, node_id: usize, n: usize) -> Option<&Node> {
        let parent_id = self.nodes[node_id].parent?;
        let child_idx = self.child_index(node_id).unwrap_or(0);
        self.nodes[parent_id]
            .children
            .get(child_idx + n)
            .map(|id| &self.nodes[*id])
    }

    /// Get the nth-previous node in the parent's child list
    pub fn backward(&self, node_id: usize, n: usize) -> Option<&Node> {
        let parent_id = self.nodes[node_id].parent?;
        let child_idx = self.child_index(node_id).unwrap_or(0);
        if child_idx < n {
            return None;
        }
        self.nodes[parent_id]
            .children
            .get(child_idx - n)
            .map(|id| &self.nodes[*id])
    }

    pub fn parent_element_id(&self, node_id: usize) -> Option<usize> {
        let parent_id = self.nodes[node_id].parent?;
        self.nodes[parent_id].is_element().then_some(parent_id)
    }

    pub fn next_sibling_id(&self, node_id: usize) -> Option<usize> {
        self.forward(node_id, 1).map(|node| node.id)
    }

    pub fn previous_sibling_id(&self, node_id: usize) -> Option<usize> {
        self.backward(node_id, 1).map(|node| node.id)
    }

    pub fn next_element_sibling_id(&self, node_id: usize) -> Option<usize> {
        let parent_id = self.nodes[node_id].parent?;
        let child_idx = self.child_index(node_id)?;
        self.nodes[parent_id].children[child_idx + 1..]
            .iter()
            .copied()
            .find(|id| self.nodes[*id].is_element())
    }

    pub fn previous_element_sibling_id(&self, node_id: usize) -> Option<usize> {
        let parent_id = self.nodes[node_id].parent?;
        let child_idx = self.child_index(node_id)?;
        self.nodes[parent_id].children[..child_idx]
            .iter()
            .copied()
            .rev()
            .find(|id| self.nodes[*id].is_element())
    }

    pub fn first_child_id(&self, node_id: usize) -> Option<usize> {
        self.nodes[node_id].children.first().copied()
    }

    pub fn last_child_id(&self, node_id: usize) -> Option<usize> {
        self.nodes[node_id].children.last().copied()
    }

    pub fn first_element_child_id(&self, node_id: usize) -> Option<usize> {
        self.nodes[node_id]
            .children
            .iter()
            .copied()
            .find(|id| self.nodes[*id].is_element())
    }

    pub fn last_element_child_id(&self, node_id: usize) -> Option<usize> {
        self.nodes[node_id]
            .children
            .iter()
            .copied()
            .rev()
            .find(|id| self.nodes[*id].is_element())
    }

    // Lookup

    /// Find the first element in document order with the specified id attribute
    pub fn get_element_by_id(&self, id: &str) -> Option<usize> {
        self.find(self.root_id(), |doc, node_id| {
            let node = &doc[node_id];
            (node.attr(local_name!("id")) == Some(id)).then_some(node_id)
        })
    }

    pub fn element_name(&self, node_id: usize) -> Option<&QualName> {
        self.nodes[node_id].element_data().map(|el| &el.name)
    }

    /// The concatenated content of all text nodes in the subtree
    pub fn text_content(&self, node_id: usize) -> String {
        let mut out = String::new();
        self.write_text_content(node_id, &mut out);
        out
    }

    fn write_text_content(&self, node_id: usize, out: &mut String) {
        let node = &self.nodes[node_id];
        match &node.data {
            NodeData::Text(data) => out.push_str(&data.content),
            NodeData::Document | NodeData::Element(..) => {
                for child_id in node.children.iter() {
                    self.write_text_content(*child_id, out);
                }
            }
            NodeData::Comment(..) => {}
        }
    }

    pub fn print_tree(&self, node_id: usize, level: usize) {
        let node = &self.nodes[node_id];
        println!(
            "{} {} {:?} {} {:?}",
            "  ".repeat(level),
            node.id,
            node.parent,
            node.node_debug_str().replace('\n', ""),
            node.children
        );
        for child_id in node.children.iter() {
            self.print_tree(*child_id, level + 1)
        }
    }
}

impl Index<usize> for Document {
    type Output = Node;
    fn index(&self, id: usize) -> &Node {
        &self.nodes[id]
    }
}

impl IndexMut<usize> for Document {
    fn index_mut(&mut self, id: usize) -> &mut Node {
        &mut self.nodes[id]
    }
}

#[cfg(test)]
mod tests {
    use markup5ever::{LocalName, local_name, ns};

    use super::*;

    fn qual(local: &str) -> QualName {
        QualName::new(None, ns!(html), LocalName::from(local))
    }

    fn attr(name: &str, value: &str) -> Attribute {
        Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string(),
        }
    }

    /// Builds `<div><span/>text<p/></div>` under the root and returns the ids
    fn build_sample(doc: &mut Document) -> (usize, usize, usize, usize) {
        let div = doc.create_element(qual("div"), vec![]);
        let span = doc.create_element(qual("span"), vec![]);
        let text = doc.create_text_node("text");
        let p = doc.create_element(qual("p"), vec![]);
        doc.append_children(div, &[span, text, p]);
        doc.append_children(doc.root_id(), &[div]);
        (div, span, text, p)
    }

    #[test]
    fn parent_child_invariant() {
        let mut doc = Document::new();
        let (div, span, text, p) = build_sample(&mut doc);

        for id in [span, text, p] {
            let parent = doc[id].parent.unwrap();
            assert_eq!(parent, div);
            let occurrences = doc[parent].children.iter().filter(|c| **c == id).count();
            assert_eq!(occurrences, 1);
        }
    }

    #[test]
    fn computed_sibling_navigation() {
        let mut doc = Document::new();
        let (div, span, text, p) = build_sample(&mut doc);

        assert_eq!(doc.next_sibling_id(span), Some(text));
        assert_eq!(doc.next_sibling_id(p), None);
        assert_eq!(doc.previous_sibling_id(text), Some(span));
        assert_eq!(doc.previous_sibling_id(span), None);

        assert_eq!(doc.next_element_sibling_id(span), Some(p));
        assert_eq!(doc.previous_element_sibling_id(p), Some(span));

        assert_eq!(doc.first_child_id(div), Some(span));
        assert_eq!(doc.last_child_id(div), Some(p));
        assert_eq!(doc.first_element_child_id(div), Some(span));
        assert_eq!(doc.last_element_child_id(div), Some(p));
        assert_eq!(doc.parent_element_id(text), Some(div));
        assert_eq!(doc.parent_element_id(div), None); // parent is the document
    }

    #[test]
    fn reappending_moves_node() {
        let mut doc = Document::new();
        let (div, span, text, p) = build_sample(&mut doc);

        // Move span to the end; it must not be duplicated in the child list
        doc.append_children(div, &[span]);
        assert_eq!(doc[div].children, vec![text, p, span]);
        assert_eq!(doc.last_child_id(div), Some(span));
        assert_eq!(doc[span].parent, Some(div));
    }

    #[test]
    fn attribute_first_match_semantics() {
        let mut doc = Document::new();
        let el = doc.create_element(
            qual("link"),
            vec![attr("rel", "directory"), attr("rel", "shadowed")],
        );
        assert_eq!(doc[el].attr(local_name!("rel")), Some("directory"));

        // set rewrites the first occurrence in place
        doc.set_attr(el, QualName::new(None, ns!(), local_name!("rel")), "other");
        assert_eq!(doc[el].attr(local_name!("rel")), Some("other"));

        // remove drops the first occurrence, unveiling the duplicate
        doc.remove_attr(el, &QualName::new(None, ns!(), local_name!("rel")));
        assert_eq!(doc[el].attr(local_name!("rel")), Some("shadowed"));
    }

    #[test]
    fn get_element_by_id_returns_first_in_document_order() {
        let mut doc = Document::new();
        let a = doc.create_element(qual("div"), vec![attr("id", "x")]);
        let b = doc.create_element(qual("div"), vec![attr("id", "x")]);
        doc.append_children(doc.root_id(), &[a, b]);
        assert_eq!(doc.get_element_by_id("x"), Some(a));
        assert_eq!(doc.get_element_by_id("missing"), None);
    }

    #[test]
    fn text_content_concatenates_subtree() {
        let mut doc = Document::new();
        let (div, _span, _text, p) = build_sample(&mut doc);
        let inner = doc.create_text_node("more");
        doc.append_children(p, &[inner]);
        assert_eq!(doc.text_content(div), "textmore");
    }
}
