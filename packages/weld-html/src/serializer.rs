//! Markup output through html5ever's serializer, which knows about void
//! elements (`<link>` takes no end tag), attribute/text escaping and the
//! handful of elements whose text content must not be escaped.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};
use weld_dom::{Document, NodeData};

/// One node of a [`Document`], borrowed for serialization.
pub struct SerializableNode<'a> {
    doc: &'a Document,
    id: usize,
}

impl<'a> SerializableNode<'a> {
    pub fn new(doc: &'a Document, id: usize) -> Self {
        Self { doc, id }
    }
}

impl Serialize for SerializableNode<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let node = &self.doc[self.id];
        let include_node = matches!(traversal_scope, TraversalScope::IncludeNode);

        match &node.data {
            NodeData::Element(data) => {
                if include_node {
                    serializer.start_elem(
                        data.name.clone(),
                        data.attrs.iter().map(|attr| (&attr.name, &attr.value[..])),
                    )?;
                }
                for child_id in node.children.iter() {
                    SerializableNode::new(self.doc, *child_id)
                        .serialize(serializer, TraversalScope::IncludeNode)?;
                }
                if include_node {
                    serializer.end_elem(data.name.clone())?;
                }
                Ok(())
            }
            NodeData::Document => {
                for child_id in node.children.iter() {
                    SerializableNode::new(self.doc, *child_id)
                        .serialize(serializer, TraversalScope::IncludeNode)?;
                }
                Ok(())
            }
            NodeData::Text(data) => serializer.write_text(&data.content),
            NodeData::Comment(data) => serializer.write_comment(&data.content),
        }
    }
}

/// Serialize the subtree rooted at `node_id` (the node itself included)
pub fn serialize_node(doc: &Document, node_id: usize) -> io::Result<String> {
    serialize_with_scope(doc, node_id, TraversalScope::IncludeNode)
}

/// Serialize a whole document back into markup text
pub fn serialize_document(doc: &Document) -> io::Result<String> {
    serialize_with_scope(doc, doc.root_id(), TraversalScope::ChildrenOnly(None))
}

fn serialize_with_scope(
    doc: &Document,
    node_id: usize,
    traversal_scope: TraversalScope,
) -> io::Result<String> {
    let mut buf = Vec::new();
    serialize(
        &mut buf,
        &SerializableNode::new(doc, node_id),
        SerializeOpts {
            traversal_scope,
            ..Default::default()
        },
    )?;
    String::from_utf8(buf).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
