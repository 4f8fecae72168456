use std::fmt::Write;

use markup5ever::{LocalName, QualName};

use crate::attributes::{Attribute, Attributes};

/// A node in the document tree.
///
/// Nodes are owned by the [`Document`](crate::Document)'s slab; `parent` and
/// `children` hold slab ids, never owning edges. All sibling navigation is
/// computed from the node's position in its parent's `children` list (see the
/// navigation methods on `Document`), so there is no duplicated
/// forward/backward link to keep in sync.
pub struct Node {
    /// Our id in the owning document's slab
    pub id: usize,
    /// Our parent's id
    pub parent: Option<usize>,
    /// Ids of our children, in document order
    pub children: Vec<usize>,
    /// Node type (Element, Text, etc) specific data
    pub data: NodeData,
}

impl Node {
    pub fn new(id: usize, data: NodeData) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            data,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self.data, NodeData::Element { .. })
    }

    pub fn is_text_node(&self) -> bool {
        matches!(self.data, NodeData::Text { .. })
    }

    pub fn element_data(&self) -> Option<&ElementData> {
        match self.data {
            NodeData::Element(ref data) => Some(data),
            _ => None,
        }
    }

    pub fn element_data_mut(&mut self) -> Option<&mut ElementData> {
        match self.data {
            NodeData::Element(ref mut data) => Some(data),
            _ => None,
        }
    }

    pub fn text_data(&self) -> Option<&TextNodeData> {
        match self.data {
            NodeData::Text(ref data) => Some(data),
            _ => None,
        }
    }

    pub fn text_data_mut(&mut self) -> Option<&mut TextNodeData> {
        match self.data {
            NodeData::Text(ref mut data) => Some(data),
            _ => None,
        }
    }

    /// First-match attribute lookup (elements only)
    pub fn attr(&self, name: impl PartialEq<LocalName>) -> Option<&str> {
        self.element_data()?.attr(name)
    }

    pub fn has_attr(&self, name: impl PartialEq<LocalName>) -> bool {
        self.element_data().is_some_and(|el| el.has_attr(name))
    }

    /// The node's name tag: the tag name for elements, `#text` / `#comment` /
    /// `#document` otherwise.
    pub fn node_name(&self) -> &str {
        match &self.data {
            NodeData::Document => "#document",
            NodeData::Element(data) => &data.name.local,
            NodeData::Text(_) => "#text",
            NodeData::Comment(_) => "#comment",
        }
    }

    pub fn node_debug_str(&self) -> String {
        let mut s = String::new();
        match &self.data {
            NodeData::Document => write!(s, "DOCUMENT"),
            NodeData::Text(data) => {
                let bytes = data.content.as_bytes();
                write!(
                    s,
                    "TEXT {}",
                    &std::str::from_utf8(bytes.split_at(10.min(bytes.len())).0)
                        .unwrap_or("INVALID UTF8")
                )
            }
            NodeData::Comment(_) => write!(s, "COMMENT"),
            NodeData::Element(data) => write!(s, "<{}>", data.name.local),
        }
        .unwrap();
        s
    }
}

/// The different kinds of nodes in the document tree
pub enum NodeData {
    /// The document root
    Document,
    /// An element node
    Element(ElementData),
    /// A text node
    Text(TextNodeData),
    /// A comment node
    Comment(CommentData),
}

/// The position of an element's start tag in the source markup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: u64,
    pub col: u64,
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's tag name, namespace and prefix
    pub name: QualName,

    /// The element's attributes
    pub attrs: Attributes,

    /// Where the element's start tag appeared in the source, if known
    pub location: Option<SourceLocation>,
}

impl ElementData {
    pub fn new(name: QualName, attrs: Vec<Attribute>) -> Self {
        ElementData {
            name,
            attrs: Attributes::new(attrs),
            location: None,
        }
    }

    pub fn with_location(
        name: QualName,
        attrs: Vec<Attribute>,
        location: Option<SourceLocation>,
    ) -> Self {
        ElementData {
            name,
            attrs: Attributes::new(attrs),
            location,
        }
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    pub fn attr(&self, name: impl PartialEq<LocalName>) -> Option<&str> {
        let attr = self.attrs.iter().find(|attr| name == attr.name.local)?;
        Some(&attr.value)
    }

    /// Detects the presence of the attribute, treating *any* value as truthy.
    pub fn has_attr(&self, name: impl PartialEq<LocalName>) -> bool {
        self.attrs.iter().any(|attr| name == attr.name.local)
    }
}

#[derive(Debug, Clone)]
pub struct TextNodeData {
    /// The textual content of the text node
    pub content: String,
}

impl TextNodeData {
    pub fn new(content: String) -> Self {
        Self { content }
    }
}

#[derive(Debug, Clone)]
pub struct CommentData {
    /// The textual content of the comment, without the `<!--` / `-->` markers
    pub content: String,
}

impl CommentData {
    pub fn new(content: String) -> Self {
        Self { content }
    }
}
