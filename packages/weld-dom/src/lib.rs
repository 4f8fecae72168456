//! The document model at the heart of Weld.
//!
//! This crate implements a small headless DOM ([`Document`]): a slab arena of
//! [`Node`]s addressed by `usize` ids, with parent/sibling navigation computed
//! from each node's position in its parent's child list rather than stored as
//! separate links. It is designed to be built by an external parser (see the
//! weld-html crate) and walked by the resolution engine in weld-resolver.
//!
//! Also provided are the two traversal primitives the resolver is built on:
//! a synchronous short-circuiting [`Document::find`] and the suspending
//! [`traverse`] driven by a [`NodeVisitor`].

mod attributes;
mod document;
mod node;
mod traversal;

pub use attributes::{Attribute, Attributes};
pub use document::{AppendTextErr, Document};
pub use markup5ever::{
    LocalName, Namespace, Prefix, QualName, local_name, namespace_prefix, namespace_url, ns,
};
pub use node::{CommentData, ElementData, Node, NodeData, SourceLocation, TextNodeData};
pub use traversal::{NodeVisitor, traverse};
