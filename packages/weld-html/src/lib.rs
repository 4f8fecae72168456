//! HTML parsing and serialization for Weld manifest documents.
//!
//! Converts markup text into a [`weld_dom::Document`] through an
//! implementation of html5ever's `TreeSink`, and back into markup through
//! html5ever's serializer. Parse → serialize is structurally lossless for
//! documents the resolver does not mutate (modulo the html/head/body
//! normalization the HTML parsing algorithm itself performs).

mod html_sink;
mod serializer;

pub use html_sink::{DocumentHtmlParser, parse_html};
pub use serializer::{SerializableNode, serialize_document, serialize_node};
