//! html5ever-backed parsing into the owned snapshot

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document as html5ever_parse, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use tracing::trace;

use super::{Attribute, Document, Element, Node};

/// Parse a full document or a body fragment. Fragments are placed inside a
/// synthesized `<html><body>` exactly as a browser would.
pub fn parse_document(html: &str) -> Document {
    let dom = html5ever_parse(RcDom::default(), ParseOpts::default()).one(html);

    let mut doctype = None;
    let mut root = None;
    for child in dom.document.children.borrow().iter() {
        match &child.data {
            NodeData::Doctype { name, .. } => doctype = Some(name.to_string()),
            NodeData::Element { .. } => {
                if let Some(Node::Element(el)) = convert(child) {
                    root = Some(el);
                }
            }
            _ => {}
        }
    }

    trace!(has_doctype = doctype.is_some(), "Parsed HTML document");

    Document {
        doctype,
        root: root.unwrap_or_else(|| Element::new("html")),
    }
}

fn convert(handle: &Handle) -> Option<Node> {
    match &handle.data {
        NodeData::Element {
            name,
            attrs,
            template_contents,
            ..
        } => {
            let attrs = attrs
                .borrow()
                .iter()
                .map(|attr| {
                    let name = match &attr.name.prefix {
                        Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                        None => attr.name.local.to_string(),
                    };
                    Attribute::new(name, attr.value.to_string())
                })
                .collect();

            let mut children: Vec<Node> = handle.children.borrow().iter().filter_map(convert).collect();
            if let Some(contents) = template_contents.borrow().as_ref() {
                children.extend(contents.children.borrow().iter().filter_map(convert));
            }

            Some(Node::Element(Element {
                tag: name.local.to_string(),
                attrs,
                children,
            }))
        }
        NodeData::Text { contents } => Some(Node::Text(contents.borrow().to_string())),
        NodeData::Comment { contents } => Some(Node::Comment(contents.to_string())),
        _ => None,
    }
}
