//! HTML5 serialization of the snapshot tree

use super::{Element, Node};

/// Elements that never have content or an end tag
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose text children are written verbatim
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| tag.eq_ignore_ascii_case(void))
}

fn is_raw_text_element(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|raw| tag.eq_ignore_ascii_case(raw))
}

/// Outer HTML of an element
pub fn serialize_element(el: &Element) -> String {
    let mut out = String::new();
    write_element(el, &mut out);
    out
}

/// Inner HTML of an element
pub fn serialize_children(el: &Element) -> String {
    let mut out = String::new();
    write_children(el, &mut out);
    out
}

/// Outer HTML of a sequence of nodes
pub fn serialize_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, None, &mut out);
    }
    out
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for attr in &el.attrs {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        escape_attr(&attr.value, out);
        out.push('"');
    }
    out.push('>');

    if is_void_element(&el.tag) {
        return;
    }

    write_children(el, out);
    out.push_str("</");
    out.push_str(&el.tag);
    out.push('>');
}

fn write_children(el: &Element, out: &mut String) {
    for child in &el.children {
        write_node(child, Some(el), out);
    }
}

fn write_node(node: &Node, parent: Option<&Element>, out: &mut String) {
    match node {
        Node::Element(child) => write_element(child, out),
        Node::Text(text) => {
            if parent.is_some_and(|p| is_raw_text_element(&p.tag)) {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        Node::Comment(text) => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
    }
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
