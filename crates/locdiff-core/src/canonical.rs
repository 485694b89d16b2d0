//! Canonical serialization for content hashing
//!
//! Two elements that render the same modulo formatting produce the same
//! canonical string:
//!
//! 1. Text nodes are trimmed
//! 2. Attributes are sorted by name at every level
//! 3. Attribute values and text are escaped (`& " < >`)
//! 4. Whitespace between tags, newlines and tabs are removed
//! 5. Runs of whitespace collapse to one space
//!
//! The output is only ever hashed. It is not valid for rendering.

use std::sync::LazyLock;

use regex::Regex;

use crate::dom::serialize::is_void_element;
use crate::dom::{Element, Node};

/// Canonical form of a section boundary. Real content always starts with
/// `<`, so this can never collide with an element.
pub const SECTION_BOUNDARY_SENTINEL: &str = "locdiff:section-boundary";

static BETWEEN_TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">\s+<").unwrap());
static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\n\r\t]").unwrap());
static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

/// Canonical string for one element
///
/// # Examples
///
/// ```
/// use locdiff_core::canonical::canonicalize_element;
/// use locdiff_core::Document;
///
/// let a = Document::parse(r#"<p class="x" id="y">  Hello  </p>"#);
/// let b = Document::parse(r#"<p id="y" class="x">Hello</p>"#);
/// assert_eq!(
///     canonicalize_element(a.root.find_first("p").unwrap()),
///     canonicalize_element(b.root.find_first("p").unwrap()),
/// );
/// ```
pub fn canonicalize_element(el: &Element) -> String {
    let mut raw = String::new();
    write_sorted(el, &mut raw);

    let html = BETWEEN_TAGS.replace_all(&raw, "><");
    let html = LINE_BREAKS.replace_all(&html, "");
    let html = WHITESPACE_RUNS.replace_all(&html, " ");
    html.trim().to_string()
}

fn write_sorted(el: &Element, out: &mut String) {
    let tag = el.tag.to_ascii_lowercase();

    let mut attrs: Vec<_> = el.attrs.iter().collect();
    attrs.sort_by(|a, b| a.name.cmp(&b.name));

    out.push('<');
    out.push_str(&tag);
    for attr in attrs {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        escape(&attr.value, out);
        out.push('"');
    }
    out.push('>');

    if is_void_element(&tag) {
        return;
    }

    for child in &el.children {
        match child {
            Node::Element(child) => write_sorted(child, out),
            Node::Text(text) => escape(text.trim(), out),
            Node::Comment(text) => {
                out.push_str("<!--");
                out.push_str(&text.replace("-->", "--&gt;"));
                out.push_str("-->");
            }
        }
    }

    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

fn escape(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn first<'a>(doc: &'a Document, tag: &str) -> &'a Element {
        doc.root.find_first(tag).unwrap()
    }

    #[test]
    fn test_attribute_order_ignored() {
        let a = Document::parse(r#"<main><div><img src="a.png" alt="A" width="10"></div></main>"#);
        let b = Document::parse(r#"<main><div><img width="10" alt="A" src="a.png"></div></main>"#);
        assert_eq!(canonicalize_element(first(&a, "img")), canonicalize_element(first(&b, "img")));
        assert_eq!(
            canonicalize_element(first(&a, "img")),
            r#"<img alt="A" src="a.png" width="10">"#
        );
    }

    #[test]
    fn test_formatting_whitespace_ignored() {
        let a = Document::parse("<main><div><ul>\n  <li>One</li>\n\t<li>  Two </li>\n</ul></div></main>");
        let b = Document::parse("<main><div><ul><li>One</li><li>Two</li></ul></div></main>");
        assert_eq!(canonicalize_element(first(&a, "ul")), "<ul><li>One</li><li>Two</li></ul>");
        assert_eq!(canonicalize_element(first(&a, "ul")), canonicalize_element(first(&b, "ul")));
    }

    #[test]
    fn test_inner_spaces_collapse() {
        let el = Element::new("p").with_text("a    b");
        assert_eq!(canonicalize_element(&el), "<p>a b</p>");
    }

    #[test]
    fn test_text_escaped() {
        let el = Element::new("p").with_attr("title", "\"q\"").with_text("a < b & c");
        assert_eq!(
            canonicalize_element(&el),
            r#"<p title="&quot;q&quot;">a &lt; b &amp; c</p>"#
        );
    }

    #[test]
    fn test_comment_close_sequence_escaped() {
        let el = Element::new("div").with_child(Node::Comment(" a --> b ".into()));
        assert_eq!(canonicalize_element(&el), "<div><!-- a --&gt; b --></div>");
    }

    #[test]
    fn test_void_children_dropped() {
        let el = Element::new("br").with_text("ignored");
        assert_eq!(canonicalize_element(&el), "<br>");
    }

    #[test]
    fn test_child_order_matters() {
        let a = Element::new("div")
            .with_child(Element::new("p").with_text("1"))
            .with_child(Element::new("p").with_text("2"));
        let b = Element::new("div")
            .with_child(Element::new("p").with_text("2"))
            .with_child(Element::new("p").with_text("1"));
        assert_ne!(canonicalize_element(&a), canonicalize_element(&b));
    }

    #[test]
    fn test_sentinel_cannot_match_element() {
        assert!(!SECTION_BOUNDARY_SENTINEL.starts_with('<'));
    }
}
