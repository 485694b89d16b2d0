//! Value-typed HTML snapshot
//!
//! Documents are parsed once into an owned tree of [`Element`]s. The diff
//! borrows this snapshot immutably; every annotated output is built as a
//! fresh tree, so no stage ever mutates content another stage is reading.

mod parse;
pub mod serialize;

pub use parse::parse_document;

/// A single `name="value"` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Any node that can appear inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// An element with its attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder-style text append
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|attr| attr.name == name)
    }

    /// Overwrite an existing attribute in place or append a new one
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|attr| attr.name == name) {
            Some(attr) => attr.value = value,
            None => self.attrs.push(Attribute { name, value }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let index = self.attrs.iter().position(|attr| attr.name == name)?;
        Some(self.attrs.remove(index).value)
    }

    /// Value of the `class` attribute, empty when absent
    pub fn class_name(&self) -> &str {
        self.attr("class").unwrap_or("")
    }

    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(self, &mut text);
        text
    }

    /// `<p>` with no child nodes at all
    pub fn is_empty_paragraph(&self) -> bool {
        self.is_tag("p") && self.children.is_empty()
    }

    /// First descendant (depth-first, document order) with the given tag
    pub fn find_first(&self, tag: &str) -> Option<&Element> {
        for child in self.element_children() {
            if child.is_tag(tag) {
                return Some(child);
            }
            if let Some(found) = child.find_first(tag) {
                return Some(found);
            }
        }
        None
    }

    pub fn find_first_mut(&mut self, tag: &str) -> Option<&mut Element> {
        for child in self.children.iter_mut() {
            if let Node::Element(el) = child {
                if el.is_tag(tag) {
                    return Some(el);
                }
                if let Some(found) = el.find_first_mut(tag) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Visit this element and every descendant element, parents first
    pub fn walk_elements_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Element),
    {
        f(self);
        for child in self.children.iter_mut() {
            if let Node::Element(el) = child {
                el.walk_elements_mut(f);
            }
        }
    }

    pub fn outer_html(&self) -> String {
        serialize::serialize_element(self)
    }

    pub fn inner_html(&self) -> String {
        serialize::serialize_children(self)
    }
}

fn collect_text(el: &Element, out: &mut String) {
    for child in &el.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => collect_text(child, out),
            Node::Comment(_) => {}
        }
    }
}

/// A parsed HTML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub doctype: Option<String>,
    /// The `<html>` element
    pub root: Element,
}

impl Document {
    /// Parse HTML with browser-compatible error recovery; never fails
    pub fn parse(html: &str) -> Self {
        parse_document(html)
    }

    /// The content container (`<main>`)
    pub fn main(&self) -> Option<&Element> {
        if self.root.is_tag("main") {
            return Some(&self.root);
        }
        self.root.find_first("main")
    }

    pub fn main_mut(&mut self) -> Option<&mut Element> {
        if self.root.is_tag("main") {
            return Some(&mut self.root);
        }
        self.root.find_first_mut("main")
    }

    /// Swap in a new content container. When the document has no `<main>`
    /// one is appended to `<body>` (or the root if there is no body).
    pub fn replace_main(&mut self, main: Element) {
        if let Some(existing) = self.main_mut() {
            *existing = main;
            return;
        }
        match self.root.find_first_mut("body") {
            Some(body) => body.children.push(Node::Element(main)),
            None => self.root.children.push(Node::Element(main)),
        }
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        if let Some(doctype) = &self.doctype {
            html.push_str("<!DOCTYPE ");
            html.push_str(doctype);
            html.push('>');
        }
        html.push_str(&self.root.outer_html());
        html
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_roundtrip() {
        let mut el = Element::new("a").with_attr("href", "/x");
        assert_eq!(el.attr("href"), Some("/x"));
        el.set_attr("href", "/y");
        assert_eq!(el.attrs.len(), 1);
        assert_eq!(el.remove_attr("href").as_deref(), Some("/y"));
        assert!(!el.has_attr("href"));
    }

    #[test]
    fn test_text_content_skips_comments() {
        let el = Element::new("p")
            .with_text("Hello ")
            .with_child(Node::Comment("hidden".into()))
            .with_child(Element::new("strong").with_text("world"));
        assert_eq!(el.text_content(), "Hello world");
    }

    #[test]
    fn test_empty_paragraph() {
        assert!(Element::new("p").is_empty_paragraph());
        assert!(!Element::new("p").with_text("").is_empty_paragraph());
        assert!(!Element::new("div").is_empty_paragraph());
    }

    #[test]
    fn test_find_first_is_depth_first() {
        let root = Element::new("body")
            .with_child(Element::new("div").with_child(Element::new("main").with_attr("id", "inner")))
            .with_child(Element::new("main").with_attr("id", "outer"));
        assert_eq!(root.find_first("main").unwrap().attr("id"), Some("inner"));
    }

    #[test]
    fn test_replace_main_without_main_appends_to_body() {
        let mut doc = Document::parse("<p>no main here</p>");
        assert!(doc.main().is_none());
        doc.replace_main(Element::new("main").with_text("x"));
        assert_eq!(doc.main().unwrap().text_content(), "x");
    }
}
