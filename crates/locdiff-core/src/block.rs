//! Diffable blocks

use crate::canonical::{canonicalize_element, SECTION_BOUNDARY_SENTINEL};
use crate::dom::Element;
use crate::hash::{hash_concat, hash_str, ContentHash};

/// One unit of diffable content
///
/// Element and group blocks borrow from the document snapshot. Only a merged
/// list, rebuilt by list reconciliation, owns its element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    /// A top-level child of a section
    Element(&'a Element),
    /// Marks where one section ends and the next begins
    SectionBoundary,
    /// Consecutive blocks between group markers. Members are only ever
    /// `Element` or `SectionBoundary`.
    Group(Vec<Block<'a>>),
    /// A list whose children were diffed individually and already carry markers
    MergedList(Box<Element>),
}

impl<'a> Block<'a> {
    pub fn is_section_boundary(&self) -> bool {
        matches!(self, Block::SectionBoundary)
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Block::Group(_))
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Block::Element(el) => Some(*el),
            Block::MergedList(el) => Some(el.as_ref()),
            _ => None,
        }
    }

    /// Borrowed `ul`/`ol` element, if this block is a plain list
    pub fn as_list(&self) -> Option<&'a Element> {
        match self {
            Block::Element(el) if is_list(el) => Some(*el),
            _ => None,
        }
    }

    /// Canonical serialization; groups concatenate their members
    pub fn canonical(&self) -> String {
        match self {
            Block::Element(el) => canonicalize_element(el),
            Block::SectionBoundary => SECTION_BOUNDARY_SENTINEL.to_string(),
            Block::Group(members) => members.iter().map(Block::canonical).collect(),
            Block::MergedList(el) => canonicalize_element(el),
        }
    }

    pub fn content_hash(&self) -> ContentHash {
        match self {
            Block::Group(members) => {
                let parts: Vec<String> = members.iter().map(Block::canonical).collect();
                hash_concat(parts.iter().map(String::as_str))
            }
            other => hash_str(&other.canonical()),
        }
    }

    /// Short label for logs
    pub fn label(&self) -> String {
        match self {
            Block::Element(el) => el.tag.clone(),
            Block::SectionBoundary => "section".to_string(),
            Block::Group(members) => format!("group[{}]", members.len()),
            Block::MergedList(el) => format!("merged-{}", el.tag),
        }
    }
}

/// A block paired with the hash of its canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedBlock<'a> {
    pub block: Block<'a>,
    pub hash: ContentHash,
}

impl<'a> HashedBlock<'a> {
    pub fn new(block: Block<'a>) -> Self {
        let hash = block.content_hash();
        Self { block, hash }
    }
}

pub fn is_list(el: &Element) -> bool {
    el.is_tag("ul") || el.is_tag("ol")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_hash_is_concatenation() {
        let a = Element::new("p").with_text("a");
        let b = Element::new("p").with_text("b");
        let group = Block::Group(vec![Block::Element(&a), Block::SectionBoundary, Block::Element(&b)]);
        let expected = format!("<p>a</p>{}<p>b</p>", SECTION_BOUNDARY_SENTINEL);
        assert_eq!(group.canonical(), expected);
        assert_eq!(group.content_hash(), hash_str(&expected));
    }

    #[test]
    fn test_boundaries_share_a_hash() {
        assert_eq!(
            Block::SectionBoundary.content_hash(),
            Block::SectionBoundary.content_hash()
        );
    }

    #[test]
    fn test_as_list() {
        let ul = Element::new("ul");
        let p = Element::new("p");
        assert!(Block::Element(&ul).as_list().is_some());
        assert!(Block::Element(&p).as_list().is_none());
        assert!(Block::MergedList(Box::new(ul.clone())).as_list().is_none());
    }
}
