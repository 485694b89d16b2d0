//! Block extraction
//!
//! Splits a document's `<main>` into the ordered block list the sequence diff
//! works on. Sections (`main > div`) are flattened into one stream with a
//! boundary between them, then blocks between `block-group-start` and
//! `block-group-end` markers are collapsed into groups.

use tracing::debug;

use crate::block::{Block, HashedBlock};
use crate::dom::{Document, Element};

/// Class prefix of the block that opens a group
pub const GROUP_START_CLASS: &str = "block-group-start";

/// Class prefix of the block that closes a group
pub const GROUP_END_CLASS: &str = "block-group-end";

/// The flattened stream before groups are collapsed
#[derive(Debug, Clone, PartialEq, Eq)]
enum Extracted<'a> {
    Standalone(Block<'a>),
    GroupStart(&'a Element),
    GroupEnd(&'a Element),
}

impl<'a> Extracted<'a> {
    fn classify(el: &'a Element) -> Self {
        let class = el.class_name().to_lowercase();
        if class.starts_with(GROUP_START_CLASS) {
            Extracted::GroupStart(el)
        } else if class.starts_with(GROUP_END_CLASS) {
            Extracted::GroupEnd(el)
        } else {
            Extracted::Standalone(Block::Element(el))
        }
    }
}

/// Section elements (`main > div`) in document order; empty without `<main>`
pub fn sections(doc: &Document) -> Vec<&Element> {
    doc.main()
        .map(|main| main.element_children().filter(|el| el.is_tag("div")).collect())
        .unwrap_or_default()
}

/// Extract and hash the blocks of a document
pub fn extract_blocks(doc: &Document) -> Vec<HashedBlock<'_>> {
    let sections = sections(doc);
    let blocks = collapse_groups(flatten(&sections));
    debug!(
        sections = sections.len(),
        blocks = blocks.len(),
        "Extracted document blocks"
    );
    blocks.into_iter().map(HashedBlock::new).collect()
}

/// Concatenate section children, dropping empty paragraphs. A boundary goes
/// between sections once at least one block has been emitted.
fn flatten<'a>(sections: &[&'a Element]) -> Vec<Extracted<'a>> {
    let mut stream = Vec::new();
    for &section in sections {
        if !stream.is_empty() {
            stream.push(Extracted::Standalone(Block::SectionBoundary));
        }
        stream.extend(
            section
                .element_children()
                .filter(|el| !el.is_empty_paragraph())
                .map(Extracted::classify),
        );
    }
    stream
}

fn collapse_groups(stream: Vec<Extracted<'_>>) -> Vec<Block<'_>> {
    let mut blocks = Vec::with_capacity(stream.len());
    let mut open: Option<Vec<Block<'_>>> = None;

    for item in stream {
        match item {
            Extracted::GroupStart(el) => {
                open.get_or_insert_with(Vec::new).push(Block::Element(el));
            }
            Extracted::GroupEnd(el) => {
                let mut group = open.take().unwrap_or_default();
                group.push(Block::Element(el));
                blocks.push(Block::Group(group));
            }
            Extracted::Standalone(block) => match open.as_mut() {
                Some(group) => group.push(block),
                None => blocks.push(block),
            },
        }
    }

    // A group left open at the end of the document is still a group
    if let Some(group) = open.filter(|group| !group.is_empty()) {
        blocks.push(Block::Group(group));
    }

    blocks
}
