//! Document reconstruction
//!
//! Turns the final entry list back into one `<main>` of section `<div>`s:
//!
//! | Entry                 | Output                                                  |
//! |-----------------------|---------------------------------------------------------|
//! | Same block            | unchanged                                               |
//! | Added block           | `<da-diff-added>block</da-diff-added>`                  |
//! | Deleted block         | `<da-diff-deleted>block</da-diff-deleted>`              |
//! | Section boundary      | closes the current section, opens the next              |
//! | Same group            | members inline; inner boundaries split sections         |
//! | Added/Deleted group   | `<marker class="da-group"><div>…</div>…</marker>`       |
//! | Merged list           | unchanged; items already carry markers                  |

use crate::block::Block;
use crate::diff::{DiffEntry, DiffKind};
use crate::dom::{Document, Element, Node};
use crate::markers::{wrap_outer, ADDED_TAG, DELETED_TAG, GROUP_CLASS};

/// Build the merged `<main>`. Attributes of `container` (normally the modified
/// document's `<main>`) are carried over.
pub fn render_main(entries: &[DiffEntry<'_>], container: Option<&Element>) -> Element {
    let mut main = Element::new("main");
    if let Some(container) = container {
        main.attrs = container.attrs.clone();
    }
    if entries.is_empty() {
        return main;
    }

    let mut sections = SectionWriter::default();
    for (index, entry) in entries.iter().enumerate() {
        match &entry.block {
            Block::SectionBoundary => {
                if index != 0 {
                    sections.break_section();
                }
            }
            Block::Element(el) => sections.push(mark((*el).clone(), entry.kind)),
            Block::MergedList(el) => sections.push(el.as_ref().clone()),
            Block::Group(members) => render_group(members, entry.kind, &mut sections),
        }
    }

    main.children = sections.finish();
    main
}

/// Replace the document's `<main>` with the merged one
pub fn install_main(doc: &mut Document, main: Element) {
    doc.replace_main(main);
}

fn mark(el: Element, kind: DiffKind) -> Element {
    match kind {
        DiffKind::Same => el,
        DiffKind::Added => wrap_outer(el, ADDED_TAG),
        DiffKind::Deleted => wrap_outer(el, DELETED_TAG),
    }
}

fn render_group(members: &[Block<'_>], kind: DiffKind, sections: &mut SectionWriter) {
    let chunks = split_on_boundaries(members);
    match kind {
        DiffKind::Same => {
            for (i, chunk) in chunks.into_iter().enumerate() {
                if i > 0 {
                    sections.break_section();
                }
                sections.extend(chunk);
            }
        }
        DiffKind::Added | DiffKind::Deleted => {
            let marker_tag = if kind == DiffKind::Added { ADDED_TAG } else { DELETED_TAG };
            let mut marker = Element::new(marker_tag).with_attr("class", GROUP_CLASS);
            for chunk in chunks {
                let mut section = Element::new("div");
                section.children = chunk;
                marker.children.push(section.into());
            }
            sections.push(marker);
        }
    }
}

/// Group members split into per-section runs; always at least one run
fn split_on_boundaries(members: &[Block<'_>]) -> Vec<Vec<Node>> {
    let mut chunks = vec![Vec::new()];
    for member in members {
        match member {
            Block::SectionBoundary => chunks.push(Vec::new()),
            other => {
                if let Some(el) = other.as_element() {
                    if let Some(chunk) = chunks.last_mut() {
                        chunk.push(Node::Element(el.clone()));
                    }
                }
            }
        }
    }
    chunks
}

#[derive(Default)]
struct SectionWriter {
    done: Vec<Node>,
    current: Vec<Node>,
}

impl SectionWriter {
    fn push(&mut self, el: Element) {
        self.current.push(Node::Element(el));
    }

    fn extend(&mut self, nodes: Vec<Node>) {
        self.current.extend(nodes);
    }

    fn break_section(&mut self) {
        let children = std::mem::take(&mut self.current);
        self.done.push(section(children));
    }

    fn finish(mut self) -> Vec<Node> {
        self.break_section();
        self.done
    }
}

fn section(children: Vec<Node>) -> Node {
    let mut div = Element::new("div");
    div.children = children;
    Node::Element(div)
}
