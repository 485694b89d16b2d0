//! Marker removal
//!
//! Accepting a regional diff means keeping the modified content: deletions
//! and transitional elements are dropped, additions are unwrapped in place.

use tracing::debug;

use crate::dom::{Document, Element, Node};
use crate::markers::{ADDED_TAG, DELETED_TAG, LEGACY_ADDED_TAG, LEGACY_DELETED_TAG, TEMP_ATTR};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CleanupStats {
    pub removed: usize,
    pub unwrapped: usize,
}

/// Strip every diff marker from the document
pub fn remove_markers(doc: &mut Document) -> CleanupStats {
    let stats = remove_markers_in(&mut doc.root);
    debug!(removed = stats.removed, unwrapped = stats.unwrapped, "Removed diff markers");
    stats
}

/// Strip diff markers below `el`. `el` itself is kept even if it is a marker.
pub fn remove_markers_in(el: &mut Element) -> CleanupStats {
    let mut stats = CleanupStats::default();
    clean(el, &mut stats);
    stats
}

fn clean(el: &mut Element, stats: &mut CleanupStats) {
    el.remove_attr(ADDED_TAG);

    let children = std::mem::take(&mut el.children);
    let mut kept = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Node::Element(child) if is_removed(&child) => stats.removed += 1,
            Node::Element(mut child) if is_unwrapped(&child) => {
                clean(&mut child, stats);
                stats.unwrapped += 1;
                kept.extend(child.children);
            }
            Node::Element(mut child) => {
                clean(&mut child, stats);
                kept.push(Node::Element(child));
            }
            other => kept.push(other),
        }
    }
    el.children = kept;
}

fn is_removed(el: &Element) -> bool {
    el.is_tag(DELETED_TAG) || el.is_tag(LEGACY_DELETED_TAG) || el.has_attr(TEMP_ATTR)
}

fn is_unwrapped(el: &Element) -> bool {
    el.is_tag(ADDED_TAG) || el.is_tag(LEGACY_ADDED_TAG)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned(html: &str) -> String {
        let mut doc = Document::parse(html);
        remove_markers(&mut doc);
        doc.main().map(Element::inner_html).unwrap_or_default()
    }

    #[test]
    fn test_deleted_removed_added_unwrapped() {
        assert_eq!(
            cleaned("<main><div><da-diff-deleted><p>old</p></da-diff-deleted><da-diff-added><p>new</p></da-diff-added></div></main>"),
            "<div><p>new</p></div>"
        );
    }

    #[test]
    fn test_list_item_markers() {
        assert_eq!(
            cleaned("<main><div><ul><li>a</li><li><da-diff-deleted>b</da-diff-deleted></li><li><da-diff-added>c</da-diff-added></li></ul></div></main>"),
            "<div><ul><li>a</li><li></li><li>c</li></ul></div>"
        );
    }

    #[test]
    fn test_legacy_and_temp_elements() {
        assert_eq!(
            cleaned(r#"<main><div><da-loc-deleted><p>x</p></da-loc-deleted><da-loc-added><p>y</p></da-loc-added><p loc-temp-dom="">t</p></div></main>"#),
            "<div><p>y</p></div>"
        );
    }

    #[test]
    fn test_added_attribute_dropped() {
        assert_eq!(
            cleaned(r#"<main><div><p da-diff-added="" class="k">z</p></div></main>"#),
            r#"<div><p class="k">z</p></div>"#
        );
    }

    #[test]
    fn test_nested_markers_and_stats() {
        let mut doc = Document::parse(
            r#"<main><div><da-diff-added class="da-group"><div><p>a</p><da-diff-deleted><p>b</p></da-diff-deleted></div></da-diff-added></div></main>"#,
        );
        let stats = remove_markers(&mut doc);
        assert_eq!(stats, CleanupStats { removed: 1, unwrapped: 1 });
        assert_eq!(doc.main().unwrap().inner_html(), "<div><div><p>a</p></div></div>");
    }
}
