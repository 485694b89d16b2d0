//! Marker elements written into the merged document

use crate::dom::{Element, Node};

/// Wraps content present only in the modified document
pub const ADDED_TAG: &str = "da-diff-added";

/// Wraps content present only in the original document
pub const DELETED_TAG: &str = "da-diff-deleted";

/// Class set on markers that wrap a block group
pub const GROUP_CLASS: &str = "da-group";

/// Attribute flagging transitional elements that never survive finalization
pub const TEMP_ATTR: &str = "loc-temp-dom";

/// Legacy marker tags written by earlier regional edits
pub const LEGACY_ADDED_TAG: &str = "da-loc-added";
pub const LEGACY_DELETED_TAG: &str = "da-loc-deleted";

/// `<marker>el</marker>`
pub fn wrap_outer(el: Element, marker: &str) -> Element {
    Element::new(marker).with_child(el)
}

/// `<el><marker>children</marker></el>`; used for list items so the list
/// itself stays well-formed
pub fn wrap_inner(mut el: Element, marker: &str) -> Element {
    let children = std::mem::take(&mut el.children);
    el.children.push(Node::Element(Element {
        tag: marker.to_string(),
        attrs: Vec::new(),
        children,
    }));
    el
}
