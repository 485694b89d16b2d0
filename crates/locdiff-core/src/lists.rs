//! List reconciliation
//!
//! A regional edit that adds one bullet to a list changes the list's hash, so
//! the sequence diff reports the whole original list deleted and the whole
//! edited list added. When an added and a deleted list of the same tag share
//! enough children they are treated as one list: the deletion is dropped and
//! the added list is rebuilt from a child-level diff.

use std::collections::HashSet;

use tracing::{debug, trace};

use locdiff_config::{DiffConfig, ListPairing};

use crate::block::{Block, HashedBlock};
use crate::diff::{align, DiffEntry, DiffKind};
use crate::dom::Element;
use crate::hash::ContentHash;
use crate::markers::{wrap_inner, ADDED_TAG, DELETED_TAG};

/// Children of one list, hashed, for the duration of a reconciliation pass
struct ListAssignment<'a> {
    index: usize,
    list: &'a Element,
    children: Vec<HashedBlock<'a>>,
    /// Distinct child hashes; only membership is ever checked
    hashes: HashSet<ContentHash>,
}

impl<'a> ListAssignment<'a> {
    fn new(index: usize, list: &'a Element) -> Self {
        let children: Vec<HashedBlock<'a>> = list
            .element_children()
            .map(|child| HashedBlock::new(Block::Element(child)))
            .collect();
        let hashes = children.iter().map(|child| child.hash).collect();
        Self {
            index,
            list,
            children,
            hashes,
        }
    }

    /// How many of our children (duplicates included) also appear in `other`
    fn common_children(&self, other: &ListAssignment<'_>) -> usize {
        self.children
            .iter()
            .filter(|child| other.hashes.contains(&child.hash))
            .count()
    }
}

/// Merge edited lists in `entries`. Entries that do not take part are returned
/// untouched and in order.
pub fn reconcile_lists<'a>(mut entries: Vec<DiffEntry<'a>>, config: &DiffConfig) -> Vec<DiffEntry<'a>> {
    let mut added = Vec::new();
    let mut deleted = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        if let Some(list) = entry.block.as_list() {
            match entry.kind {
                DiffKind::Added => added.push(ListAssignment::new(index, list)),
                DiffKind::Deleted => deleted.push(ListAssignment::new(index, list)),
                DiffKind::Same => {}
            }
        }
    }

    if added.is_empty() || deleted.is_empty() {
        return entries;
    }

    let mut consumed = vec![false; deleted.len()];
    let mut removed = Vec::new();

    for added_list in &added {
        let Some(choice) = choose_partner(added_list, &deleted, &consumed, config) else {
            continue;
        };
        consumed[choice] = true;
        let deleted_list = &deleted[choice];

        let merged = merge_lists(deleted_list, added_list);
        trace!(
            tag = %added_list.list.tag,
            added_index = added_list.index,
            deleted_index = deleted_list.index,
            "Merged edited list"
        );

        let entry = &mut entries[added_list.index];
        entry.block = Block::MergedList(Box::new(merged));
        entry.kind = DiffKind::Same;
        removed.push(deleted_list.index);
    }

    debug!(
        added_lists = added.len(),
        deleted_lists = deleted.len(),
        merged = removed.len(),
        "Reconciled lists"
    );

    if removed.is_empty() {
        return entries;
    }
    removed.sort_unstable();
    entries
        .into_iter()
        .enumerate()
        .filter(|(index, _)| removed.binary_search(index).is_err())
        .map(|(_, entry)| entry)
        .collect()
}

/// Index into `deleted` of the list `added` should merge with, if any
fn choose_partner(
    added: &ListAssignment<'_>,
    deleted: &[ListAssignment<'_>],
    consumed: &[bool],
    config: &DiffConfig,
) -> Option<usize> {
    let candidates = deleted
        .iter()
        .enumerate()
        .filter(|(i, candidate)| !consumed[*i] && candidate.list.tag == added.list.tag)
        .map(|(i, candidate)| (i, added.common_children(candidate)))
        .filter(|(_, common)| *common >= config.min_common_list_items);

    match config.list_pairing {
        ListPairing::Greedy => candidates.map(|(i, _)| i).next(),
        ListPairing::BestOverlap => candidates
            .fold(None, |best: Option<(usize, usize)>, (i, common)| match best {
                Some((_, best_common)) if best_common >= common => best,
                _ => Some((i, common)),
            })
            .map(|(i, _)| i),
    }
}

/// Rebuild the added list with child-level markers. Added and deleted items
/// keep their `<li>` and carry the marker inside it.
fn merge_lists(deleted: &ListAssignment<'_>, added: &ListAssignment<'_>) -> Element {
    let children = align(deleted.children.clone(), added.children.clone());

    let mut merged = Element {
        tag: added.list.tag.clone(),
        attrs: added.list.attrs.clone(),
        children: Vec::with_capacity(children.len()),
    };

    for entry in children {
        let Some(child) = entry.block.as_element().cloned() else {
            continue;
        };
        let child = match entry.kind {
            DiffKind::Same => child,
            DiffKind::Added => wrap_inner(child, ADDED_TAG),
            DiffKind::Deleted => wrap_inner(child, DELETED_TAG),
        };
        merged.children.push(child.into());
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(tag: &str, items: &[&str]) -> Element {
        items.iter().fold(Element::new(tag), |list, item| {
            list.with_child(Element::new("li").with_text(*item))
        })
    }

    fn entry<'a>(el: &'a Element, kind: DiffKind) -> DiffEntry<'a> {
        DiffEntry::new(HashedBlock::new(Block::Element(el)), kind)
    }

    #[test]
    fn test_one_common_item_not_merged() {
        let old = list("ul", &["a", "b", "c"]);
        let new = list("ul", &["a", "x", "y"]);
        let entries = vec![entry(&old, DiffKind::Deleted), entry(&new, DiffKind::Added)];
        let result = reconcile_lists(entries, &DiffConfig::default());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].kind, DiffKind::Deleted);
        assert_eq!(result[1].kind, DiffKind::Added);
    }

    #[test]
    fn test_two_common_items_merged() {
        let old = list("ul", &["a", "b", "c"]);
        let new = list("ul", &["a", "b", "d"]);
        let entries = vec![entry(&old, DiffKind::Deleted), entry(&new, DiffKind::Added)];
        let result = reconcile_lists(entries, &DiffConfig::default());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].kind, DiffKind::Same);
        let merged = result[0].block.as_element().unwrap();
        assert_eq!(
            merged.outer_html(),
            "<ul><li>a</li><li>b</li><li><da-diff-deleted>c</da-diff-deleted></li><li><da-diff-added>d</da-diff-added></li></ul>"
        );
    }

    #[test]
    fn test_tag_mismatch_skipped() {
        let old = list("ol", &["a", "b"]);
        let new = list("ul", &["a", "b", "c"]);
        let entries = vec![entry(&old, DiffKind::Deleted), entry(&new, DiffKind::Added)];
        let result = reconcile_lists(entries, &DiffConfig::default());
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|e| e.is_marked()));
    }

    #[test]
    fn test_each_deleted_list_consumed_once() {
        let old = list("ul", &["a", "b", "c"]);
        let first = list("ul", &["a", "b", "x"]);
        let second = list("ul", &["a", "b", "y"]);
        let entries = vec![
            entry(&old, DiffKind::Deleted),
            entry(&first, DiffKind::Added),
            entry(&second, DiffKind::Added),
        ];
        let result = reconcile_lists(entries, &DiffConfig::default());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].kind, DiffKind::Same);
        assert!(matches!(result[0].block, Block::MergedList(_)));
        assert_eq!(result[1].kind, DiffKind::Added);
    }

    #[test]
    fn test_best_overlap_prefers_closer_list() {
        let loose = list("ul", &["a", "b", "q", "r"]);
        let close = list("ul", &["a", "b", "c", "s"]);
        let edited = list("ul", &["a", "b", "c", "d"]);
        let entries = || {
            vec![
                entry(&loose, DiffKind::Deleted),
                entry(&close, DiffKind::Deleted),
                entry(&edited, DiffKind::Added),
            ]
        };

        let greedy = reconcile_lists(entries(), &DiffConfig::default());
        // Greedy pairs with the first qualifying list, leaving the closer one deleted
        assert_eq!(greedy.len(), 2);
        assert_eq!(greedy[0].kind, DiffKind::Deleted);
        assert_eq!(greedy[0].hash, HashedBlock::new(Block::Element(&close)).hash);

        let config = DiffConfig {
            list_pairing: ListPairing::BestOverlap,
            ..DiffConfig::default()
        };
        let best = reconcile_lists(entries(), &config);
        assert_eq!(best[0].hash, HashedBlock::new(Block::Element(&loose)).hash);
        assert_eq!(best[0].kind, DiffKind::Deleted);
    }

    #[test]
    fn test_duplicate_children_each_count() {
        // One shared hash appearing twice in the added list reaches the threshold
        let old = list("ul", &["a", "b"]);
        let new = list("ul", &["a", "a", "z"]);
        let entries = vec![entry(&old, DiffKind::Deleted), entry(&new, DiffKind::Added)];
        let result = reconcile_lists(entries, &DiffConfig::default());
        assert_eq!(result.len(), 1);
        assert!(matches!(result[0].block, Block::MergedList(_)));
    }

    #[test]
    fn test_custom_threshold() {
        let old = list("ul", &["a", "b", "c"]);
        let new = list("ul", &["a", "b", "d"]);
        let config = DiffConfig {
            min_common_list_items: 3,
            ..DiffConfig::default()
        };
        let entries = vec![entry(&old, DiffKind::Deleted), entry(&new, DiffKind::Added)];
        assert_eq!(reconcile_lists(entries, &config).len(), 2);
    }
}
