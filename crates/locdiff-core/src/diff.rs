//! Sequence diff with move detection
//!
//! Blocks are aligned by position: equal hashes at the same index are
//! unchanged, anything else is a deletion of the original block followed by
//! an addition of the modified one. Every insertion goes through
//! [`insert_entry`], which recognises a block that was deleted in one place
//! and added in another as a move and keeps it unmarked.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use locdiff_config::DiffConfig;

use crate::block::{Block, HashedBlock};
use crate::hash::ContentHash;
use crate::lists::reconcile_lists;

/// Classification of one block in the merged output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    Same,
    Added,
    Deleted,
}

impl std::fmt::Display for DiffKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DiffKind::Same => "same",
            DiffKind::Added => "added",
            DiffKind::Deleted => "deleted",
        };
        f.write_str(name)
    }
}

/// One classified block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffEntry<'a> {
    pub block: Block<'a>,
    pub hash: ContentHash,
    pub kind: DiffKind,
}

impl<'a> DiffEntry<'a> {
    pub fn new(item: HashedBlock<'a>, kind: DiffKind) -> Self {
        Self {
            block: item.block,
            hash: item.hash,
            kind,
        }
    }

    pub fn is_marked(&self) -> bool {
        self.kind != DiffKind::Same
    }
}

/// Diff two block lists, then reconcile edited lists when the config asks for it
pub fn sequence_diff<'a>(
    original: Vec<HashedBlock<'a>>,
    modified: Vec<HashedBlock<'a>>,
    config: &DiffConfig,
) -> Vec<DiffEntry<'a>> {
    let entries = align(original, modified);
    debug!(entries = entries.len(), "Aligned block sequences");
    if config.reconcile_lists {
        reconcile_lists(entries, config)
    } else {
        entries
    }
}

/// Positional alignment with move detection. List reconciliation runs its
/// child-level diffs through here directly, so it never re-enters itself.
pub(crate) fn align<'a>(
    original: Vec<HashedBlock<'a>>,
    modified: Vec<HashedBlock<'a>>,
) -> Vec<DiffEntry<'a>> {
    let mut result = Vec::with_capacity(original.len().max(modified.len()));
    let mut original = original.into_iter();
    let mut modified = modified.into_iter();

    loop {
        match (original.next(), modified.next()) {
            (Some(a), Some(b)) if a.hash == b.hash => insert_entry(&mut result, a, DiffKind::Same),
            (Some(a), Some(b)) => {
                insert_entry(&mut result, a, DiffKind::Deleted);
                insert_entry(&mut result, b, DiffKind::Added);
            }
            (Some(a), None) => insert_entry(&mut result, a, DiffKind::Deleted),
            (None, Some(b)) => insert_entry(&mut result, b, DiffKind::Added),
            (None, None) => break,
        }
    }

    result
}

/// Append `item` as `kind`, resolving Added/Deleted pairs of the same content.
///
/// Only the first unresolved entry with the same hash is considered:
/// - Deleted then Added: the earlier deletion is dropped and the block is
///   appended as Same at its new position
/// - Added then Deleted: the earlier addition becomes Same in place
/// - Same kind twice: the duplicate is appended as its own entry
pub(crate) fn insert_entry<'a>(result: &mut Vec<DiffEntry<'a>>, item: HashedBlock<'a>, kind: DiffKind) {
    if kind != DiffKind::Same {
        let matching = result
            .iter()
            .position(|entry| entry.hash == item.hash && entry.kind != DiffKind::Same);

        if let Some(index) = matching {
            match (result[index].kind, kind) {
                (DiffKind::Deleted, DiffKind::Added) => {
                    trace!(hash = %item.hash.short(), "Block moved forward");
                    result.remove(index);
                    result.push(DiffEntry::new(item, DiffKind::Same));
                    return;
                }
                (DiffKind::Added, DiffKind::Deleted) => {
                    trace!(hash = %item.hash.short(), "Block moved backward");
                    result[index].kind = DiffKind::Same;
                    return;
                }
                _ => {}
            }
        }
    }

    result.push(DiffEntry::new(item, kind));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;

    fn blocks(elements: &[Element]) -> Vec<HashedBlock<'_>> {
        elements
            .iter()
            .map(|el| HashedBlock::new(Block::Element(el)))
            .collect()
    }

    fn p(text: &str) -> Element {
        Element::new("p").with_text(text)
    }

    fn summary(entries: &[DiffEntry<'_>]) -> Vec<(String, DiffKind)> {
        entries
            .iter()
            .map(|e| (e.block.as_element().map(|el| el.text_content()).unwrap_or_default(), e.kind))
            .collect()
    }

    #[test]
    fn test_changed_block() {
        let a = [p("P1"), p("P2")];
        let b = [p("P1"), p("P3")];
        let entries = align(blocks(&a), blocks(&b));
        assert_eq!(
            summary(&entries),
            vec![
                ("P1".to_string(), DiffKind::Same),
                ("P2".to_string(), DiffKind::Deleted),
                ("P3".to_string(), DiffKind::Added),
            ]
        );
    }

    #[test]
    fn test_swap_is_two_moves() {
        let a = [p("X"), p("Y")];
        let b = [p("Y"), p("X")];
        let entries = align(blocks(&a), blocks(&b));
        assert_eq!(
            summary(&entries),
            vec![("Y".to_string(), DiffKind::Same), ("X".to_string(), DiffKind::Same)]
        );
    }

    #[test]
    fn test_tails() {
        let a = [p("A"), p("B"), p("C")];
        let b = [p("A")];
        let entries = align(blocks(&a), blocks(&b));
        assert_eq!(
            entries.iter().map(|e| e.kind).collect::<Vec<_>>(),
            vec![DiffKind::Same, DiffKind::Deleted, DiffKind::Deleted]
        );

        let entries = align(blocks(&b), blocks(&a));
        assert_eq!(
            entries.iter().map(|e| e.kind).collect::<Vec<_>>(),
            vec![DiffKind::Same, DiffKind::Added, DiffKind::Added]
        );
    }

    #[test]
    fn test_insertion_shifts_are_moves() {
        // Inserting one block at the front shifts everything else by one
        let a = [p("A"), p("B")];
        let b = [p("N"), p("A"), p("B")];
        let entries = align(blocks(&a), blocks(&b));
        assert_eq!(
            summary(&entries),
            vec![
                ("N".to_string(), DiffKind::Added),
                ("A".to_string(), DiffKind::Same),
                ("B".to_string(), DiffKind::Same),
            ]
        );
    }

    #[test]
    fn test_duplicate_deletions_kept() {
        let a = [p("D"), p("D")];
        let b = [p("X"), p("Y")];
        let entries = align(blocks(&a), blocks(&b));
        let deleted = entries.iter().filter(|e| e.kind == DiffKind::Deleted).count();
        let added = entries.iter().filter(|e| e.kind == DiffKind::Added).count();
        assert_eq!((deleted, added), (2, 2));
    }

    #[test]
    fn test_duplicate_additions_kept() {
        let a = [p("X"), p("Y")];
        let b = [p("D"), p("D")];
        let entries = align(blocks(&a), blocks(&b));
        let added: Vec<_> = entries.iter().filter(|e| e.kind == DiffKind::Added).collect();
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].hash, added[1].hash);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(align(Vec::new(), Vec::new()).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let a = [p("1"), p("2"), p("3"), p("2")];
        let b = [p("3"), p("2"), p("4")];
        assert_eq!(align(blocks(&a), blocks(&b)), align(blocks(&a), blocks(&b)));
    }

    #[test]
    fn test_display() {
        assert_eq!(DiffKind::Deleted.to_string(), "deleted");
    }
}
