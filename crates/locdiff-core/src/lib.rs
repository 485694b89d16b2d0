//! Locdiff Core
//!
//! Block-level structural diff of two versions of a structured HTML page.
//! This crate provides:
//! - A value-typed DOM snapshot parsed with html5ever
//! - Canonical serialization and BLAKE3 content hashing of blocks
//! - Positional sequence diff with move detection and list reconciliation
//! - Reconstruction of one annotated document and removal of its markers
//!
//! ```rust
//! use locdiff_config::{LocdiffConfig, SiteEquivalence};
//! use locdiff_core::{Document, RegionalDiff};
//!
//! let original = Document::parse("<main><div><p>P1</p><p>P2</p></div></main>");
//! let modified = Document::parse("<main><div><p>P1</p><p>P3</p></div></main>");
//!
//! let diff = RegionalDiff::new(SiteEquivalence::current_only("site"), LocdiffConfig::default()).unwrap();
//! let output = diff.run(original, modified);
//! assert_eq!(output.summary.added, 1);
//! assert_eq!(output.summary.deleted, 1);
//! ```

pub mod block;
pub mod canonical;
pub mod cleanup;
pub mod diff;
pub mod dom;
pub mod engine;
pub mod error;
pub mod extract;
pub mod hash;
pub mod links;
pub mod lists;
pub mod markers;
pub mod render;

// Re-export main types for convenience
pub use block::{Block, HashedBlock};
pub use canonical::canonicalize_element;
pub use cleanup::{remove_markers, remove_markers_in, CleanupStats};
pub use diff::{sequence_diff, DiffEntry, DiffKind};
pub use dom::{Attribute, Document, Element, Node};
pub use engine::{diff_documents, DiffSummary, RegionalDiff, RegionalDiffOutput};
pub use error::{DiffError, DiffResult};
pub use extract::extract_blocks;
pub use hash::ContentHash;
pub use links::LinkNormalizer;
pub use lists::reconcile_lists;
pub use render::render_main;
