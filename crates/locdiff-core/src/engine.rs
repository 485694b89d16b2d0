//! End-to-end regional diff

use serde::Serialize;
use tracing::{debug, debug_span, info};

use locdiff_config::{DiffConfig, LocdiffConfig, SiteEquivalence};

use crate::block::Block;
use crate::diff::{sequence_diff, DiffEntry, DiffKind};
use crate::dom::{Document, Element};
use crate::error::DiffResult;
use crate::extract::extract_blocks;
use crate::links::LinkNormalizer;
use crate::render::{install_main, render_main};

/// Entry counts of one diff run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffSummary {
    pub same: usize,
    pub added: usize,
    pub deleted: usize,
    /// Section wrappers in the merged `<main>`
    pub sections: usize,
    /// Lists rebuilt from a child-level diff
    pub merged_lists: usize,
}

impl DiffSummary {
    pub fn from_entries(entries: &[DiffEntry<'_>]) -> Self {
        let mut summary = Self::default();
        for entry in entries {
            if entry.block.is_section_boundary() {
                continue;
            }
            match entry.kind {
                DiffKind::Same => summary.same += 1,
                DiffKind::Added => summary.added += 1,
                DiffKind::Deleted => summary.deleted += 1,
            }
            if matches!(entry.block, Block::MergedList(_)) {
                summary.merged_lists += 1;
            }
        }
        summary
    }

    /// Whether the two documents had identical content
    pub fn is_unchanged(&self) -> bool {
        self.added == 0 && self.deleted == 0 && self.merged_lists == 0
    }
}

/// Result of [`RegionalDiff::run`]
#[derive(Debug, Clone)]
pub struct RegionalDiffOutput {
    /// The modified document with its `<main>` replaced by the merged one
    pub document: Document,
    pub main: Element,
    pub summary: DiffSummary,
}

/// Link normalization, extraction, diff and reconstruction for one site
#[derive(Debug, Clone)]
pub struct RegionalDiff {
    sites: SiteEquivalence,
    config: LocdiffConfig,
    links: LinkNormalizer,
}

impl RegionalDiff {
    pub fn new(sites: SiteEquivalence, config: LocdiffConfig) -> DiffResult<Self> {
        config.validate()?;
        let links = LinkNormalizer::new(&config.links)?;
        Ok(Self { sites, config, links })
    }

    pub fn sites(&self) -> &SiteEquivalence {
        &self.sites
    }

    pub fn config(&self) -> &LocdiffConfig {
        &self.config
    }

    /// Diff `original` against `modified` and merge both into one annotated document
    pub fn run(&self, mut original: Document, mut modified: Document) -> RegionalDiffOutput {
        let span = debug_span!("regional_diff", site = self.sites.current_site());
        let _guard = span.enter();

        self.links.normalize(&mut original, &self.sites);
        self.links.normalize(&mut modified, &self.sites);

        let (main, mut summary) = {
            let entries = diff_documents(&original, &modified, &self.config.diff);
            let summary = DiffSummary::from_entries(&entries);
            (render_main(&entries, modified.main()), summary)
        };
        summary.sections = main.element_children().count();

        info!(
            same = summary.same,
            added = summary.added,
            deleted = summary.deleted,
            merged_lists = summary.merged_lists,
            sections = summary.sections,
            "Regional diff complete"
        );

        install_main(&mut modified, main.clone());
        RegionalDiffOutput {
            document: modified,
            main,
            summary,
        }
    }
}

/// Extract both documents and diff their blocks. No link normalization.
pub fn diff_documents<'a>(
    original: &'a Document,
    modified: &'a Document,
    config: &DiffConfig,
) -> Vec<DiffEntry<'a>> {
    let original_blocks = extract_blocks(original);
    let modified_blocks = extract_blocks(modified);
    debug!(
        original = original_blocks.len(),
        modified = modified_blocks.len(),
        "Diffing block sequences"
    );
    sequence_diff(original_blocks, modified_blocks, config)
}
