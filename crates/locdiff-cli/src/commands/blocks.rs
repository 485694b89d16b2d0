use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use locdiff_core::{extract_blocks, Block, HashedBlock};

use crate::cli::BlocksFormat;
use crate::output::{read_document, write_output};

const PREVIEW_CHARS: usize = 40;

/// One extracted block as printed by `blocks`
#[derive(Debug, Serialize)]
struct BlockRow {
    index: usize,
    kind: String,
    hash: String,
    preview: String,
}

impl BlockRow {
    fn new(index: usize, item: &HashedBlock<'_>) -> Self {
        let preview = match &item.block {
            Block::SectionBoundary => String::new(),
            Block::Group(members) => members
                .iter()
                .filter_map(Block::as_element)
                .map(|el| el.text_content())
                .collect::<Vec<_>>()
                .join(" "),
            other => other.as_element().map(|el| el.text_content()).unwrap_or_default(),
        };
        Self {
            index,
            kind: item.block.label(),
            hash: item.hash.to_hex(),
            preview: truncate(preview.split_whitespace().collect::<Vec<_>>().join(" ")),
        }
    }
}

fn truncate(text: String) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text;
    }
    let mut short: String = text.chars().take(PREVIEW_CHARS).collect();
    short.push('…');
    short
}

/// Execute blocks command
pub fn execute(file: PathBuf, format: BlocksFormat) -> Result<()> {
    let doc = read_document(&file)?;
    let rows: Vec<BlockRow> = extract_blocks(&doc)
        .iter()
        .enumerate()
        .map(|(i, item)| BlockRow::new(i, item))
        .collect();

    let rendered = match format {
        BlocksFormat::Json => serde_json::to_string_pretty(&rows)?,
        BlocksFormat::Plain => rows
            .iter()
            .map(|row| format!("{:>3}  {:<12} {}  {}", row.index, row.kind, &row.hash[..12], row.preview))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    write_output(None, &rendered)
}
