use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use locdiff_core::remove_markers;

use crate::output::{read_document, write_output};

/// Execute clean command
pub fn execute(file: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let mut doc = read_document(&file)?;
    let stats = remove_markers(&mut doc);
    info!(
        removed = stats.removed,
        unwrapped = stats.unwrapped,
        "Cleaned {}",
        file.display()
    );
    write_output(output.as_deref(), &doc.to_html())
}
