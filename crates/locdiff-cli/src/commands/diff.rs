use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

use locdiff_config::{ConfigSheet, LocdiffConfig, SiteEquivalence};
use locdiff_core::{DiffSummary, RegionalDiff};

use crate::cli::DiffFormat;
use crate::output::{read_document, write_output};

#[derive(Debug, Serialize)]
struct DiffReport {
    summary: DiffSummary,
    main: String,
}

/// Execute diff command
#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: LocdiffConfig,
    original: PathBuf,
    modified: PathBuf,
    site: String,
    hostnames: Vec<String>,
    config_sheet: Option<PathBuf>,
    output: Option<PathBuf>,
    format: DiffFormat,
) -> Result<()> {
    let sites = site_equivalence(site, hostnames, config_sheet)?;
    let engine = RegionalDiff::new(sites, config).context("Invalid diff configuration")?;

    let original = read_document(&original)?;
    let modified = read_document(&modified)?;
    let result = engine.run(original, modified);

    let rendered = match format {
        DiffFormat::Html => result.document.to_html(),
        DiffFormat::Json => serde_json::to_string_pretty(&DiffReport {
            summary: result.summary,
            main: result.main.outer_html(),
        })?,
    };
    write_output(output.as_deref(), &rendered)
}

/// Equivalent sites from `--hostnames` plus the config sheet, if any. An
/// unparseable sheet is ignored; an unreadable one is an error.
fn site_equivalence(
    site: String,
    mut hostnames: Vec<String>,
    config_sheet: Option<PathBuf>,
) -> Result<SiteEquivalence> {
    if let Some(path) = config_sheet {
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config sheet {}", path.display()))?;
        match ConfigSheet::from_json_str(&json) {
            Ok(sheet) => hostnames.extend(sheet.fragment_hostnames()),
            Err(e) => warn!("Ignoring config sheet {}: {}", path.display(), e),
        }
    }

    let sites = SiteEquivalence::from_hostnames(site, hostnames.iter().map(|h| h.trim()));
    debug!(
        site = sites.current_site(),
        equivalent = sites.equivalent_sites().count(),
        "Resolved site equivalence"
    );
    Ok(sites)
}
