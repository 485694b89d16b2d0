//! Site equivalence lookup used by link normalization

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::sheet::ConfigSheet;

/// The current site plus the sites whose links should be rewritten to it.
///
/// Hostnames follow the `<ref>--<site>--<org>.<domain>` convention; the site
/// is the segment between the first and second `--`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteEquivalence {
    current_site: String,
    equivalent_sites: BTreeSet<String>,
}

impl SiteEquivalence {
    /// Create a lookup from explicit site names
    pub fn new<I, S>(current_site: impl Into<String>, equivalent_sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            current_site: current_site.into(),
            equivalent_sites: equivalent_sites.into_iter().map(Into::into).collect(),
        }
    }

    /// Lookup with no equivalent sites; links only get their suffix rewritten
    pub fn current_only(current_site: impl Into<String>) -> Self {
        Self::new(current_site, std::iter::empty::<String>())
    }

    /// Derive equivalent sites from full hostnames. Hostnames without a
    /// site segment are ignored.
    pub fn from_hostnames<I, S>(current_site: impl Into<String>, hostnames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let sites: BTreeSet<String> = hostnames
            .into_iter()
            .filter_map(|hostname| site_segment(hostname.as_ref()).map(str::to_string))
            .collect();
        Self {
            current_site: current_site.into(),
            equivalent_sites: sites,
        }
    }

    /// Derive equivalent sites from the `source.fragment.hostnames` row
    pub fn from_config_sheet(current_site: impl Into<String>, sheet: &ConfigSheet) -> Self {
        let equivalence = Self::from_hostnames(current_site, sheet.fragment_hostnames());
        debug!(
            "Site {} has {} equivalent sites",
            equivalence.current_site,
            equivalence.equivalent_sites.len()
        );
        equivalence
    }

    /// Lenient variant of [`Self::from_config_sheet`] over raw JSON: a missing or
    /// malformed sheet yields an empty equivalence set.
    pub fn from_config_json(current_site: impl Into<String>, json: Option<&str>) -> Self {
        let current_site = current_site.into();
        match json.map(ConfigSheet::from_json_str) {
            Some(Ok(sheet)) => Self::from_config_sheet(current_site, &sheet),
            Some(Err(e)) => {
                warn!("Ignoring unreadable config sheet: {}", e);
                Self::current_only(current_site)
            }
            None => Self::current_only(current_site),
        }
    }

    /// Site links are rewritten to
    pub fn current_site(&self) -> &str {
        &self.current_site
    }

    /// Whether links to `site` should be rewritten to the current site
    pub fn is_equivalent(&self, site: &str) -> bool {
        self.equivalent_sites.contains(site)
    }

    /// Equivalent sites in sorted order
    pub fn equivalent_sites(&self) -> impl Iterator<Item = &str> {
        self.equivalent_sites.iter().map(String::as_str)
    }
}

/// Segment between the first and second `--` of a hostname or URL
pub fn site_segment(value: &str) -> Option<&str> {
    value.split("--").nth(1)
}
