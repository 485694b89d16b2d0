//! Link normalization
//!
//! Preview and live environments serve the same page under different
//! hostname suffixes, and sibling sites link to each other's copies. Both
//! documents are rewritten to one canonical form before extraction so such
//! links never show up as edits.

use regex::Regex;
use tracing::{debug, trace};

use locdiff_config::{site_segment, LinkConfig, SiteEquivalence};

use crate::dom::{Document, Element};
use crate::error::DiffResult;

/// Element tags and the attribute carrying their URL
const URL_ATTRIBUTES: &[(&str, &str)] = &[("a", "href"), ("img", "src"), ("source", "srcset")];

/// Rewrites environment hostnames and equivalent sites in place
#[derive(Debug, Clone)]
pub struct LinkNormalizer {
    /// Any recognized suffix followed by `/`
    recognized: Regex,
    /// Non-canonical suffixes followed by `/`; `None` when there are none
    rewrite: Option<Regex>,
    canonical: String,
}

impl LinkNormalizer {
    pub fn new(config: &LinkConfig) -> DiffResult<Self> {
        let recognized = alternation(config.recognized_suffixes())?;
        let rewrite = if config.environment_suffixes.is_empty() {
            None
        } else {
            Some(alternation(config.environment_suffixes.iter().map(String::as_str))?)
        };
        Ok(Self {
            recognized,
            rewrite,
            canonical: format!("{}/", config.canonical_suffix),
        })
    }

    /// Normalize every link in `doc`, returning it for chaining
    pub fn normalize<'d>(&self, doc: &'d mut Document, sites: &SiteEquivalence) -> &'d mut Document {
        let mut rewritten = 0usize;
        doc.root.walk_elements_mut(&mut |el: &mut Element| {
            if self.normalize_element(el, sites) {
                rewritten += 1;
            }
        });
        debug!(rewritten, site = sites.current_site(), "Normalized links");
        doc
    }

    /// Normalize one URL; returns `None` when it carries no recognized suffix
    pub fn normalize_url(&self, url: &str, sites: &SiteEquivalence) -> Option<String> {
        if !self.recognized.is_match(url) {
            return None;
        }

        let mut url = match &self.rewrite {
            Some(rewrite) => rewrite.replace_all(url, self.canonical.as_str()).into_owned(),
            None => url.to_string(),
        };

        if let Some(link_site) = site_segment(&url).map(str::to_string) {
            if sites.is_equivalent(&link_site) {
                let from = format!("--{}--", link_site);
                let to = format!("--{}--", sites.current_site());
                url = url.replacen(&from, &to, 1);
            }
        }

        Some(url)
    }

    fn normalize_element(&self, el: &mut Element, sites: &SiteEquivalence) -> bool {
        let Some(attr) = url_attribute(el) else {
            return false;
        };
        let Some(url) = el.attr(attr) else {
            return false;
        };
        let Some(normalized) = self.normalize_url(url, sites) else {
            return false;
        };
        if normalized == url {
            return false;
        }
        trace!(tag = %el.tag, from = url, to = %normalized, "Rewrote link");
        el.set_attr(attr, normalized);
        true
    }
}

fn url_attribute(el: &Element) -> Option<&'static str> {
    URL_ATTRIBUTES
        .iter()
        .find(|(tag, _)| el.is_tag(tag))
        .map(|(_, attr)| *attr)
}

/// `\.a/|\.b/|...` over the given suffixes
fn alternation<'s>(suffixes: impl Iterator<Item = &'s str>) -> DiffResult<Regex> {
    let pattern = suffixes
        .map(|suffix| format!("{}/", regex::escape(suffix)))
        .collect::<Vec<_>>()
        .join("|");
    Ok(Regex::new(&pattern)?)
}
