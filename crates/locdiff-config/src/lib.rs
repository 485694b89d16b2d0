//! # Locdiff Configuration Library
//!
//! Foundation crate for the regional diff workspace. It owns every input the
//! diff engine needs besides the two documents themselves:
//!
//! - [`SiteEquivalence`]: which sites count as "the same site" when links are normalized
//! - [`ConfigSheet`]: the JSON configuration sheet published alongside a site
//! - [`LocdiffConfig`]: tunables for list reconciliation and link rewriting, loadable from TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use locdiff_config::{ConfigSheet, SiteEquivalence};
//!
//! let sheet = ConfigSheet::from_json_str(
//!     r#"{"config":{"data":[{"key":"source.fragment.hostnames","value":"main--bacom--adobecom.hlx.live"}]}}"#,
//! ).unwrap();
//! let sites = SiteEquivalence::from_config_sheet("bacom-blog", &sheet);
//! assert!(sites.is_equivalent("bacom"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod loader;
mod sheet;
mod site;

pub use config::*;
pub use error::{ConfigError, ConfigResult};
pub use loader::*;
pub use sheet::*;
pub use site::*;
