//! Site configuration sheet
//!
//! Sites publish a JSON sheet of key/value rows. It comes in two shapes: a
//! multi-sheet workbook where the rows live under a `config` tab, and a
//! single sheet with the rows at the top level.
//!
//! ```json
//! { "config": { "data": [ { "key": "source.fragment.hostnames", "value": "a,b" } ] } }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigResult;

/// Key of the row listing hostnames whose fragments count as the current site
pub const FRAGMENT_HOSTNAMES_KEY: &str = "source.fragment.hostnames";

/// One key/value row of a config sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    /// Row key
    #[serde(default)]
    pub key: String,
    /// Row value; sheets normally store strings but numbers and booleans occur
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct SheetTab {
    #[serde(default)]
    data: Vec<SheetRow>,
}

/// Parsed config sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSheet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<SheetTab>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    data: Vec<SheetRow>,
}

impl ConfigSheet {
    /// Parse a sheet from its JSON text
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build a single-tab sheet from rows
    pub fn from_rows(rows: Vec<SheetRow>) -> Self {
        Self {
            config: Some(SheetTab { data: rows }),
            data: Vec::new(),
        }
    }

    /// All rows, `config` tab first
    pub fn rows(&self) -> impl Iterator<Item = &SheetRow> {
        self.config
            .iter()
            .flat_map(|tab| tab.data.iter())
            .chain(self.data.iter())
    }

    /// Value of the first row with `key`, if it holds a string
    pub fn find_value(&self, key: &str) -> Option<&str> {
        self.rows()
            .find(|row| row.key == key)
            .and_then(|row| row.value.as_str())
    }

    /// Comma-separated hostnames listed under [`FRAGMENT_HOSTNAMES_KEY`]
    pub fn fragment_hostnames(&self) -> Vec<String> {
        self.find_value(FRAGMENT_HOSTNAMES_KEY)
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|hostname| !hostname.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}
