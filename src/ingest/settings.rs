//! Per-session settings files.
//!
//! Each trial CSV has a companion settings JSON carrying the ordered block
//! names for that session. Seven-plus-one historical short-form block names
//! are rewritten to their current long forms before use; the table is
//! exhaustive and must stay byte-compatible with existing settings files.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Legacy short-form block names and their current long forms.
const LEGACY_BLOCK_NAMES: [(&str, &str); 8] = [
    ("training 1", "training 125"),
    ("training 2", "training 150"),
    ("training 3", "training 125/150"),
    ("training 4", "training 100"),
    ("training 4b", "training 175"),
    ("training 5", "training 100/125/150"),
    ("training 5b", "training 125/150/175"),
    ("shaping phase 0", "shaping 1"),
];

/// Subset of the session settings consumed by the ingester.
#[derive(Debug, Deserialize)]
pub struct SessionSettings {
    /// Block design section.
    pub block_design: BlockDesign,
}

/// Block design section of the settings file.
#[derive(Debug, Deserialize)]
pub struct BlockDesign {
    /// Ordered block names; trial rows index into this list 1-based.
    pub order: Vec<String>,
}

/// Rewrite a legacy short-form block name to its current long form.
#[must_use]
pub fn remap_block_name(name: String) -> String {
    for (old, new) in LEGACY_BLOCK_NAMES {
        if name == old {
            return new.to_string();
        }
    }
    name
}

/// Load the ordered, remapped block-name list for one session.
pub fn load_block_names(path: &Path) -> Result<Vec<String>> {
    let raw = std::fs::read_to_string(path).map_err(|e| Error::Settings {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let settings: SessionSettings =
        serde_json::from_str(&raw).map_err(|e| Error::Settings {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(settings
        .block_design
        .order
        .into_iter()
        .map(remap_block_name)
        .collect())
}
