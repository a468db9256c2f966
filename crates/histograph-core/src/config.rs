use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ErrorCode;

/// Options for assembling a [`crate::graph::HistoryGraph`].
///
/// Connection records themselves are never affected; these only choose
/// which records become edges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Emit edges for inferred children.
    #[serde(default = "default_true")]
    pub include_inferred: bool,
    /// Emit parent edges of types whose parent is only approximate.
    #[serde(default = "default_true")]
    pub include_approximate: bool,
    /// Leave events with unrecognised types unlinked instead of failing.
    #[serde(default)]
    pub skip_unrecognized: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            include_inferred: default_true(),
            include_approximate: default_true(),
            skip_unrecognized: false,
        }
    }
}

/// Load a [`GraphConfig`] from a TOML file.
///
/// A missing file yields the defaults.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or is not valid
/// TOML for this schema.
pub fn load_graph_config(path: &Path) -> Result<GraphConfig> {
    if !path.exists() {
        return Ok(GraphConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<GraphConfig>(&content).with_context(|| {
        format!(
            "{}: Failed to parse {}",
            ErrorCode::ConfigParseError,
            path.display()
        )
    })
}

const fn default_true() -> bool {
    true
}
