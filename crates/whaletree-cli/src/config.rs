//! Optional `whaletree.toml` settings, sitting between CLI flags and defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct WhaletreeConfig {
    pub chart: ChartConfig,
    pub tree_view: TreeViewConfig,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub include_species: Option<bool>,
}

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct TreeViewConfig {
    pub detail_path_prefix: Option<String>,
    pub container_class: Option<String>,
}

impl WhaletreeConfig {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid TOML in {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: WhaletreeConfig = toml::from_str(text)?;
        Ok(config)
    }
}
