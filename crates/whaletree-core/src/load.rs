//! Loading datasets from JSON.

use std::fs;
use std::path::Path;

use tracing::debug;
use whaletree_error::{Error, Result};

use crate::model::TaxonomyDataset;

impl TaxonomyDataset {
    /// Parse a dataset from a JSON document.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let dataset: TaxonomyDataset = serde_json::from_str(text).map_err(|err| {
            Error::deserialization_failed(format!("invalid taxonomy JSON: {err}"))
                .with_operation("core::load")
                .with_context("line", err.line().to_string())
                .set_source(err)
        })?;
        debug!(
            nodes = dataset.nodes.len(),
            edges = dataset.edges.len(),
            "loaded taxonomy dataset"
        );
        Ok(dataset)
    }

    /// Read and parse a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|err| {
            Error::from(err)
                .with_operation("core::load")
                .with_context("path", path.display().to_string())
        })?;
        Self::from_json_str(&text)
            .map_err(|err| err.with_context("path", path.display().to_string()))
    }

    /// Serialize back to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            Error::serialization_failed(err.to_string())
                .with_operation("core::save")
                .set_source(err)
        })
    }
}
