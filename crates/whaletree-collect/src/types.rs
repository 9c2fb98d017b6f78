//! Core types for chart flattening.

use serde::{Deserialize, Serialize};
use whaletree_core::NodeType;
use whaletree_error::{Error, Result};

// Styling tables

/// Point fill per level: order, suborder, family, genus, species.
pub const LEVEL_COLORS: [&str; 5] = ["#002838", "#ed7d00", "#395c6b", "#d94d15", "#889da6"];

/// Fill for levels outside [`LEVEL_COLORS`].
pub const DEFAULT_POINT_COLOR: &str = "#889da6";

/// Radius of a level-0 point.
pub const BASE_POINT_RADIUS: f64 = 10.0;

/// Radius lost per level of depth.
pub const RADIUS_STEP: f64 = 1.5;

/// Radius never drops below this.
pub const MIN_POINT_RADIUS: f64 = 4.0;

// Options

#[derive(Debug, Clone, Default)]
pub struct ChartOptions {
    /// Keep species nodes in the chart. Off by default: the chart stops at
    /// genus level and species are only reachable through the tree view.
    pub include_species: bool,
}

impl ChartOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_species(mut self, include: bool) -> Self {
        self.include_species = include;
        self
    }
}

// Intermediate record

/// A surviving node re-shaped for display, still linked by id.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartNode<'a> {
    pub id: &'a str,
    /// Label, or the id when the label is empty
    pub name: &'a str,
    pub common_name: Option<&'a str>,
    pub children: &'a [String],
    pub parent: Option<&'a str>,
    pub level: u8,
    pub node_type: &'a NodeType,
}

// Output

/// One plotted point. `parent` is an index into the same `data` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    pub level: u8,
    pub node_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub point_background_color: Vec<String>,
    pub point_radius: Vec<f64>,
    pub data: Vec<ChartPoint>,
}

/// Chart input: `labels[i]` names `datasets[0].data[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    /// The single dataset this crate emits.
    pub fn points(&self) -> &[ChartPoint] {
        self.datasets
            .first()
            .map(|dataset| dataset.data.as_slice())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            Error::serialization_failed(err.to_string())
                .with_operation("collect::to_json")
                .set_source(err)
        })
    }
}
