//! Flattening pass from TaxonomyNode list to ChartData.

use std::collections::HashMap;

use tracing::debug;
use whaletree_core::{Rank, TaxonomyNode};

use crate::types::{
    BASE_POINT_RADIUS, ChartData, ChartDataset, ChartNode, ChartOptions, ChartPoint,
    DEFAULT_POINT_COLOR, LEVEL_COLORS, MIN_POINT_RADIUS, RADIUS_STEP,
};

/// Fill color for a level, falling back to [`DEFAULT_POINT_COLOR`].
pub fn level_color(level: u8) -> &'static str {
    LEVEL_COLORS
        .get(usize::from(level))
        .copied()
        .unwrap_or(DEFAULT_POINT_COLOR)
}

/// `max(10 - level * 1.5, 4)`: shrinks with depth, never below 4.
pub fn point_radius(level: u8) -> f64 {
    (BASE_POINT_RADIUS - f64::from(level) * RADIUS_STEP).max(MIN_POINT_RADIUS)
}

/// Filter and re-shape nodes for the chart, preserving input order.
///
/// Species are dropped unless `options.include_species` is set.
pub fn collect_points<'a>(
    nodes: &'a [TaxonomyNode],
    options: &ChartOptions,
) -> Vec<ChartNode<'a>> {
    nodes
        .iter()
        .filter(|node| options.include_species || !node.is_species())
        .map(|node| ChartNode {
            id: &node.id,
            name: node.display_name(),
            common_name: node.common_name(),
            children: &node.children,
            parent: node.parent_id(),
            level: node.level(),
            node_type: &node.node_type,
        })
        .collect()
}

/// Flatten with the default options (species excluded).
pub fn collect_chart_data(nodes: &[TaxonomyNode]) -> ChartData {
    collect_chart_data_with_options(nodes, &ChartOptions::default())
}

/// Flatten the node list into chart arrays.
///
/// Parent ids are resolved to indices into the emitted arrays. A parent that
/// was filtered out or never existed leaves the point without a parent, so
/// the chart treats it as a root.
pub fn collect_chart_data_with_options(
    nodes: &[TaxonomyNode],
    options: &ChartOptions,
) -> ChartData {
    let points = collect_points(nodes, options);

    // Later duplicates overwrite earlier ones.
    let index_of: HashMap<&str, usize> = points
        .iter()
        .enumerate()
        .map(|(idx, point)| (point.id, idx))
        .collect();

    let data: Vec<ChartPoint> = points
        .iter()
        .map(|point| {
            let parent = point.parent.and_then(|parent_id| {
                let resolved = index_of.get(parent_id).copied();
                if resolved.is_none() {
                    debug!(
                        node = point.id,
                        parent = parent_id,
                        "parent not in chart, treating as root"
                    );
                }
                resolved
            });
            ChartPoint {
                name: chart_label(point),
                parent,
                level: point.level,
                node_type: point.node_type.as_str().to_string(),
            }
        })
        .collect();

    let labels = data.iter().map(|point| point.name.clone()).collect();
    let point_background_color = data
        .iter()
        .map(|point| level_color(point.level).to_string())
        .collect();
    let radii = data.iter().map(|point| point_radius(point.level)).collect();

    debug!(points = data.len(), "flattened taxonomy for chart");

    ChartData {
        labels,
        datasets: vec![ChartDataset {
            point_background_color,
            point_radius: radii,
            data,
        }],
    }
}

/// Species carry their common name as a suffix; everything else shows the
/// plain name.
fn chart_label(point: &ChartNode<'_>) -> String {
    match (point.node_type.rank(), point.common_name) {
        (Some(Rank::Species), Some(common)) => format!("{} - {}", point.name, common),
        _ => point.name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn radius_table() {
        assert_eq!(point_radius(0), 10.0);
        assert_eq!(point_radius(1), 8.5);
        assert_eq!(point_radius(2), 7.0);
        assert_eq!(point_radius(3), 5.5);
        assert_eq!(point_radius(4), 4.0);
        assert_eq!(point_radius(9), 4.0);
    }

    #[test]
    fn radius_is_non_increasing_with_floor() {
        let radii: Vec<f64> = (0..=20).map(point_radius).collect();
        assert!(radii.windows(2).all(|pair| pair[0] >= pair[1]));
        assert!(radii.iter().all(|r| *r >= MIN_POINT_RADIUS));
    }

    #[test]
    fn color_table_and_fallback() {
        assert_eq!(level_color(0), "#002838");
        assert_eq!(level_color(3), "#d94d15");
        assert_eq!(level_color(5), DEFAULT_POINT_COLOR);
        assert_eq!(level_color(u8::MAX), DEFAULT_POINT_COLOR);
    }

    #[test]
    fn label_suffix_only_for_species_with_common_name() {
        let genus = TaxonomyNode::new("orcinus", "Orcinus", Rank::Genus).with_common_name("Orcas");
        let species = TaxonomyNode::new("orcinus_orca", "Orcinus orca", Rank::Species)
            .with_common_name("Orca");
        let bare = TaxonomyNode::new("orcinus_x", "Orcinus x", Rank::Species);
        let nodes = [genus, species, bare];

        let points = collect_points(&nodes, &ChartOptions::new().with_species(true));
        let labels: Vec<String> = points.iter().map(chart_label).collect();
        assert_eq!(labels, vec!["Orcinus", "Orcinus orca - Orca", "Orcinus x"]);
    }

    #[test]
    fn collect_points_keeps_order_and_falls_back_to_id() {
        let nodes = [
            TaxonomyNode::new("b", "", Rank::Suborder).with_parent("a"),
            TaxonomyNode::new("a", "A", Rank::Order).with_children(["b"]),
            TaxonomyNode::new("c", "C", "infraorder"),
        ];
        let points = collect_points(&nodes, &ChartOptions::default());
        let names: Vec<&str> = points.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["b", "A", "C"]);
        assert_eq!(points[0].parent, Some("a"));
        assert_eq!(points[1].children, ["b".to_string()]);
        assert_eq!(points[2].level, 0);
    }
}
