//! Taxonomy data model.
//!
//! The on-disk shape is a JSON document with `nodes`, `edges` and `summary`.
//! Nodes point at their parent by id and list their children by id; the
//! two directions are redundant and the validator checks they agree.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Taxonomic rank, ordered from the root of the tree downwards.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum Rank {
    Order,
    Suborder,
    Family,
    Genus,
    Species,
}

impl Rank {
    /// Depth of this rank in the hierarchy: `order` is 0, `species` is 4.
    pub fn level(self) -> u8 {
        match self {
            Rank::Order => 0,
            Rank::Suborder => 1,
            Rank::Family => 2,
            Rank::Genus => 3,
            Rank::Species => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// The `type` field of a node.
///
/// Known ranks parse into [`Rank`]; anything else is kept verbatim so it can
/// be echoed back in output and given the default visuals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    Rank(Rank),
    Other(String),
}

impl NodeType {
    pub fn rank(&self) -> Option<Rank> {
        match self {
            NodeType::Rank(rank) => Some(*rank),
            NodeType::Other(_) => None,
        }
    }

    /// Level from the fixed rank table; unknown types sit at level 0.
    pub fn level(&self) -> u8 {
        self.rank().map_or(0, Rank::level)
    }

    pub fn is(&self, rank: Rank) -> bool {
        self.rank() == Some(rank)
    }

    pub fn as_str(&self) -> &str {
        match self {
            NodeType::Rank(rank) => rank.as_str(),
            NodeType::Other(raw) => raw,
        }
    }
}

impl From<String> for NodeType {
    fn from(raw: String) -> Self {
        match raw.parse::<Rank>() {
            Ok(rank) => NodeType::Rank(rank),
            Err(_) => NodeType::Other(raw),
        }
    }
}

impl From<&str> for NodeType {
    fn from(raw: &str) -> Self {
        NodeType::from(raw.to_string())
    }
}

impl From<Rank> for NodeType {
    fn from(rank: Rank) -> Self {
        NodeType::Rank(rank)
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Rank(rank) => rank.as_str().to_string(),
            NodeType::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single taxon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<String>,
    #[serde(
        default,
        rename = "common_name",
        alias = "commonName",
        skip_serializing_if = "Option::is_none"
    )]
    pub common_name: Option<String>,
    #[serde(
        default,
        rename = "species_count",
        alias = "speciesCount",
        skip_serializing_if = "Option::is_none"
    )]
    pub species_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl TaxonomyNode {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        node_type: impl Into<NodeType>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            node_type: node_type.into(),
            parent: None,
            children: Vec::new(),
            common_name: None,
            species_count: None,
            description: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_common_name(mut self, common_name: impl Into<String>) -> Self {
        self.common_name = Some(common_name.into());
        self
    }

    pub fn with_species_count(mut self, count: u32) -> Self {
        self.species_count = Some(count);
        self
    }

    /// Label to show, falling back to the id when the label is empty.
    pub fn display_name(&self) -> &str {
        if self.label.is_empty() {
            &self.id
        } else {
            &self.label
        }
    }

    /// Parent id, treating an empty string the same as a missing parent.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent.as_deref().filter(|parent| !parent.is_empty())
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn rank(&self) -> Option<Rank> {
        self.node_type.rank()
    }

    pub fn level(&self) -> u8 {
        self.node_type.level()
    }

    pub fn is_species(&self) -> bool {
        self.node_type.is(Rank::Species)
    }

    /// Species count worth showing as a badge (zero is treated as absent).
    pub fn species_badge(&self) -> Option<u32> {
        self.species_count.filter(|count| *count > 0)
    }

    /// Common name, ignoring empty strings.
    pub fn common_name(&self) -> Option<&str> {
        self.common_name.as_deref().filter(|name| !name.is_empty())
    }
}

/// A parent -> child edge. Redundant with `children`; kept for consumers
/// that draw graphs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

/// A value in the dataset summary block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SummaryValue {
    Number(f64),
    Text(String),
}

/// The complete dataset as loaded from JSON.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxonomyDataset {
    pub nodes: Vec<TaxonomyNode>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub summary: BTreeMap<String, SummaryValue>,
}

impl TaxonomyDataset {
    /// Build a dataset from nodes alone, deriving one edge per listed child.
    pub fn from_nodes(nodes: Vec<TaxonomyNode>) -> Self {
        let edges = nodes
            .iter()
            .flat_map(|node| {
                node.children.iter().map(|child| Edge {
                    source: node.id.clone(),
                    target: child.clone(),
                })
            })
            .collect();
        Self {
            nodes,
            edges,
            summary: BTreeMap::new(),
        }
    }

    pub fn nodes(&self) -> &[TaxonomyNode] {
        &self.nodes
    }
}

/// Id -> node lookup over a borrowed node list.
///
/// When ids repeat, the later node wins.
pub struct NodeIndex<'a> {
    nodes: &'a [TaxonomyNode],
    by_id: HashMap<&'a str, &'a TaxonomyNode>,
}

impl<'a> NodeIndex<'a> {
    pub fn new(nodes: &'a [TaxonomyNode]) -> Self {
        let by_id = nodes.iter().map(|node| (node.id.as_str(), node)).collect();
        Self { nodes, by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a TaxonomyNode> {
        self.by_id.get(id).copied()
    }

    /// The first `order`-typed node in input order.
    pub fn root(&self) -> Option<&'a TaxonomyNode> {
        self.nodes.iter().find(|node| node.node_type.is(Rank::Order))
    }

    /// Resolved children of `node`, in listed order. Ids that do not
    /// resolve are skipped.
    pub fn children_of(
        &self,
        node: &'a TaxonomyNode,
    ) -> impl Iterator<Item = &'a TaxonomyNode> + '_ {
        node.children.iter().filter_map(move |child_id| {
            let child = self.get(child_id);
            if child.is_none() {
                tracing::debug!(parent = %node.id, child = %child_id, "skipping unresolved child");
            }
            child
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn rank_levels_follow_hierarchy() {
        let levels: Vec<u8> = Rank::iter().map(Rank::level).collect();
        assert_eq!(levels, vec![0, 1, 2, 3, 4]);
        assert_eq!(Rank::Suborder.to_string(), "suborder");
        assert_eq!("genus".parse::<Rank>().ok(), Some(Rank::Genus));
    }

    #[test]
    fn unknown_type_is_preserved_at_level_zero() {
        let node_type = NodeType::from("infraorder");
        assert_eq!(node_type, NodeType::Other("infraorder".to_string()));
        assert_eq!(node_type.level(), 0);
        assert_eq!(node_type.as_str(), "infraorder");
        assert_eq!(String::from(node_type), "infraorder");
    }

    #[test]
    fn type_matching_is_case_sensitive() {
        assert_eq!(NodeType::from("Species").rank(), None);
        assert_eq!(NodeType::from("species").rank(), Some(Rank::Species));
    }

    #[test]
    fn node_json_accepts_both_metadata_spellings() {
        let snake: TaxonomyNode = serde_json::from_str(
            r#"{"id":"orcinus_orca","label":"Orcinus orca","type":"species","parent":"orcinus","common_name":"Orca","species_count":1}"#,
        )
        .unwrap();
        let camel: TaxonomyNode = serde_json::from_str(
            r#"{"id":"orcinus_orca","label":"Orcinus orca","type":"species","parent":"orcinus","commonName":"Orca","speciesCount":1}"#,
        )
        .unwrap();
        assert_eq!(snake, camel);
        assert_eq!(snake.common_name(), Some("Orca"));
        assert!(snake.is_species());
    }

    #[test]
    fn null_children_and_missing_label_are_tolerated() {
        let node: TaxonomyNode =
            serde_json::from_str(r#"{"id":"ghost","type":"genus","children":null}"#).unwrap();
        assert!(!node.has_children());
        assert_eq!(node.display_name(), "ghost");
        assert_eq!(node.parent_id(), None);
    }

    #[test]
    fn empty_parent_counts_as_absent() {
        let node = TaxonomyNode::new("x", "X", Rank::Genus).with_parent("");
        assert_eq!(node.parent_id(), None);
    }

    #[test]
    fn zero_species_count_has_no_badge() {
        let node = TaxonomyNode::new("x", "X", Rank::Genus).with_species_count(0);
        assert_eq!(node.species_badge(), None);
        let node = node.with_species_count(4);
        assert_eq!(node.species_badge(), Some(4));
    }

    #[test]
    fn serialization_uses_dataset_keys() {
        let node = TaxonomyNode::new("physeter", "Physeter", Rank::Genus)
            .with_parent("physeteridae")
            .with_common_name("Sperm whales");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "genus");
        assert_eq!(value["common_name"], "Sperm whales");
        assert!(value.get("children").is_none());
    }

    #[test]
    fn index_resolves_children_and_root() {
        let nodes = vec![
            TaxonomyNode::new("cetacea", "Cetacea", Rank::Order)
                .with_children(["mysticeti", "nope"]),
            TaxonomyNode::new("mysticeti", "Mysticeti", Rank::Suborder).with_parent("cetacea"),
        ];
        let index = NodeIndex::new(&nodes);
        assert!(index.get("nope").is_none());
        assert_eq!(index.root().map(|n| n.id.as_str()), Some("cetacea"));

        let root = index.root().unwrap();
        let children: Vec<&str> = index.children_of(root).map(|n| n.id.as_str()).collect();
        assert_eq!(children, vec!["mysticeti"]);
    }

    #[test]
    fn index_prefers_later_duplicate() {
        let nodes = vec![
            TaxonomyNode::new("dup", "First", Rank::Genus),
            TaxonomyNode::new("dup", "Second", Rank::Genus),
        ];
        let index = NodeIndex::new(&nodes);
        assert_eq!(index.get("dup").map(|n| n.label.as_str()), Some("Second"));
    }

    #[test]
    fn from_nodes_derives_edges() {
        let dataset = TaxonomyDataset::from_nodes(vec![
            TaxonomyNode::new("a", "A", Rank::Order).with_children(["b", "c"]),
            TaxonomyNode::new("b", "B", Rank::Suborder).with_parent("a"),
            TaxonomyNode::new("c", "C", Rank::Suborder).with_parent("a"),
        ]);
        let targets: Vec<&str> = dataset.edges.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, vec!["b", "c"]);
        assert!(dataset.edges.iter().all(|e| e.source == "a"));
    }
}
