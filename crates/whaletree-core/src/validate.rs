//! One-shot validation of the tree invariants.
//!
//! The transformations downstream tolerate broken input.
//! Callers that want to fail fast validate once here, right after loading,
//! and hand the resulting [`ValidatedTaxonomy`] on.

use std::collections::{HashMap, HashSet};

use strum_macros::{Display, IntoStaticStr};
use tracing::debug;
use whaletree_error::{Error, Result};

use crate::model::{Rank, TaxonomyDataset, TaxonomyNode};

/// The invariant a dataset broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum Violation {
    /// No nodes at all
    EmptyDataset,
    /// Two nodes share an id
    DuplicateId,
    /// No `order` node, or the only one has a parent
    MissingRoot,
    /// More than one `order` node
    MultipleRoots,
    /// `parent` names a node that does not exist
    DanglingParent,
    /// `children` names a node that does not exist
    DanglingChild,
    /// A parent lists the same child twice
    DuplicateChild,
    /// A listed child's `parent` points somewhere else
    AsymmetricLink,
    /// Following `parent` pointers loops
    Cycle,
    /// Not reachable from the root through `children`
    UnreachableNode,
    /// A ranked node does not sit strictly below its ranked parent
    RankOrder,
    /// An edge disagrees with the parent/children relation
    EdgeMismatch,
}

impl Violation {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// A dataset that passed every check in [`ValidatedTaxonomy::new`].
#[derive(Debug, Clone)]
pub struct ValidatedTaxonomy {
    dataset: TaxonomyDataset,
    root: usize,
}

impl ValidatedTaxonomy {
    /// Check the dataset and wrap it, or report the first broken invariant.
    pub fn new(dataset: TaxonomyDataset) -> Result<Self> {
        let root = check(&dataset).map_err(|err| err.with_operation("core::validate"))?;
        debug!(
            nodes = dataset.nodes.len(),
            root = %dataset.nodes[root].id,
            "taxonomy dataset validated"
        );
        Ok(Self { dataset, root })
    }

    pub fn dataset(&self) -> &TaxonomyDataset {
        &self.dataset
    }

    pub fn nodes(&self) -> &[TaxonomyNode] {
        &self.dataset.nodes
    }

    pub fn root(&self) -> &TaxonomyNode {
        &self.dataset.nodes[self.root]
    }

    pub fn into_inner(self) -> TaxonomyDataset {
        self.dataset
    }
}

fn violation(kind: Violation, node: &str, message: String) -> Error {
    Error::invalid_dataset(kind.as_str(), node, message)
}

/// Returns the index of the root node.
fn check(dataset: &TaxonomyDataset) -> Result<usize> {
    let nodes = &dataset.nodes;
    if nodes.is_empty() {
        return Err(violation(
            Violation::EmptyDataset,
            "",
            "dataset has no nodes".to_string(),
        ));
    }

    let mut by_id: HashMap<&str, &TaxonomyNode> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        if by_id.insert(node.id.as_str(), node).is_some() {
            return Err(violation(
                Violation::DuplicateId,
                &node.id,
                format!("id '{}' is used by more than one node", node.id),
            ));
        }
    }

    let mut orders = nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.node_type.is(Rank::Order));
    let (root_idx, root) = orders.next().ok_or_else(|| {
        violation(Violation::MissingRoot, "", "no order-level node".to_string())
    })?;
    if let Some((_, extra)) = orders.next() {
        return Err(violation(
            Violation::MultipleRoots,
            &extra.id,
            format!("both '{}' and '{}' are order-level nodes", root.id, extra.id),
        ));
    }
    if let Some(parent) = root.parent_id() {
        return Err(violation(
            Violation::MissingRoot,
            &root.id,
            format!("order-level node '{}' has parent '{}'", root.id, parent),
        ));
    }

    for node in nodes {
        if let Some(parent) = node.parent_id()
            && !by_id.contains_key(parent)
        {
            return Err(violation(
                Violation::DanglingParent,
                &node.id,
                format!("parent '{}' of '{}' does not exist", parent, node.id),
            ));
        }
    }

    for node in nodes {
        let mut listed = HashSet::with_capacity(node.children.len());
        for child_id in &node.children {
            let child = by_id.get(child_id.as_str()).ok_or_else(|| {
                violation(
                    Violation::DanglingChild,
                    &node.id,
                    format!("child '{}' of '{}' does not exist", child_id, node.id),
                )
            })?;
            if !listed.insert(child_id.as_str()) {
                return Err(violation(
                    Violation::DuplicateChild,
                    &node.id,
                    format!("'{}' lists child '{}' twice", node.id, child_id),
                ));
            }
            if child.parent_id() != Some(node.id.as_str()) {
                return Err(violation(
                    Violation::AsymmetricLink,
                    child_id,
                    format!(
                        "'{}' is listed under '{}' but its parent is {:?}",
                        child_id,
                        node.id,
                        child.parent_id()
                    ),
                ));
            }
        }
    }

    let reachable = reachable_from(root, &by_id);
    if let Some(stray) = nodes.iter().find(|node| !reachable.contains(node.id.as_str())) {
        if parent_chain_loops(stray, &by_id) {
            return Err(violation(
                Violation::Cycle,
                &stray.id,
                format!("following parents from '{}' never reaches the root", stray.id),
            ));
        }
        return Err(violation(
            Violation::UnreachableNode,
            &stray.id,
            format!("'{}' is not reachable from root '{}'", stray.id, root.id),
        ));
    }

    for node in nodes {
        let Some(parent) = node.parent_id().and_then(|parent| by_id.get(parent)) else {
            continue;
        };
        if let (Some(rank), Some(parent_rank)) = (node.rank(), parent.rank())
            && rank.level() <= parent_rank.level()
        {
            return Err(violation(
                Violation::RankOrder,
                &node.id,
                format!(
                    "{} '{}' is placed under {} '{}'",
                    rank, node.id, parent_rank, parent.id
                ),
            ));
        }
    }

    for edge in &dataset.edges {
        let consistent = by_id
            .get(edge.target.as_str())
            .is_some_and(|target| target.parent_id() == Some(edge.source.as_str()));
        if !consistent {
            return Err(violation(
                Violation::EdgeMismatch,
                &edge.target,
                format!(
                    "edge {} -> {} does not match the parent links",
                    edge.source, edge.target
                ),
            ));
        }
    }

    Ok(root_idx)
}

fn reachable_from<'a>(
    root: &'a TaxonomyNode,
    by_id: &HashMap<&'a str, &'a TaxonomyNode>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::with_capacity(by_id.len());
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if !seen.insert(node.id.as_str()) {
            continue;
        }
        stack.extend(
            node.children
                .iter()
                .filter_map(|child| by_id.get(child.as_str()).copied()),
        );
    }
    seen
}

fn parent_chain_loops(start: &TaxonomyNode, by_id: &HashMap<&str, &TaxonomyNode>) -> bool {
    let mut seen = HashSet::new();
    let mut current = Some(start);
    while let Some(node) = current {
        if !seen.insert(node.id.as_str()) {
            return true;
        }
        current = node.parent_id().and_then(|parent| by_id.get(parent).copied());
    }
    false
}
