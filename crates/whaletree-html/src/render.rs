//! Recursive tree view renderer.

use std::collections::HashSet;

use serde::Serialize;
use tracing::debug;
use whaletree_core::{NodeIndex, TaxonomyNode};
use whaletree_error::{Error, Result};

use crate::html::HtmlBuilder;
use crate::style::{NodeIcon, color_for, icon_for};

const PLUS_ICON: &str =
    "icon-[tabler--plus] plus-icon text-base-content/80 size-4 transition-all duration-300";
const MINUS_ICON: &str =
    "icon-[tabler--minus] minus-icon text-base-content/80 size-4 transition-all duration-300 hidden";
const BADGE_CLASS: &str = "text-xs bg-gray-100 px-2 py-1 rounded";

#[derive(Debug, Clone)]
pub struct TreeViewOptions {
    /// Species leaves link to `{detail_path_prefix}/{id}`.
    pub detail_path_prefix: String,
    /// Class list of the outer `data-tree-view` wrapper.
    pub container_class: String,
    /// Containers deeper than this render as leaves, without their children.
    pub max_depth: usize,
}

impl Default for TreeViewOptions {
    fn default() -> Self {
        Self {
            detail_path_prefix: "/species".to_string(),
            container_class: "max-w-4xl".to_string(),
            max_depth: 32,
        }
    }
}

impl TreeViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detail_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.detail_path_prefix = prefix.into();
        self
    }

    pub fn with_container_class(mut self, class: impl Into<String>) -> Self {
        self.container_class = class.into();
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    fn detail_href(&self, id: &str) -> String {
        format!("{}/{}", self.detail_path_prefix.trim_end_matches('/'), id)
    }
}

/// Payload of the `data-tree-view-item` attribute.
#[derive(Serialize)]
struct TreeViewItem<'a> {
    value: &'a str,
    #[serde(rename = "isDir")]
    is_dir: bool,
}

/// Render with default options.
pub fn render_tree_view(nodes: &[TaxonomyNode]) -> Result<String> {
    render_tree_view_with_options(nodes, &TreeViewOptions::default())
}

/// Render the tree under the first `order` node as nested accordion markup.
///
/// Returns an empty string when there is no `order` node. A node with a
/// non-empty `children` list is a container even if none of its child ids
/// resolve; those are skipped. A container at `max_depth` renders as a leaf.
/// A node reached again from inside its own subtree fails with
/// `CycleDetected`.
pub fn render_tree_view_with_options(
    nodes: &[TaxonomyNode],
    options: &TreeViewOptions,
) -> Result<String> {
    let index = NodeIndex::new(nodes);
    let Some(root) = index.root() else {
        debug!("no order node, tree view is empty");
        return Ok(String::new());
    };

    let mut renderer = TreeRenderer {
        index: &index,
        options,
        builder: HtmlBuilder::new(),
        visiting: HashSet::new(),
    };
    renderer
        .builder
        .open("div", &[("data-tree-view", ""), ("class", options.container_class.as_str())]);
    renderer
        .render_node(root, 0)
        .map_err(|err| err.with_operation("html::render_tree_view"))?;
    renderer.builder.close("div");
    Ok(renderer.builder.build())
}

struct TreeRenderer<'a, 'n> {
    index: &'a NodeIndex<'n>,
    options: &'a TreeViewOptions,
    builder: HtmlBuilder,
    visiting: HashSet<&'n str>,
}

impl<'n> TreeRenderer<'_, 'n> {
    fn render_node(&mut self, node: &'n TaxonomyNode, level: usize) -> Result<()> {
        if !self.visiting.insert(node.id.as_str()) {
            return Err(Error::cycle_detected(node.id.as_str()));
        }

        if node.has_children() && level >= self.options.max_depth {
            debug!(node = %node.id, level, "tree view depth limit reached, children omitted");
            self.render_leaf(node)?;
        } else if node.has_children() {
            let index = self.index;
            let children: Vec<&'n TaxonomyNode> = index.children_of(node).collect();
            self.render_container(node, &children, level)?;
        } else {
            self.render_leaf(node)?;
        }

        self.visiting.remove(node.id.as_str());
        Ok(())
    }

    fn render_container(
        &mut self,
        node: &'n TaxonomyNode,
        children: &[&'n TaxonomyNode],
        level: usize,
    ) -> Result<()> {
        let item = item_json(node, true)?;
        let level_attr = level.to_string();
        let color = color_for(&node.node_type);

        self.builder.open(
            "div",
            &[
                ("class", "accordion-item"),
                ("role", "treeitem"),
                ("data-tree-view-item", item.as_str()),
                ("data-tree-level", level_attr.as_str()),
            ],
        );
        self.builder
            .open("div", &[("class", "accordion-heading")])
            .open("div", &[("class", "flex items-center gap-2 w-full")])
            .open(
                "button",
                &[("class", "accordion-toggle flex items-center justify-center w-6 h-6")],
            )
            .empty_element("span", &[("class", PLUS_ICON)])
            .empty_element("span", &[("class", MINUS_ICON)])
            .close("button");
        self.icon(node);
        let label_class = format!("font-medium {color}");
        self.builder
            .text_element("span", &[("class", label_class.as_str())], node.display_name());
        self.badge(node);
        self.builder.close("div").close("div");

        self.builder
            .open("div", &[("class", "accordion-content")])
            .open("div", &[("class", "tree-view-space")]);
        for &child in children {
            self.render_node(child, level + 1)?;
        }
        self.builder.close("div").close("div");

        self.builder.close("div");
        Ok(())
    }

    fn render_leaf(&mut self, node: &TaxonomyNode) -> Result<()> {
        let item = item_json(node, false)?;
        let color = color_for(&node.node_type);

        self.builder
            .open("div", &[("class", "py-2 pl-6"), ("data-tree-view-item", item.as_str())])
            .open("div", &[("class", "flex items-center gap-2")]);
        self.icon(node);
        if node.is_species() {
            let href = self.options.detail_href(&node.id);
            let class = format!("{color} hover:underline hover:text-teal-800 transition-colors");
            let text = match node.common_name() {
                Some(common) => format!("{} - {}", node.display_name(), common),
                None => node.display_name().to_string(),
            };
            self.builder
                .text_element("a", &[("href", href.as_str()), ("class", class.as_str())], &text);
        } else {
            self.builder
                .text_element("span", &[("class", color)], node.display_name());
        }
        self.badge(node);
        self.builder.close("div").close("div");
        Ok(())
    }

    fn icon(&mut self, node: &TaxonomyNode) {
        let color = color_for(&node.node_type);
        match icon_for(&node.node_type) {
            NodeIcon::Class(icon) => {
                let class = format!("{icon} {color} w-5 h-5");
                self.builder.empty_element("span", &[("class", class.as_str())]);
            }
            NodeIcon::Svg(svg) => {
                self.builder.raw_element("span", &[("class", color)], svg);
            }
        }
    }

    fn badge(&mut self, node: &TaxonomyNode) {
        if let Some(count) = node.species_badge() {
            self.builder
                .text_element("span", &[("class", BADGE_CLASS)], &format!("{count} species"));
        }
    }
}

fn item_json(node: &TaxonomyNode, is_dir: bool) -> Result<String> {
    let item = TreeViewItem {
        value: &node.id,
        is_dir,
    };
    serde_json::to_string(&item).map_err(|err| {
        Error::serialization_failed(err.to_string())
            .with_context("node", node.id.as_str())
            .set_source(err)
    })
}
