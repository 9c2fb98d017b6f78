use std::path::PathBuf;

use pretty_assertions::assert_eq;
use whaletree_core::{ErrorKind, Rank, TaxonomyDataset, TaxonomyNode};
use whaletree_html::{SPECIES_SVG, TreeViewOptions, render_tree_view, render_tree_view_with_options};

fn orca_lineage() -> Vec<TaxonomyNode> {
    vec![
        TaxonomyNode::new("cetacea", "Cetacea", Rank::Order).with_children(["odontoceti"]),
        TaxonomyNode::new("odontoceti", "Odontoceti", Rank::Suborder)
            .with_parent("cetacea")
            .with_children(["delphinidae"]),
        TaxonomyNode::new("delphinidae", "Delphinidae", Rank::Family)
            .with_parent("odontoceti")
            .with_children(["orcinus"])
            .with_species_count(1),
        TaxonomyNode::new("orcinus", "Orcinus", Rank::Genus)
            .with_parent("delphinidae")
            .with_children(["orcinus_orca"]),
        TaxonomyNode::new("orcinus_orca", "Orcinus orca", Rank::Species)
            .with_parent("orcinus")
            .with_common_name("Orca"),
    ]
}

fn item_attr(id: &str) -> String {
    format!("&quot;value&quot;:&quot;{id}&quot;")
}

#[test]
fn two_level_tree_markup() {
    let nodes = vec![
        TaxonomyNode::new("cetacea", "Cetacea", Rank::Order)
            .with_children(["orcinus_orca"])
            .with_species_count(1),
        TaxonomyNode::new("orcinus_orca", "Orcinus orca", Rank::Species)
            .with_parent("cetacea")
            .with_common_name("Orca"),
    ];
    let html = render_tree_view(&nodes).unwrap();

    let expected = format!(
        concat!(
            "<div data-tree-view=\"\" class=\"max-w-4xl\">\n",
            "  <div class=\"accordion-item\" role=\"treeitem\" data-tree-view-item=\"{{&quot;value&quot;:&quot;cetacea&quot;,&quot;isDir&quot;:true}}\" data-tree-level=\"0\">\n",
            "    <div class=\"accordion-heading\">\n",
            "      <div class=\"flex items-center gap-2 w-full\">\n",
            "        <button class=\"accordion-toggle flex items-center justify-center w-6 h-6\">\n",
            "          <span class=\"icon-[tabler--plus] plus-icon text-base-content/80 size-4 transition-all duration-300\"></span>\n",
            "          <span class=\"icon-[tabler--minus] minus-icon text-base-content/80 size-4 transition-all duration-300 hidden\"></span>\n",
            "        </button>\n",
            "        <span class=\"icon-[tabler--crown] text-blue-800 w-5 h-5\"></span>\n",
            "        <span class=\"font-medium text-blue-800\">Cetacea</span>\n",
            "        <span class=\"text-xs bg-gray-100 px-2 py-1 rounded\">1 species</span>\n",
            "      </div>\n",
            "    </div>\n",
            "    <div class=\"accordion-content\">\n",
            "      <div class=\"tree-view-space\">\n",
            "        <div class=\"py-2 pl-6\" data-tree-view-item=\"{{&quot;value&quot;:&quot;orcinus_orca&quot;,&quot;isDir&quot;:false}}\">\n",
            "          <div class=\"flex items-center gap-2\">\n",
            "            <span class=\"text-teal-600\">{svg}</span>\n",
            "            <a href=\"/species/orcinus_orca\" class=\"text-teal-600 hover:underline hover:text-teal-800 transition-colors\">Orcinus orca - Orca</a>\n",
            "          </div>\n",
            "        </div>\n",
            "      </div>\n",
            "    </div>\n",
            "  </div>\n",
            "</div>\n",
        ),
        svg = SPECIES_SVG
    );
    assert_eq!(html, expected);
}

#[test]
fn species_leaf_links_to_detail_page() {
    let html = render_tree_view(&orca_lineage()).unwrap();
    assert!(html.contains(
        "<a href=\"/species/orcinus_orca\" class=\"text-teal-600 hover:underline hover:text-teal-800 transition-colors\">Orcinus orca - Orca</a>"
    ));
    assert!(html.contains("data-tree-level=\"3\""));
    assert!(!html.contains("data-tree-level=\"4\""));
}

#[test]
fn species_without_common_name_has_no_suffix() {
    let mut nodes = orca_lineage();
    nodes[4].common_name = None;
    let html = render_tree_view(&nodes).unwrap();
    assert!(html.contains(">Orcinus orca</a>"));
}

#[test]
fn non_species_leaf_is_plain_text() {
    let mut nodes = orca_lineage();
    nodes.truncate(4);
    nodes[3].children.clear();
    let html = render_tree_view(&nodes).unwrap();

    assert!(html.contains("<span class=\"text-purple-600\">Orcinus</span>"));
    assert!(!html.contains("<a "));
    assert!(!html.contains(&item_attr("orcinus_orca")));
}

#[test]
fn missing_order_renders_nothing() {
    let nodes = orca_lineage().split_off(1);
    assert_eq!(render_tree_view(&nodes).unwrap(), "");
    assert_eq!(render_tree_view(&[]).unwrap(), "");
}

#[test]
fn dangling_children_are_omitted() {
    let mut nodes = orca_lineage();
    nodes[0].children.push("ghost".to_string());
    let html = render_tree_view(&nodes).unwrap();

    assert!(!html.contains("ghost"));
    assert_eq!(html.matches(&item_attr("odontoceti")).count(), 1);
}

#[test]
fn container_with_only_dangling_children_stays_a_container() {
    let nodes = vec![TaxonomyNode::new("cetacea", "Cetacea", Rank::Order).with_children(["ghost"])];
    let html = render_tree_view(&nodes).unwrap();
    assert!(html.contains("class=\"accordion-item\""));
    assert!(html.contains("&quot;isDir&quot;:true"));
    assert!(html.contains("<div class=\"tree-view-space\">\n      </div>\n"));
    assert!(!html.contains("ghost"));
}

#[test]
fn cycle_is_an_error() {
    let nodes = vec![
        TaxonomyNode::new("a", "A", Rank::Order).with_children(["b"]),
        TaxonomyNode::new("b", "B", Rank::Suborder)
            .with_parent("a")
            .with_children(["a"]),
    ];
    let err = render_tree_view(&nodes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CycleDetected);
    assert_eq!(err.context_value("node"), Some("a"));
    assert_eq!(err.operation(), "html::render_tree_view");
}

fn genus_chain(len: usize) -> Vec<TaxonomyNode> {
    let mut nodes = vec![TaxonomyNode::new("g0", "G0", Rank::Order).with_children(["g1"])];
    for i in 1..=len {
        let mut node = TaxonomyNode::new(format!("g{i}"), format!("G{i}"), Rank::Genus)
            .with_parent(format!("g{}", i - 1));
        if i < len {
            node = node.with_children([format!("g{}", i + 1)]);
        }
        nodes.push(node);
    }
    nodes
}

#[test]
fn deep_chain_is_cut_at_max_depth() {
    let html = render_tree_view(&genus_chain(30_000)).unwrap();

    assert_eq!(html.matches("class=\"accordion-item\"").count(), 32);
    assert!(html.contains("data-tree-level=\"31\""));
    assert!(!html.contains("data-tree-level=\"32\""));
    assert!(html.contains(&format!("{},&quot;isDir&quot;:false", item_attr("g32"))));
    assert!(!html.contains(&item_attr("g33")));
}

#[test]
fn max_depth_is_configurable() {
    let options = TreeViewOptions::new().with_max_depth(2);
    let html = render_tree_view_with_options(&genus_chain(5), &options).unwrap();

    assert_eq!(html.matches("class=\"accordion-item\"").count(), 2);
    assert!(html.contains("<span class=\"text-purple-600\">G2</span>"));
    assert!(!html.contains(&item_attr("g3")));
}

#[test]
fn text_and_attributes_are_escaped() {
    let nodes = vec![
        TaxonomyNode::new("o\"rca", "Orcas <&> friends", Rank::Order).with_children(["x'y"]),
        TaxonomyNode::new("x'y", "X", Rank::Species)
            .with_parent("o\"rca")
            .with_common_name("<b>bold</b>"),
    ];
    let html = render_tree_view(&nodes).unwrap();

    assert!(html.contains(">Orcas &lt;&amp;&gt; friends</span>"));
    assert!(html.contains(">X - &lt;b&gt;bold&lt;/b&gt;</a>"));
    assert!(html.contains("href=\"/species/x&#39;y\""));
    assert!(html.contains("&quot;value&quot;:&quot;o\\&quot;rca&quot;"));
    assert!(!html.contains("<b>"));
}

#[test]
fn badge_only_for_positive_counts() {
    let mut nodes = orca_lineage();
    nodes[1].species_count = Some(0);
    let html = render_tree_view(&nodes).unwrap();

    assert_eq!(html.matches(" species</span>").count(), 1);
    assert!(html.contains("rounded\">1 species</span>"));
}

#[test]
fn options_change_prefix_and_wrapper() {
    let options = TreeViewOptions::new()
        .with_detail_prefix("/whales/")
        .with_container_class("tree compact");
    let html = render_tree_view_with_options(&orca_lineage(), &options).unwrap();

    assert!(html.starts_with("<div data-tree-view=\"\" class=\"tree compact\">\n"));
    assert!(html.contains("href=\"/whales/orcinus_orca\""));
}

#[test]
fn bundled_dataset_renders_every_node_once() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/whales.json");
    let dataset = TaxonomyDataset::from_path(path).expect("load bundled dataset");
    let html = render_tree_view(&dataset.nodes).unwrap();

    for node in &dataset.nodes {
        assert_eq!(
            html.matches(&item_attr(&node.id)).count(),
            1,
            "{} should render exactly once",
            node.id
        );
    }

    let interior = dataset.nodes.iter().filter(|n| n.has_children()).count();
    let species = dataset.nodes.iter().filter(|n| n.is_species()).count();
    assert_eq!(html.matches("class=\"accordion-item\"").count(), interior);
    assert_eq!(html.matches("class=\"py-2 pl-6\"").count(), species);
    assert_eq!(html.matches("<a href=\"/species/").count(), species);
}
