use std::path::PathBuf;

use whaletree_core::{
    OutlineConfig, Rank, SummaryValue, TaxonomyDataset, ValidatedTaxonomy, render_outline,
};

fn dataset_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/whales.json")
}

#[test]
fn bundled_dataset_is_a_valid_tree() {
    let dataset = TaxonomyDataset::from_path(dataset_path()).expect("load bundled dataset");
    let validated = ValidatedTaxonomy::new(dataset).expect("bundled dataset validates");

    assert_eq!(validated.root().id, "cetacea");
    assert_eq!(validated.nodes().len(), 34);

    let species = validated.nodes().iter().filter(|n| n.is_species()).count();
    assert_eq!(species, 13);
    assert_eq!(
        validated.dataset().summary.get("total_species"),
        Some(&SummaryValue::Number(13.0))
    );
}

#[test]
fn every_rank_is_present() {
    let dataset = TaxonomyDataset::from_path(dataset_path()).expect("load bundled dataset");
    for rank in [
        Rank::Order,
        Rank::Suborder,
        Rank::Family,
        Rank::Genus,
        Rank::Species,
    ] {
        assert!(
            dataset.nodes.iter().any(|n| n.rank() == Some(rank)),
            "no {rank} node in bundled dataset"
        );
    }
}

#[test]
fn outline_covers_every_node_once() {
    let dataset = TaxonomyDataset::from_path(dataset_path()).expect("load bundled dataset");
    let outline = render_outline(&dataset.nodes, &OutlineConfig::new().with_ids(true));

    assert_eq!(outline.lines().count(), dataset.nodes.len());
    for node in &dataset.nodes {
        let needle = format!("({})", node.id);
        assert_eq!(
            outline.matches(&needle).count(),
            1,
            "expected {} exactly once in:\n{outline}",
            node.id
        );
    }
}
