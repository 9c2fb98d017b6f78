//! Core processing pipeline: load → validate → render.

use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use whaletree_core::{Result, TaxonomyDataset, ValidatedTaxonomy};

use crate::WhaletreeOptions;
use crate::output::generate_output;

/// Read the dataset file.
pub fn load_dataset(path: &Path) -> Result<TaxonomyDataset> {
    let load_start = Instant::now();
    let dataset = TaxonomyDataset::from_path(path)?;
    info!(
        "Loading {} nodes from {}: {:.3}s",
        dataset.nodes.len(),
        path.display(),
        load_start.elapsed().as_secs_f64()
    );
    Ok(dataset)
}

/// Check every tree invariant once, unless `skip` is set.
pub fn validate_dataset(dataset: TaxonomyDataset, skip: bool) -> Result<TaxonomyDataset> {
    if skip {
        warn!("validation skipped, rendering dataset as-is");
        return Ok(dataset);
    }

    let validate_start = Instant::now();
    let validated = ValidatedTaxonomy::new(dataset)?;
    info!(
        "Validation (root '{}'): {:.3}s",
        validated.root().id,
        validate_start.elapsed().as_secs_f64()
    );
    Ok(validated.into_inner())
}

/// Validate a loaded dataset and render it in the requested format.
///
/// 1. Validate (fail fast on the first broken invariant)
/// 2. Render chart JSON, tree view HTML or outline text
pub fn process_dataset(opts: &WhaletreeOptions, dataset: TaxonomyDataset) -> Result<String> {
    let dataset = validate_dataset(dataset, opts.skip_validation)?;

    let render_start = Instant::now();
    let output = generate_output(opts, dataset.nodes())?;
    info!(
        "Rendering {:?}: {:.3}s",
        opts.format,
        render_start.elapsed().as_secs_f64()
    );
    Ok(output)
}
