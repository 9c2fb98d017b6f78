//! Output generation (chart JSON, tree view HTML, outline).

use std::fs;
use std::io::Write;
use std::path::Path;

use tracing::info;

use whaletree_collect::collect_chart_data_with_options;
use whaletree_core::{Error, Result, TaxonomyNode, render_outline};
use whaletree_html::render_tree_view_with_options;

use crate::WhaletreeOptions;
use crate::options::OutputFormat;

/// Render `nodes` in the requested format. The result always ends with a
/// newline unless it is empty.
pub fn generate_output(opts: &WhaletreeOptions, nodes: &[TaxonomyNode]) -> Result<String> {
    let mut output = match opts.format {
        OutputFormat::Chart => {
            collect_chart_data_with_options(nodes, &opts.chart).to_json_pretty()?
        }
        OutputFormat::TreeView => render_tree_view_with_options(nodes, &opts.tree_view)?,
        OutputFormat::Outline => render_outline(nodes, &opts.outline),
    };
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

/// Write to `path`, or stdout when no path is given.
pub fn write_output(path: Option<&Path>, output: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, output).map_err(|err| {
                Error::from(err)
                    .with_operation("cli::write_output")
                    .with_context("path", path.display().to_string())
            })?;
            info!(path = %path.display(), bytes = output.len(), "output written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
