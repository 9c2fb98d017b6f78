//! Evaluates corpus cases against the whaletree pipeline.
//!
//! Each case's files are written to a temp directory. The first `.json` file
//! is the dataset and an optional `whaletree.toml` is the config. The `args:`
//! line is parsed with the same option groups as the `whaletree` binary.
//!
//! Expectation kinds:
//! - `chart`, `tree-view`, `outline`: the transformation alone, no validation
//! - `validate`: `ok: root <id>` or the reported error
//! - `output`: the full pipeline in the `--format` given by `args:`

use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use similar::{ChangeTag, TextDiff};
use tempfile::TempDir;

use whaletree_cli::{
    OutputFormat, RenderArgs, WhaletreeConfig, WhaletreeOptions, generate_output, process_dataset,
};
use whaletree_core::{Error, TaxonomyDataset, ValidatedTaxonomy};

use crate::corpus::{Corpus, CorpusCase, CorpusFile};

const CONFIG_FILE: &str = "whaletree.toml";

#[derive(Parser, Debug)]
#[command(name = "whaletree", no_binary_name = true)]
struct CaseArgs {
    #[command(flatten)]
    render: RenderArgs,
}

#[derive(Debug, Clone, Default)]
pub struct RunnerConfig {
    pub filter: Option<String>,
    /// Rewrite mismatching expectations with the actual output (bless).
    pub update: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseStatus {
    Passed,
    Failed,
    Updated,
    NoExpectations,
}

#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub id: String,
    pub status: CaseStatus,
    pub message: Option<String>,
}

pub fn run_cases(corpus: &mut Corpus, config: RunnerConfig) -> Result<Vec<CaseOutcome>> {
    let mut outcomes = Vec::new();
    let mut matched = 0usize;

    for file in corpus.files_mut() {
        outcomes.extend(run_cases_in_file(
            file,
            config.update,
            config.filter.as_deref(),
            &mut matched,
        )?);
    }

    if matched == 0 {
        return Err(anyhow!(
            "no whaletree-test cases matched filter {:?}",
            config.filter
        ));
    }
    Ok(outcomes)
}

pub fn run_cases_for_file(file: &mut CorpusFile, update: bool) -> Result<Vec<CaseOutcome>> {
    let mut matched = 0usize;
    run_cases_in_file(file, update, None, &mut matched)
}

fn run_cases_in_file(
    file: &mut CorpusFile,
    update: bool,
    filter: Option<&str>,
    matched: &mut usize,
) -> Result<Vec<CaseOutcome>> {
    let mut file_outcomes = Vec::new();
    for case in &mut file.cases {
        if let Some(term) = filter
            && !case.id().contains(term)
        {
            continue;
        }

        *matched += 1;
        print!("  {} ... ", case.id());
        let _ = std::io::stdout().flush();

        let (outcome, mutated) = evaluate_case(case, update)?;
        match outcome.status {
            CaseStatus::Passed => println!("ok"),
            CaseStatus::Updated => println!("updated"),
            CaseStatus::Failed => println!("FAILED"),
            CaseStatus::NoExpectations => println!("skipped (no expectations)"),
        }

        file.dirty |= mutated;
        file_outcomes.push(outcome);
    }
    Ok(file_outcomes)
}

fn evaluate_case(case: &mut CorpusCase, update: bool) -> Result<(CaseOutcome, bool)> {
    let case_id = case.id();
    if case.expectations.is_empty() {
        return Ok((
            CaseOutcome {
                id: case_id,
                status: CaseStatus::NoExpectations,
                message: Some("no expectation blocks declared".to_string()),
            },
            false,
        ));
    }

    let prepared = prepare_case(case)?;
    let mut mutated = false;
    let mut status = CaseStatus::Passed;
    let mut failures = Vec::new();

    for expect in &mut case.expectations {
        let actual = render_expectation(&expect.kind, &prepared)
            .with_context(|| format!("in case {case_id}"))?;
        let expected_norm = normalize(&expect.value);
        let actual_norm = normalize(&actual);
        if expected_norm == actual_norm {
            continue;
        }

        if update {
            expect.value = ensure_trailing_newline(actual);
            mutated = true;
            status = CaseStatus::Updated;
        } else {
            status = CaseStatus::Failed;
            failures.push(format_expectation_diff(
                &expect.kind,
                &expected_norm,
                &actual_norm,
            ));
        }
    }

    let message = (!failures.is_empty()).then(|| failures.join("\n"));
    Ok((
        CaseOutcome {
            id: case_id,
            status,
            message,
        },
        mutated,
    ))
}

/// A case with its files on disk and its options resolved.
struct PreparedCase {
    _temp_dir: TempDir,
    options: WhaletreeOptions,
    dataset: std::result::Result<TaxonomyDataset, Error>,
}

fn prepare_case(case: &CorpusCase) -> Result<PreparedCase> {
    let temp_dir = tempfile::tempdir().context("failed to create temp dir for whaletree-test")?;
    for file in &case.files {
        let path = temp_dir.path().join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(&path, file.contents.as_bytes()).with_context(|| {
            format!(
                "failed to write virtual file {} for {}",
                path.display(),
                case.id()
            )
        })?;
    }

    let dataset_path: PathBuf = case
        .files
        .iter()
        .find(|file| file.path.ends_with(".json"))
        .map(|file| temp_dir.path().join(&file.path))
        .ok_or_else(|| anyhow!("case {} has no .json dataset", case.id()))?;

    let args = CaseArgs::try_parse_from(&case.args)
        .with_context(|| format!("invalid args for {}", case.id()))?;
    let config = match case.file(CONFIG_FILE) {
        Some(_) => WhaletreeConfig::from_path(temp_dir.path().join(CONFIG_FILE))?,
        None => WhaletreeConfig::default(),
    };
    let options = WhaletreeOptions::resolve(&dataset_path, &args.render, &config);
    let dataset = TaxonomyDataset::from_path(&dataset_path);

    Ok(PreparedCase {
        _temp_dir: temp_dir,
        options,
        dataset,
    })
}

fn render_expectation(kind: &str, prepared: &PreparedCase) -> Result<String> {
    let dataset = match &prepared.dataset {
        Ok(dataset) => dataset,
        Err(err) => return Ok(describe_error(err)),
    };

    let format = match kind {
        "chart" => OutputFormat::Chart,
        "tree-view" => OutputFormat::TreeView,
        "outline" => OutputFormat::Outline,
        "validate" => {
            return Ok(match ValidatedTaxonomy::new(dataset.clone()) {
                Ok(validated) => format!("ok: root {}\n", validated.root().id),
                Err(err) => describe_error(&err),
            });
        }
        "output" => {
            return Ok(process_dataset(&prepared.options, dataset.clone())
                .unwrap_or_else(|err| describe_error(&err)));
        }
        other => return Err(anyhow!("unknown expectation kind '{other}'")),
    };

    let mut options = prepared.options.clone();
    options.format = format;
    Ok(generate_output(&options, dataset.nodes()).unwrap_or_else(|err| describe_error(&err)))
}

/// Stable rendering of an error: the kind plus the offending violation and
/// node when present. Paths are left out since they point into the temp dir.
fn describe_error(err: &Error) -> String {
    let mut buf = String::new();
    let _ = writeln!(buf, "error: {}", err.kind());
    for key in ["violation", "node"] {
        if let Some(value) = err.context_value(key)
            && !value.is_empty()
        {
            let _ = writeln!(buf, "{key}: {value}");
        }
    }
    buf
}

fn format_expectation_diff(kind: &str, expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut buf = String::new();
    let _ = writeln!(buf, "Expectation '{kind}' mismatch:");
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        let _ = write!(buf, "{sign}{change}");
        if change.missing_newline() {
            buf.push('\n');
        }
    }
    buf
}

fn normalize(text: &str) -> String {
    text.replace("\r\n", "\n").trim_end_matches('\n').to_string()
}

fn ensure_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Shorthand used by the `cargo test` entry point.
pub fn run_corpus_dir(root: &Path, update: bool) -> Result<Vec<CaseOutcome>> {
    let mut corpus = Corpus::load(root)?;
    let outcomes = run_cases(
        &mut corpus,
        RunnerConfig {
            filter: None,
            update,
        },
    )?;
    if update {
        corpus.write_updates()?;
    }
    Ok(outcomes)
}
