use std::path::PathBuf;

use whaletree_test::{
    CaseStatus, Corpus, RunnerConfig, run_cases, run_cases_for_file, run_corpus_dir,
};

fn corpus_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/corpus")
}

#[test]
fn corpus_expectations_hold() {
    let outcomes = run_corpus_dir(&corpus_root(), false).expect("run corpus");
    assert!(!outcomes.is_empty());

    let failures: Vec<String> = outcomes
        .iter()
        .filter(|outcome| outcome.status != CaseStatus::Passed)
        .map(|outcome| {
            format!(
                "{} ({:?})\n{}",
                outcome.id,
                outcome.status,
                outcome.message.as_deref().unwrap_or_default()
            )
        })
        .collect();
    assert!(failures.is_empty(), "corpus failures:\n{}", failures.join("\n"));
}

#[test]
fn filter_selects_matching_cases() {
    let mut corpus = Corpus::load(corpus_root()).expect("load corpus");
    let outcomes = run_cases(
        &mut corpus,
        RunnerConfig {
            filter: Some("tree_view::".to_string()),
            update: false,
        },
    )
    .expect("run filtered corpus");
    assert!(!outcomes.is_empty());
    assert!(outcomes.iter().all(|outcome| outcome.id.starts_with("tree_view::")));

    let err = run_cases(
        &mut corpus,
        RunnerConfig {
            filter: Some("no-such-case".to_string()),
            update: false,
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("no whaletree-test cases matched"));
}

#[test]
fn update_blesses_stale_expectations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stale.whale");
    std::fs::write(
        &path,
        "=====\nstale\n=====\n\n--- file: t.json ---\n{\"nodes\": [{\"id\": \"cetacea\", \"label\": \"Cetacea\", \"type\": \"order\"}]}\n\n--- expect:outline ---\nsomething else\n",
    )
    .unwrap();

    let mut corpus = Corpus::load(dir.path()).unwrap();
    let outcomes = run_cases_for_file(&mut corpus.files_mut()[0], false).unwrap();
    assert_eq!(outcomes[0].status, CaseStatus::Failed);
    assert!(outcomes[0].message.as_deref().unwrap().contains("+order Cetacea"));

    let outcomes = run_corpus_dir(dir.path(), true).unwrap();
    assert_eq!(outcomes[0].status, CaseStatus::Updated);

    let rewritten = std::fs::read_to_string(&path).unwrap();
    assert!(rewritten.contains("--- expect:outline ---\norder Cetacea\n"));
    let outcomes = run_corpus_dir(dir.path(), false).unwrap();
    assert_eq!(outcomes[0].status, CaseStatus::Passed);
}
