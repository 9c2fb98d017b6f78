pub mod corpus;
pub mod runner;

pub use corpus::{
    CORPUS_EXTENSION, Corpus, CorpusCase, CorpusCaseExpectation, CorpusFile, TestFile,
};
pub use runner::{
    CaseOutcome, CaseStatus, RunnerConfig, run_cases, run_cases_for_file, run_corpus_dir,
};
