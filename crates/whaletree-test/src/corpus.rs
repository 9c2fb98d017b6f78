//! `.whale` corpus files: banner-delimited cases with virtual files and
//! expectation sections.
//!
//! ```text
//! ===============================================================================
//! chart excludes species
//! ===============================================================================
//!
//! args: --format chart
//!
//! --- file: taxonomy.json ---
//! { "nodes": [ ... ] }
//!
//! --- expect:chart ---
//! { ... }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use shell_words::{join, split};
use walkdir::WalkDir;

pub const CORPUS_EXTENSION: &str = "whale";

const CASE_BANNER: &str =
    "===============================================================================";

fn slugify_case_name(raw: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;

    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else if !slug.is_empty() {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "case".to_string()
    } else {
        slug
    }
}

/// All corpus files found under a root directory (e.g. `tests/corpus`).
pub struct Corpus {
    files: Vec<CorpusFile>,
}

impl Corpus {
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.exists() {
            return Err(anyhow!("corpus root {} does not exist", root.display()));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(|res| res.ok())
            .filter(|entry| entry.file_type().is_file())
        {
            if entry.path().extension().and_then(|ext| ext.to_str()) != Some(CORPUS_EXTENSION) {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(root)
                .unwrap_or_else(|_| entry.path());
            let suite = rel.with_extension("").to_string_lossy().replace('\\', "/");
            let path = entry
                .path()
                .canonicalize()
                .with_context(|| format!("failed to resolve {}", entry.path().display()))?;
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let cases = parse_corpus_file(&suite, &path, &content)?;
            files.push(CorpusFile {
                path,
                suite,
                cases,
                dirty: false,
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(Self { files })
    }

    pub fn files(&self) -> &[CorpusFile] {
        &self.files
    }

    pub fn files_mut(&mut self) -> &mut [CorpusFile] {
        &mut self.files
    }

    /// Rewrite every file whose expectations were blessed.
    pub fn write_updates(&mut self) -> Result<()> {
        for file in &mut self.files {
            if file.dirty {
                fs::write(&file.path, file.render())
                    .with_context(|| format!("failed to update {}", file.path.display()))?;
                file.dirty = false;
            }
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct CorpusFile {
    pub path: PathBuf,
    pub suite: String,
    pub cases: Vec<CorpusCase>,
    pub(crate) dirty: bool,
}

impl CorpusFile {
    pub fn cases(&self) -> &[CorpusCase] {
        &self.cases
    }

    pub fn render(&self) -> String {
        let mut buf = String::new();
        for (idx, case) in self.cases.iter().enumerate() {
            if idx > 0 {
                buf.push_str("\n\n");
            }
            buf.push_str(case.render().trim_end_matches('\n'));
            buf.push('\n');
        }
        buf
    }
}

#[derive(Debug, Clone)]
pub struct CorpusCase {
    pub suite: String,
    pub name: String,
    pub args: Vec<String>,
    pub files: Vec<TestFile>,
    pub expectations: Vec<CorpusCaseExpectation>,
    /// `$//` comment lines preceding the case
    pub comments: Vec<String>,
}

impl CorpusCase {
    fn new(suite: &str, name: String, comments: Vec<String>) -> Self {
        Self {
            suite: suite.to_string(),
            name,
            args: Vec::new(),
            files: Vec::new(),
            expectations: Vec::new(),
            comments,
        }
    }

    pub fn id(&self) -> String {
        format!("{}::{}", self.suite, self.name)
    }

    pub fn file(&self, path: &str) -> Option<&TestFile> {
        self.files.iter().find(|file| file.path == path)
    }

    pub fn expectation(&self, kind: &str) -> Option<&str> {
        self.expectations
            .iter()
            .find(|entry| entry.kind == kind)
            .map(|entry| entry.value.as_str())
    }

    pub fn render(&self) -> String {
        let mut buf = String::new();
        for comment in &self.comments {
            buf.push_str(comment);
            buf.push('\n');
        }
        buf.push_str(CASE_BANNER);
        buf.push('\n');
        buf.push_str(&self.name);
        buf.push('\n');
        buf.push_str(CASE_BANNER);
        buf.push_str("\n\n");
        if !self.args.is_empty() {
            buf.push_str(&format!("args: {}\n\n", join(&self.args)));
        }

        for file in &self.files {
            buf.push_str(&format!("--- file: {} ---\n", file.path));
            push_section_body(&mut buf, &file.contents);
        }
        for expect in &self.expectations {
            buf.push_str(&format!("--- expect:{} ---\n", expect.kind));
            push_section_body(&mut buf, &expect.value);
        }
        buf
    }
}

fn push_section_body(buf: &mut String, body: &str) {
    buf.push_str(body);
    if !body.ends_with('\n') {
        buf.push('\n');
    }
    buf.push('\n');
}

#[derive(Debug, Clone)]
pub struct TestFile {
    pub path: String,
    pub contents: String,
}

#[derive(Debug, Clone)]
pub struct CorpusCaseExpectation {
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Clone)]
enum SectionHeader {
    File { path: String },
    Expect { kind: String },
}

fn parse_corpus_file(suite: &str, path: &Path, content: &str) -> Result<Vec<CorpusCase>> {
    let mut cases = Vec::new();
    let mut current: Option<CorpusCase> = None;
    let mut pending_section: Option<SectionHeader> = None;
    let mut section_lines: Vec<String> = Vec::new();
    let mut awaiting_name = false;
    let mut awaiting_close = false;
    let mut pending_comments: Vec<String> = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim_end_matches('\r');
        let trimmed = line.trim();

        if trimmed.starts_with("$//") {
            pending_comments.push(line.to_string());
            continue;
        }

        if awaiting_close {
            if trimmed.is_empty() {
                continue;
            }
            if !is_banner_line(line) {
                return Err(anyhow!(
                    "expected closing banner after case '{}' in {}",
                    current.as_ref().map_or("unknown", |c| c.name.as_str()),
                    path.display()
                ));
            }
            awaiting_close = false;
            continue;
        }

        if awaiting_name {
            if trimmed.is_empty() {
                continue;
            }
            current = Some(CorpusCase::new(
                suite,
                slugify_case_name(trimmed),
                std::mem::take(&mut pending_comments),
            ));
            awaiting_name = false;
            awaiting_close = true;
            continue;
        }

        if is_banner_line(line) {
            finalize_section(&mut current, &mut pending_section, &mut section_lines)?;
            cases.extend(current.take());
            awaiting_name = true;
            continue;
        }

        if let Some(section) = parse_section_header(line) {
            finalize_section(&mut current, &mut pending_section, &mut section_lines)?;
            pending_section = Some(section);
            continue;
        }

        if pending_section.is_some() {
            section_lines.push(line.to_string());
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        let case = current.as_mut().ok_or_else(|| {
            anyhow!("content encountered before case header in {}", path.display())
        })?;
        match trimmed.split_once(':') {
            Some(("args", value)) => {
                case.args = split(value.trim())
                    .map_err(|err| anyhow!("invalid args in {}: {}", path.display(), err))?;
            }
            Some((other, _)) => {
                return Err(anyhow!(
                    "unsupported metadata '{}' in {} case {}",
                    other.trim(),
                    path.display(),
                    case.name
                ));
            }
            None => {
                return Err(anyhow!(
                    "unexpected line '{}' in {} (within case {})",
                    line,
                    path.display(),
                    case.name
                ));
            }
        }
    }

    finalize_section(&mut current, &mut pending_section, &mut section_lines)?;
    if awaiting_name || awaiting_close {
        return Err(anyhow!(
            "unterminated banner in {} (missing case name or closing separator)",
            path.display()
        ));
    }
    cases.extend(current.take());

    if cases.is_empty() {
        return Err(anyhow!(
            "corpus file {} does not contain any cases",
            path.display()
        ));
    }
    for case in &cases {
        if !case.files.iter().any(|file| file.path.ends_with(".json")) {
            return Err(anyhow!(
                "case {} in {} does not declare a .json dataset file",
                case.id(),
                path.display()
            ));
        }
    }

    Ok(cases)
}

fn is_banner_line(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 5 && trimmed.chars().all(|ch| ch == '=')
}

fn parse_section_header(line: &str) -> Option<SectionHeader> {
    if !line.starts_with("---") || !line.ends_with("---") {
        return None;
    }

    let inner = line.trim_start_matches('-').trim_end_matches('-').trim();
    if let Some(rest) = inner.strip_prefix("file:") {
        return Some(SectionHeader::File {
            path: rest.trim().to_string(),
        });
    }
    if let Some(rest) = inner.strip_prefix("expect:") {
        return Some(SectionHeader::Expect {
            kind: rest.trim().to_string(),
        });
    }
    None
}

fn finalize_section(
    current: &mut Option<CorpusCase>,
    pending: &mut Option<SectionHeader>,
    lines: &mut Vec<String>,
) -> Result<()> {
    let Some(section) = pending.take() else {
        lines.clear();
        return Ok(());
    };
    let case = current
        .as_mut()
        .ok_or_else(|| anyhow!("section declared before any case header"))?;

    // The blank separator line before the next header is not content.
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    let mut content = lines.join("\n");
    if !content.is_empty() {
        content.push('\n');
    }

    match section {
        SectionHeader::File { path } => case.files.push(TestFile {
            path,
            contents: content,
        }),
        SectionHeader::Expect { kind } => case.expectations.push(CorpusCaseExpectation {
            kind,
            value: content,
        }),
    }
    lines.clear();
    Ok(())
}
