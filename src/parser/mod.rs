// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A stateful, line-oriented [Gherkin] parser.
//!
//! The state machine makes one forward pass over the source, tracking
//! which construct (background, scenario, outline, examples table or
//! doc-string) is currently being accumulated, and finalizes that
//! construct the moment a new top-level keyword or end-of-input is seen.
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

pub mod error;

use std::{
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

pub use self::error::ParseError;
use crate::ast::{
    Background, ExamplesTable, Feature, Scenario, ScenarioDefinition,
    ScenarioOutline, Step, StepKeyword,
};
use crate::data_table::DataTable;

/// Parses `source` into a [`Feature`], attributing it to `source_id` (a
/// file name, full path, or `None` for an in-memory source).
pub fn parse(
    source: &str,
    source_id: Option<PathBuf>,
) -> Result<Feature, ParseError> {
    let mut builder = Builder::default();
    let mut doc_string: Option<DocStringState> = None;

    for (idx, raw_line) in source.lines().enumerate() {
        let line_no = idx + 1;

        if let Some(ds) = doc_string.as_mut() {
            let trimmed = raw_line.trim();
            if is_doc_string_delimiter(trimmed) {
                let content = ds.lines.join("\n");
                builder.attach_doc_string(content, ds.return_scope);
                doc_string = None;
            } else {
                ds.lines.push(strip_indent(raw_line, ds.indent));
            }
            continue;
        }

        let trimmed = raw_line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix('@') {
            builder.pending_tags.extend(
                std::iter::once(rest)
                    .chain(std::iter::empty())
                    .flat_map(str::split_whitespace)
                    .map(|t| t.trim_start_matches('@').to_owned()),
            );
            continue;
        }

        if trimmed.starts_with('|') {
            builder.pending_table.push(parse_table_row(trimmed));
            continue;
        }

        if is_doc_string_delimiter(trimmed) {
            doc_string = Some(DocStringState {
                indent: leading_whitespace_width(raw_line),
                lines: Vec::new(),
                start_line: line_no,
                return_scope: builder.scope,
            });
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("Feature:") {
            builder.flush_pending_table();
            builder.finalize_current(&source_id)?;
            builder.feature_name = Some(rest.trim().to_owned());
            builder.feature_tags = std::mem::take(&mut builder.pending_tags);
            builder.scope = Scope::Feature;
            builder.seen_feature = true;
            continue;
        }

        if trimmed.strip_prefix("Background:").is_some() {
            builder.flush_pending_table();
            builder.finalize_current(&source_id)?;
            builder.pending_tags.clear();
            builder.current_steps = Vec::new();
            builder.current_source_line = line_no;
            builder.scope = Scope::Background;
            continue;
        }

        if let Some(rest) = trimmed
            .strip_prefix("Scenario Outline:")
            .or_else(|| trimmed.strip_prefix("Scenario Template:"))
        {
            builder.flush_pending_table();
            builder.finalize_current(&source_id)?;
            builder.current_name = rest.trim().to_owned();
            builder.current_tags = std::mem::take(&mut builder.pending_tags);
            builder.current_steps = Vec::new();
            builder.current_examples = Vec::new();
            builder.current_source_line = line_no;
            builder.scope = Scope::Outline;
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("Scenario:") {
            builder.flush_pending_table();
            builder.finalize_current(&source_id)?;
            builder.current_name = rest.trim().to_owned();
            builder.current_tags = std::mem::take(&mut builder.pending_tags);
            builder.current_steps = Vec::new();
            builder.current_source_line = line_no;
            builder.scope = Scope::Scenario;
            continue;
        }

        if trimmed.strip_prefix("Examples:").is_some()
            || trimmed.strip_prefix("Scenarios:").is_some()
        {
            builder.flush_pending_table();
            builder.current_examples_tags =
                std::mem::take(&mut builder.pending_tags);
            builder.current_examples_line = line_no;
            builder.scope = Scope::Examples;
            continue;
        }

        if let Some((keyword, rest)) = step_prefix(trimmed) {
            builder.flush_pending_table();
            builder
                .current_steps
                .push(Step::new(keyword, rest.trim(), line_no));
            continue;
        }

        if builder.scope == Scope::Feature {
            builder.description_lines.push(trimmed.to_owned());
        }
    }

    if let Some(ds) = doc_string {
        return Err(ParseError::UnterminatedDocString {
            source: source_id,
            start_line: ds.start_line,
        });
    }

    builder.flush_pending_table();
    builder.finalize_current(&source_id)?;

    if !builder.seen_feature {
        return Err(ParseError::NoFeatureFound { source: source_id });
    }

    Ok(Feature {
        name: builder.feature_name.unwrap_or_default(),
        description: builder.description_lines.join("\n").trim().to_owned(),
        tags: builder.feature_tags,
        background: builder.background,
        scenarios: builder.scenarios,
        source_file: source_id,
    })
}

/// Parses `path`, storing only the file's last path component as the
/// [`Feature::source_file`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Feature, ParseError> {
    let path = path.as_ref();
    let text = read_to_string(path)?;
    parse(&text, path.file_name().map(PathBuf::from))
}

/// Parses `path`, storing the full path as the [`Feature::source_file`].
pub fn parse_file_storing_full_path(
    path: impl AsRef<Path>,
) -> Result<Feature, ParseError> {
    let path = path.as_ref();
    let text = read_to_string(path)?;
    parse(&text, Some(path.to_path_buf()))
}

fn read_to_string(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|cause| ParseError::Io {
        source: Some(path.to_path_buf()),
        cause: cause.to_string(),
    })
}

/// Result of parsing a batch of sources: every feature that parsed
/// successfully, plus every per-source error, neither of which aborts
/// the other.
#[derive(Debug, Default)]
pub struct BatchParseResult {
    /// Features parsed successfully, in enumeration order.
    pub features: Vec<Feature>,
    /// Errors from sources that failed to parse.
    pub errors: Vec<ParseError>,
}

/// Enumerates `*.feature` files under `path` recursively, sorted
/// lexicographically by file name, parsing each with its full path
/// stored. A single unparseable file is logged and skipped rather than
/// aborting the whole batch.
pub fn parse_directory(path: impl AsRef<Path>) -> BatchParseResult {
    let mut paths: Vec<PathBuf> = WalkDir::new(path.as_ref())
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("feature"))
        })
        .map(walkdir::DirEntry::into_path)
        .collect();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut result = BatchParseResult::default();
    for path in paths {
        match parse_file_storing_full_path(&path) {
            Ok(feature) => result.features.push(feature),
            Err(err) => {
                log::warn!("skipping {}: {err}", path.display());
                result.errors.push(err);
            }
        }
    }
    result
}

/// A path specification accepted on a command line: a path, optionally
/// suffixed with `:line[:line...]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeaturePath {
    /// Resolved (possibly-relative-made-absolute) path.
    pub path: PathBuf,
    /// Line numbers requested on this path, in declaration order.
    pub lines: Vec<usize>,
    /// Whether this path names a directory.
    pub is_directory: bool,
}

/// Parses a `path[:n[:m[...]]]` specification against `base`.
///
/// Trailing colon-separated non-negative integer tokens are consumed as
/// line numbers (in declaration order); the remaining prefix is the
/// path. A trailing path separator forces `is_directory = true` even if
/// the path does not exist on disk.
#[must_use]
pub fn parse_feature_path(spec: &str, base: &Path) -> FeaturePath {
    let forced_directory = spec.ends_with('/') || spec.ends_with('\\');
    let trimmed = spec.trim_end_matches(['/', '\\']);

    let mut parts: Vec<&str> = trimmed.split(':').collect();
    let mut lines = Vec::new();
    while parts.len() > 1 {
        match parts[parts.len() - 1].parse::<usize>() {
            Ok(n) => {
                lines.push(n);
                parts.pop();
            }
            Err(_) => break,
        }
    }
    lines.reverse();

    let path_str = parts.join(":");
    let raw_path = Path::new(&path_str);
    let path = if raw_path.is_absolute() {
        raw_path.to_path_buf()
    } else {
        base.join(raw_path)
    };
    let is_directory = forced_directory || path.is_dir();

    FeaturePath { path, lines, is_directory }
}

/// Result of resolving a batch of [`FeaturePath`]s: every parsed feature,
/// every per-source error, and the merged per-path line-filter sets.
#[derive(Debug, Default)]
pub struct ParsedPaths {
    /// Features parsed successfully, in resolution order.
    pub features: Vec<Feature>,
    /// Errors from sources that failed to parse.
    pub errors: Vec<ParseError>,
    /// Line numbers requested per path, merged across duplicate entries.
    pub line_filters: HashMap<PathBuf, BTreeSet<usize>>,
}

/// Resolves a batch of [`FeaturePath`]s. Duplicate paths are parsed only
/// once; their line-filter sets are merged. File and directory entries
/// may be intermixed freely.
#[must_use]
pub fn parse_paths(paths: &[FeaturePath]) -> ParsedPaths {
    let mut order: Vec<PathBuf> = Vec::new();
    let mut is_directory: HashMap<PathBuf, bool> = HashMap::new();
    let mut line_filters: HashMap<PathBuf, BTreeSet<usize>> = HashMap::new();

    for fp in paths {
        if !line_filters.contains_key(&fp.path) {
            order.push(fp.path.clone());
        }
        is_directory.insert(fp.path.clone(), fp.is_directory);
        line_filters.entry(fp.path.clone()).or_default().extend(&fp.lines);
    }

    let mut out = ParsedPaths { line_filters, ..ParsedPaths::default() };
    for path in order {
        if is_directory.get(&path).copied().unwrap_or(false) {
            let batch = parse_directory(&path);
            out.features.extend(batch.features);
            out.errors.extend(batch.errors);
        } else {
            match parse_file_storing_full_path(&path) {
                Ok(feature) => out.features.push(feature),
                Err(err) => {
                    log::warn!("skipping {}: {err}", path.display());
                    out.errors.push(err);
                }
            }
        }
    }
    out
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum Scope {
    #[default]
    Idle,
    Feature,
    Background,
    Scenario,
    Outline,
    Examples,
}

struct DocStringState {
    indent: usize,
    lines: Vec<String>,
    start_line: usize,
    return_scope: Scope,
}

#[derive(Default)]
struct Builder {
    feature_name: Option<String>,
    feature_tags: Vec<String>,
    description_lines: Vec<String>,
    background: Option<Background>,
    scenarios: Vec<ScenarioDefinition>,

    pending_tags: Vec<String>,
    pending_table: Vec<Vec<String>>,

    scope: Scope,
    current_name: String,
    current_tags: Vec<String>,
    current_steps: Vec<Step>,
    current_source_line: usize,
    current_examples: Vec<ExamplesTable>,
    current_examples_tags: Vec<String>,
    current_examples_line: usize,

    seen_feature: bool,
}

impl Builder {
    /// Attaches accumulated `pending_table` rows per the active scope,
    /// or discards them if there is nowhere to attach.
    fn flush_pending_table(&mut self) {
        if self.pending_table.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.pending_table);
        match self.scope {
            Scope::Examples => {
                self.current_examples.push(ExamplesTable {
                    tags: std::mem::take(&mut self.current_examples_tags),
                    table: DataTable::new(rows),
                    source_line: self.current_examples_line,
                });
            }
            Scope::Background | Scope::Scenario | Scope::Outline => {
                if let Some(last) = self.current_steps.last_mut() {
                    last.table = Some(DataTable::new(rows));
                }
            }
            Scope::Idle | Scope::Feature => {}
        }
    }

    /// Attaches a closed doc-string to the last step of `scope`, or
    /// discards it if there is no such step.
    fn attach_doc_string(&mut self, content: String, scope: Scope) {
        match scope {
            Scope::Background | Scope::Scenario | Scope::Outline => {
                if let Some(last) = self.current_steps.last_mut() {
                    last.doc_string = Some(content);
                }
            }
            Scope::Idle | Scope::Feature | Scope::Examples => {}
        }
    }

    /// Finalizes whatever construct `self.scope` names, appending it to
    /// the feature under construction, then returns to the bare
    /// [`Scope::Feature`] state.
    fn finalize_current(
        &mut self,
        source: &Option<PathBuf>,
    ) -> Result<(), ParseError> {
        match self.scope {
            Scope::Background => {
                if self.background.is_some() {
                    return Err(ParseError::DuplicateBackground {
                        source: source.clone(),
                        line: self.current_source_line,
                    });
                }
                self.background = Some(Background {
                    steps: std::mem::take(&mut self.current_steps),
                    source_line: self.current_source_line,
                });
            }
            Scope::Scenario => {
                self.scenarios.push(ScenarioDefinition::Scenario(Scenario {
                    name: std::mem::take(&mut self.current_name),
                    tags: std::mem::take(&mut self.current_tags),
                    steps: std::mem::take(&mut self.current_steps),
                    source_line: self.current_source_line,
                }));
            }
            Scope::Outline | Scope::Examples => {
                self.scenarios.push(ScenarioDefinition::Outline(ScenarioOutline {
                    name: std::mem::take(&mut self.current_name),
                    tags: std::mem::take(&mut self.current_tags),
                    steps: std::mem::take(&mut self.current_steps),
                    examples: std::mem::take(&mut self.current_examples),
                    source_line: self.current_source_line,
                }));
            }
            Scope::Idle | Scope::Feature => {}
        }
        self.scope = if self.seen_feature { Scope::Feature } else { Scope::Idle };
        Ok(())
    }
}

fn is_doc_string_delimiter(trimmed: &str) -> bool {
    trimmed == "\"\"\"" || trimmed == "```"
}

fn leading_whitespace_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn strip_indent(line: &str, indent: usize) -> String {
    if line.chars().count() >= indent {
        line.chars().skip(indent).collect()
    } else {
        line.trim().to_owned()
    }
}

fn parse_table_row(trimmed: &str) -> Vec<String> {
    trimmed
        .trim_start_matches('|')
        .trim_end_matches('|')
        .split('|')
        .map(|cell| cell.trim().to_owned())
        .collect()
}

fn step_prefix(trimmed: &str) -> Option<(StepKeyword, &str)> {
    for (prefix, keyword) in [
        ("Given ", StepKeyword::Given),
        ("When ", StepKeyword::When),
        ("Then ", StepKeyword::Then),
        ("And ", StepKeyword::And),
        ("But ", StepKeyword::But),
    ] {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            return Some((keyword, rest));
        }
    }
    None
}
