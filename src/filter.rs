// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scenario selection: tag filters, name filters and source-line
//! filters.
//!
//! Every filter here is a pure predicate; none of them touch the
//! filesystem or mutate anything they're handed.

use std::collections::HashSet;

use crate::ast::ScenarioDefinition;

/// Include/exclude tag-set filter.
///
/// Exclusion always wins: a tag present in both sets rejects the
/// candidate. An empty `include` set accepts everything not excluded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagFilter {
    include: HashSet<String>,
    exclude: HashSet<String>,
}

impl TagFilter {
    /// Creates a filter from explicit include/exclude tag sets.
    #[must_use]
    pub fn new(include: HashSet<String>, exclude: HashSet<String>) -> Self {
        Self { include, exclude }
    }

    /// Returns `true` if every tag is allowed through unchanged: no
    /// excludes, no includes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Evaluates the filter against a candidate's tags.
    #[must_use]
    pub fn matches(&self, tags: &[String]) -> bool {
        if tags.iter().any(|t| self.exclude.contains(t)) {
            return false;
        }
        self.include.is_empty() || tags.iter().any(|t| self.include.contains(t))
    }

    /// Merges two filters by unioning both their include and exclude
    /// sets.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            include: self.include.union(&other.include).cloned().collect(),
            exclude: self.exclude.union(&other.exclude).cloned().collect(),
        }
    }
}

/// Scenario-name filter: accepts a name iff its lower-cased form is
/// one of a fixed set.
///
/// An empty filter rejects every name — there is no "accept all" case
/// the way there is for [`TagFilter`] with an empty include set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScenarioNameFilter {
    names: HashSet<String>,
}

impl ScenarioNameFilter {
    /// Creates a filter from a set of scenario names. Names are
    /// lower-cased at construction time.
    #[must_use]
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self { names: names.into_iter().map(|n| n.to_lowercase()).collect() }
    }

    /// Returns `true` if this filter has no names and therefore rejects
    /// everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Evaluates the filter against a candidate scenario name.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.names.contains(&name.to_lowercase())
    }

    /// Merges two filters by unioning their lower-cased name sets.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self { names: self.names.union(&other.names).cloned().collect() }
    }
}

/// Selects scenarios within a single feature by their enclosing source
/// line, per the range-matching rule: a requested line `l` selects the
/// scenario whose `source_line` is the greatest one `<= l`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineFilter {
    lines: Vec<usize>,
}

impl LineFilter {
    /// Creates a filter from a set of requested lines. An empty set
    /// matches every scenario (no line restriction was requested).
    #[must_use]
    pub fn new(lines: impl IntoIterator<Item = usize>) -> Self {
        Self { lines: lines.into_iter().collect() }
    }

    /// Returns `true` if no specific lines were requested.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the set of scenario source-lines, among `scenarios`,
    /// selected by this filter's requested lines.
    #[must_use]
    pub fn select<'a>(
        &self,
        scenarios: &'a [ScenarioDefinition],
    ) -> HashSet<usize> {
        if self.lines.is_empty() {
            return scenarios.iter().map(ScenarioDefinition::source_line).collect();
        }

        let mut source_lines: Vec<usize> =
            scenarios.iter().map(ScenarioDefinition::source_line).collect();
        source_lines.sort_unstable();
        source_lines.dedup();

        self.lines
            .iter()
            .filter_map(|&requested| {
                source_lines.iter().rev().find(|&&line| line <= requested).copied()
            })
            .collect()
    }
}
