// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Value types describing a parsed [Gherkin] document.
//!
//! Everything here is an immutable tree built once by the [`parser`] and
//! consumed by the [`expand`]er and [`runner`]. None of these types are
//! mutated after construction.
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference
//! [`parser`]: crate::parser
//! [`expand`]: crate::expand
//! [`runner`]: crate::runner

use std::path::PathBuf;

use crate::data_table::DataTable;

/// Keyword a [`Step`] was written with.
///
/// Matching never inspects this value (see [`crate::step::Registry`]); it is
/// retained only so error messages and reports can reproduce the original
/// source line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StepKeyword {
    /// `Given`.
    Given,
    /// `When`.
    When,
    /// `Then`.
    Then,
    /// `And`.
    And,
    /// `But`.
    But,
}

impl StepKeyword {
    /// Returns the literal keyword text, without trailing whitespace.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

/// One line of a [`Scenario`], [`ScenarioOutline`] or [`Background`].
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    /// Keyword the step was written with (advisory only, see
    /// [`StepKeyword`]).
    pub keyword: StepKeyword,

    /// Step text, with the keyword and leading whitespace removed.
    pub text: String,

    /// [`DataTable`] attached to this step, if any.
    pub table: Option<DataTable>,

    /// Doc-string attached to this step, already stripped of its common
    /// indent and delimiters, if any.
    pub doc_string: Option<String>,

    /// 1-based source line of this step.
    pub source_line: usize,
}

impl Step {
    /// Creates a new [`Step`] with no attached table or doc-string.
    #[must_use]
    pub fn new(
        keyword: StepKeyword,
        text: impl Into<String>,
        source_line: usize,
    ) -> Self {
        Self {
            keyword,
            text: text.into(),
            table: None,
            doc_string: None,
            source_line,
        }
    }
}

/// Header + data rows describing one parameterization of a
/// [`ScenarioOutline`].
#[derive(Clone, Debug, PartialEq)]
pub struct ExamplesTable {
    /// Tags attached to this particular examples table (without the
    /// leading `@`), combined with the outline's own tags during
    /// expansion.
    pub tags: Vec<String>,

    /// Header row followed by data rows.
    pub table: DataTable,

    /// 1-based source line of the `Examples:`/`Scenarios:` keyword.
    pub source_line: usize,
}

/// Step sequence prefixing every [`Scenario`] of a [`Feature`].
#[derive(Clone, Debug, PartialEq)]
pub struct Background {
    /// Ordered steps.
    pub steps: Vec<Step>,

    /// 1-based source line of the `Background:` keyword.
    pub source_line: usize,
}

/// A concrete, runnable scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct Scenario {
    /// Scenario name, as written after `Scenario:`.
    pub name: String,

    /// Tags attached directly to this scenario (without the leading `@`).
    pub tags: Vec<String>,

    /// Ordered steps.
    pub steps: Vec<Step>,

    /// 1-based source line of the `Scenario:` keyword (or, for a scenario
    /// expanded from an outline, the outline's own source line).
    pub source_line: usize,
}

/// A parameterized scenario template, paired with one or more
/// [`ExamplesTable`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioOutline {
    /// Outline name, as written after `Scenario Outline:`.
    pub name: String,

    /// Tags attached directly to the outline (without the leading `@`).
    pub tags: Vec<String>,

    /// Ordered steps, containing `<placeholder>` tokens.
    pub steps: Vec<Step>,

    /// Examples tables, in declaration order.
    pub examples: Vec<ExamplesTable>,

    /// 1-based source line of the `Scenario Outline:` keyword.
    pub source_line: usize,
}

/// A scenario or scenario outline, as it appears in a [`Feature`]'s
/// declaration order.
#[derive(Clone, Debug, PartialEq)]
pub enum ScenarioDefinition {
    /// A concrete scenario.
    Scenario(Scenario),
    /// A parameterized scenario template.
    Outline(ScenarioOutline),
}

impl ScenarioDefinition {
    /// Returns the 1-based source line of this definition.
    #[must_use]
    pub fn source_line(&self) -> usize {
        match self {
            Self::Scenario(s) => s.source_line,
            Self::Outline(o) => o.source_line,
        }
    }

    /// Returns the name of this definition.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scenario(s) => &s.name,
            Self::Outline(o) => &o.name,
        }
    }
}

/// Top-level container parsed from a single [Gherkin] source.
///
/// [Gherkin]: https://cucumber.io/docs/gherkin/reference
#[derive(Clone, Debug, PartialEq)]
pub struct Feature {
    /// Feature name, as written after `Feature:`.
    pub name: String,

    /// Free-form description lines following the `Feature:` line, joined
    /// with `\n` and trimmed.
    pub description: String,

    /// Tags attached to the feature (without the leading `@`).
    pub tags: Vec<String>,

    /// Background shared by every scenario in this feature, if any.
    pub background: Option<Background>,

    /// Scenarios and scenario outlines, in declaration order.
    pub scenarios: Vec<ScenarioDefinition>,

    /// Identifier of the source this feature was parsed from (a file
    /// name, a full path, or nothing for in-memory sources).
    pub source_file: Option<PathBuf>,
}

impl Feature {
    /// Returns the union of every tag visible to `scenario`: the
    /// feature's own tags followed by the scenario's.
    #[must_use]
    pub fn tags_for(&self, scenario_tags: &[String]) -> Vec<String> {
        self.tags
            .iter()
            .cloned()
            .chain(scenario_tags.iter().cloned())
            .collect()
    }
}
