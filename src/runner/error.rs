// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors raised while driving a single step, carrying the identifying
//! context (keyword, text, source line, feature, scenario) every
//! human-visible rendering needs.

use derive_more::with_trait::{Display, Error};

/// No step definition matched a step's text.
#[derive(Clone, Debug, Display, Error)]
#[display(
    "Undefined step at line {source_line}: {keyword} {text}{}",
    context_suffix(feature_name, scenario_name)
)]
pub struct UndefinedStepError {
    /// Keyword the step was written with.
    #[error(not(source))]
    pub keyword: &'static str,
    /// Step text.
    #[error(not(source))]
    pub text: String,
    /// 1-based source line of the step.
    #[error(not(source))]
    pub source_line: usize,
    /// Name of the containing source, if known.
    #[error(not(source))]
    pub feature_name: Option<String>,
    /// Name of the containing scenario, if known.
    #[error(not(source))]
    pub scenario_name: Option<String>,
}

impl UndefinedStepError {
    /// Creates a new [`UndefinedStepError`].
    #[must_use]
    pub fn new(
        keyword: &'static str,
        text: impl Into<String>,
        source_line: usize,
        feature_name: Option<String>,
        scenario_name: Option<String>,
    ) -> Self {
        Self {
            keyword,
            text: text.into(),
            source_line,
            feature_name,
            scenario_name,
        }
    }
}

/// A step's handler raised an error.
#[derive(Clone, Debug, Display, Error)]
#[display(
    "Step failed at line {source_line} in '{scenario_name}': {keyword} {text} — {inner}"
)]
pub struct StepFailure {
    /// Keyword the step was written with.
    #[error(not(source))]
    pub keyword: &'static str,
    /// Step text.
    #[error(not(source))]
    pub text: String,
    /// 1-based source line of the step.
    #[error(not(source))]
    pub source_line: usize,
    /// Name of the containing feature, if known.
    #[error(not(source))]
    pub feature_name: Option<String>,
    /// Name of the containing scenario.
    #[error(not(source))]
    pub scenario_name: String,
    /// The handler's error message.
    #[error(not(source))]
    pub inner: String,
}

impl StepFailure {
    /// Creates a new [`StepFailure`].
    #[must_use]
    pub fn new(
        keyword: &'static str,
        text: impl Into<String>,
        source_line: usize,
        feature_name: Option<String>,
        scenario_name: impl Into<String>,
        inner: impl Into<String>,
    ) -> Self {
        Self {
            keyword,
            text: text.into(),
            source_line,
            feature_name,
            scenario_name: scenario_name.into(),
            inner: inner.into(),
        }
    }
}

fn context_suffix(feature_name: &Option<String>, scenario_name: &Option<String>) -> String {
    match (feature_name, scenario_name) {
        (Some(file), Some(scenario)) => format!(" ({file} / {scenario})"),
        (Some(file), None) => format!(" ({file})"),
        (None, Some(scenario)) => format!(" ({scenario})"),
        (None, None) => String::new(),
    }
}
