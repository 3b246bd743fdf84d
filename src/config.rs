// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Plain value structs a host adapter assembles from whatever
//! configuration surface it has (CLI flags, environment variables,
//! a config file) and hands to the parser/runner.
//!
//! Parsing the environment-variable surface described in the crate's
//! top-level documentation is the adapter's job, not this crate's; see
//! [`RunnerConfig::from_parts`] for the shape it is expected to land
//! in.

use std::path::PathBuf;

use crate::filter::{ScenarioNameFilter, TagFilter};

/// Configuration for a single parse pass.
#[derive(Clone, Debug, Default)]
pub struct ParserConfig {
    /// Base directory relative paths are resolved against.
    pub base_dir: Option<PathBuf>,
}

/// Configuration for a single run: which scenarios to include and
/// where to write the resulting report.
#[derive(Clone, Debug, Default)]
pub struct RunnerConfig {
    /// Tag-based inclusion/exclusion.
    pub tag_filter: TagFilter,
    /// Scenario-name inclusion, if the host requested one.
    pub name_filter: Option<ScenarioNameFilter>,
    /// Whether an HTML report should be produced.
    pub report_enabled: bool,
    /// Output path for the HTML report, if enabled.
    pub report_path: PathBuf,
}

impl RunnerConfig {
    /// Default report path used when `PICKLE_REPORT_PATH` (or
    /// equivalent host configuration) is unset.
    pub const DEFAULT_REPORT_PATH: &'static str = "pickle-report.html";

    /// Builds a [`RunnerConfig`] from already-parsed parts, applying
    /// the default report path when none is supplied.
    #[must_use]
    pub fn from_parts(
        tag_filter: TagFilter,
        name_filter: Option<ScenarioNameFilter>,
        report_enabled: bool,
        report_path: Option<PathBuf>,
    ) -> Self {
        Self {
            tag_filter,
            name_filter,
            report_enabled,
            report_path: report_path
                .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_REPORT_PATH)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_parts_applies_default_report_path() {
        let config = RunnerConfig::from_parts(TagFilter::default(), None, true, None);
        assert_eq!(config.report_path, PathBuf::from("pickle-report.html"));
    }

    #[test]
    fn from_parts_keeps_explicit_report_path() {
        let config = RunnerConfig::from_parts(
            TagFilter::default(),
            None,
            true,
            Some(PathBuf::from("out/report.html")),
        );
        assert_eq!(config.report_path, PathBuf::from("out/report.html"));
    }
}
