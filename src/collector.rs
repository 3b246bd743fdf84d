// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Boundary traits for components this crate depends on but does not
//! implement: a thread-safe result collector and an HTML report
//! renderer. Both are outside the core's scope; a host adapter
//! provides the concrete types.

use std::path::Path;

use crate::result::{ScenarioResult, TestRunResult};

/// A mutex-guarded append log a host adapter feeds scenario results
/// into as they complete, and later drains into a [`TestRunResult`].
///
/// Implementations must serialize `record`, `build_aggregate` and
/// `reset` internally; the core calls them from whatever execution
/// context is driving scenarios and assumes no external locking.
pub trait ResultCollector {
    /// Records one scenario's result under the given feature context.
    fn record(
        &self,
        result: ScenarioResult,
        feature_name: &str,
        feature_tags: &[String],
        source_file: Option<&Path>,
    );

    /// Builds the aggregate [`TestRunResult`] from every result recorded
    /// so far, preserving per-scenario insertion order and grouping by
    /// feature while preserving first-insertion order of each feature.
    fn build_aggregate(&self) -> TestRunResult;

    /// Clears every recorded result.
    fn reset(&self);
}

/// Renders a [`TestRunResult`] as a self-contained HTML report.
pub trait ReportRenderer {
    /// Error produced when writing the report to disk fails.
    type Error;

    /// Generates a self-contained HTML string (inlined CSS/JS) for
    /// `result`.
    fn generate(&self, result: &TestRunResult) -> String;

    /// Writes the generated report to `path`, creating any missing
    /// intermediate directories.
    fn write(&self, result: &TestRunResult, path: &Path) -> Result<(), Self::Error>;
}
