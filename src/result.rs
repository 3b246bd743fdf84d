// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Result types: per-step outcomes rolled up into per-scenario,
//! per-feature and per-run aggregates.

use std::path::PathBuf;
use std::time::Duration;

/// Outcome of a single executed (or skipped) step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepStatus {
    /// The handler ran to completion without error.
    Passed,
    /// The handler raised an error.
    Failed,
    /// No step definition matched.
    Undefined,
    /// Not executed because an earlier step in the same scenario
    /// failed or was undefined.
    Skipped,
}

/// Result of one step within a scenario.
#[derive(Clone, Debug, PartialEq)]
pub struct StepResult {
    /// Keyword the step was written with.
    pub keyword: &'static str,
    /// Step text.
    pub text: String,
    /// Outcome of this step.
    pub status: StepStatus,
    /// Wall-clock time spent on this step. Zero for skipped steps.
    pub duration: Duration,
    /// Human-readable error, present iff `status` is `Failed` or
    /// `Undefined`.
    pub error: Option<String>,
    /// 1-based source line of this step.
    pub source_line: usize,
}

/// Result of running one scenario (background steps included).
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioResult {
    /// Scenario name.
    pub name: String,
    /// `true` iff every step passed. Also `true` when `skipped`.
    pub passed: bool,
    /// `true` only when this scenario was excluded by a filter before
    /// running — never set on account of a failure.
    pub skipped: bool,
    /// The raised error, if any.
    pub error: Option<String>,
    /// Count of steps that ran to completion before a failure (or all
    /// of them, on success). Zero when `skipped`.
    pub steps_executed: usize,
    /// Union of feature and scenario tags visible to this scenario.
    pub tags: Vec<String>,
    /// Every step of background+scenario, in execution order.
    pub step_results: Vec<StepResult>,
    /// Wall-clock time spent on the whole scenario.
    pub duration: Duration,
}

impl ScenarioResult {
    /// Builds the `ScenarioResult` for a scenario excluded by a filter:
    /// passed, skipped, with no steps recorded.
    #[must_use]
    pub fn skipped(name: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            skipped: true,
            error: None,
            steps_executed: 0,
            tags,
            step_results: Vec::new(),
            duration: Duration::ZERO,
        }
    }
}

/// Result of running every non-excluded scenario of one feature.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureResult {
    /// Feature name.
    pub name: String,
    /// Identifier of the source this feature was parsed from.
    pub source_file: Option<PathBuf>,
    /// Feature-level tags.
    pub tags: Vec<String>,
    /// One result per scenario that was run or explicitly skipped.
    pub scenario_results: Vec<ScenarioResult>,
    /// Wall-clock time spent on the whole feature.
    pub duration: Duration,
}

impl FeatureResult {
    /// Count of scenarios that passed and were not skipped.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.scenario_results.iter().filter(|s| s.passed && !s.skipped).count()
    }

    /// Count of scenarios that did not pass (skipped scenarios never
    /// count as failed).
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.scenario_results.iter().filter(|s| !s.passed).count()
    }

    /// Count of scenarios excluded by a filter.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.scenario_results.iter().filter(|s| s.skipped).count()
    }

    /// `true` iff every non-skipped scenario passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.scenario_results.iter().filter(|s| !s.skipped).all(|s| s.passed)
    }

    /// Count of steps across every scenario with the given `status`.
    #[must_use]
    pub fn step_count(&self, status: StepStatus) -> usize {
        self.scenario_results
            .iter()
            .flat_map(|s| &s.step_results)
            .filter(|r| r.status == status)
            .count()
    }
}

/// Result of an entire test run: every feature, in the order it was
/// executed.
#[derive(Clone, Debug, PartialEq)]
pub struct TestRunResult {
    /// Feature results, in execution order.
    pub feature_results: Vec<FeatureResult>,
    /// Wall-clock instant the run began, as elapsed time since an
    /// arbitrary epoch chosen by the caller.
    pub started_at: Duration,
    /// Wall-clock instant the run ended, as elapsed time since the same
    /// epoch as `started_at`.
    pub ended_at: Duration,
}

impl TestRunResult {
    /// Total scenario count across every feature.
    #[must_use]
    pub fn total_scenario_count(&self) -> usize {
        self.feature_results.iter().map(|f| f.scenario_results.len()).sum()
    }

    /// Total count of steps across every feature with the given
    /// `status`.
    #[must_use]
    pub fn total_step_count(&self, status: StepStatus) -> usize {
        self.feature_results.iter().map(|f| f.step_count(status)).sum()
    }

    /// `true` iff every feature's non-skipped scenarios passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.feature_results.iter().all(FeatureResult::all_passed)
    }
}
