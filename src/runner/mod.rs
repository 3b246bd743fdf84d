// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Drives a [`Scenario`] (and its [`Feature`]'s [`Background`], if any)
//! through a [`Registry`], producing timed, structured results.
//!
//! The runner never propagates a handler's error out of
//! [`run_scenario`]; every failure is captured as a [`ScenarioResult`]
//! field instead.

pub mod error;

use std::time::{Duration, Instant};

pub use self::error::{StepFailure, UndefinedStepError};
use crate::ast::{Background, Feature, Scenario, ScenarioDefinition, Step};
use crate::expand;
use crate::filter::TagFilter;
use crate::result::{FeatureResult, ScenarioResult, StepResult, StepStatus};
use crate::step::Registry;

/// Runs a single scenario (with its background, if supplied) against
/// `registry`, mutating `world` in place as handlers execute.
///
/// `tags` is the already-unioned tag set (feature tags followed by
/// scenario tags) to record on the result; this function does not
/// union them itself so it stays usable outside [`run_feature`].
pub async fn run_scenario<World>(
    world: &mut World,
    registry: &Registry<World>,
    background: Option<&Background>,
    scenario: &Scenario,
    tags: Vec<String>,
    feature_name: Option<&str>,
) -> ScenarioResult {
    let scenario_start = Instant::now();

    if !registry.registration_errors().is_empty() {
        let patterns: Vec<&str> =
            registry.registration_errors().iter().map(|e| e.pattern.as_str()).collect();
        log::warn!(
            "refusing to run '{}': {} invalid step pattern(s) registered",
            scenario.name,
            patterns.len()
        );
        return ScenarioResult {
            name: scenario.name.clone(),
            passed: false,
            skipped: false,
            error: Some(format!(
                "{} step pattern(s) failed to register: {}",
                patterns.len(),
                patterns.join(", ")
            )),
            steps_executed: 0,
            tags,
            step_results: Vec::new(),
            duration: scenario_start.elapsed(),
        };
    }

    let steps: Vec<&Step> = background
        .iter()
        .flat_map(|b| b.steps.iter())
        .chain(scenario.steps.iter())
        .collect();

    let mut step_results = Vec::with_capacity(steps.len());
    let mut steps_executed = 0;
    let mut failure: Option<String> = None;

    for step in steps {
        if failure.is_some() {
            step_results.push(StepResult {
                keyword: step.keyword.as_str(),
                text: step.text.clone(),
                status: StepStatus::Skipped,
                duration: Duration::ZERO,
                error: None,
                source_line: step.source_line,
            });
            continue;
        }

        let step_start = Instant::now();
        match registry.find_match(step) {
            Ok(Some((handler, step_match))) => match handler(world, step_match).await {
                Ok(()) => {
                    step_results.push(StepResult {
                        keyword: step.keyword.as_str(),
                        text: step.text.clone(),
                        status: StepStatus::Passed,
                        duration: step_start.elapsed(),
                        error: None,
                        source_line: step.source_line,
                    });
                    steps_executed += 1;
                }
                Err(source) => {
                    let err = StepFailure::new(
                        step.keyword.as_str(),
                        step.text.clone(),
                        step.source_line,
                        feature_name.map(str::to_owned),
                        scenario.name.clone(),
                        source.to_string(),
                    );
                    log::debug!("{err}");
                    step_results.push(StepResult {
                        keyword: step.keyword.as_str(),
                        text: step.text.clone(),
                        status: StepStatus::Failed,
                        duration: step_start.elapsed(),
                        error: Some(err.to_string()),
                        source_line: step.source_line,
                    });
                    failure = Some(err.to_string());
                }
            },
            Ok(None) => {
                let err = UndefinedStepError::new(
                    step.keyword.as_str(),
                    step.text.clone(),
                    step.source_line,
                    feature_name.map(str::to_owned),
                    Some(scenario.name.clone()),
                );
                log::debug!("{err}");
                step_results.push(StepResult {
                    keyword: step.keyword.as_str(),
                    text: step.text.clone(),
                    status: StepStatus::Undefined,
                    duration: step_start.elapsed(),
                    error: Some(err.to_string()),
                    source_line: step.source_line,
                });
                failure = Some(err.to_string());
            }
            Err(ambiguity) => {
                // Ambiguity is classified as a failed step, not undefined.
                log::debug!("{ambiguity}");
                step_results.push(StepResult {
                    keyword: step.keyword.as_str(),
                    text: step.text.clone(),
                    status: StepStatus::Failed,
                    duration: step_start.elapsed(),
                    error: Some(ambiguity.to_string()),
                    source_line: step.source_line,
                });
                failure = Some(ambiguity.to_string());
            }
        }
    }

    ScenarioResult {
        name: scenario.name.clone(),
        passed: failure.is_none(),
        skipped: false,
        error: failure,
        steps_executed,
        tags,
        step_results,
        duration: scenario_start.elapsed(),
    }
}

/// Runs every scenario of `feature` (after expanding its outlines)
/// against `registry`, excluding scenarios `tag_filter` rejects.
///
/// Excluded scenarios produce no [`ScenarioResult`] at this layer —
/// recording them as skipped is the caller/collector's responsibility.
pub async fn run_feature<World>(
    world: &mut World,
    registry: &Registry<World>,
    feature: &Feature,
    tag_filter: Option<&TagFilter>,
) -> FeatureResult {
    let feature_start = Instant::now();
    let expanded = expand::expand(feature);

    let mut scenario_results = Vec::new();
    for def in &expanded.scenarios {
        let ScenarioDefinition::Scenario(scenario) = def else {
            continue;
        };
        let tags = feature.tags_for(&scenario.tags);
        if tag_filter.is_some_and(|filter| !filter.matches(&tags)) {
            continue;
        }

        let result = run_scenario(
            world,
            registry,
            feature.background.as_ref(),
            scenario,
            tags,
            Some(feature.name.as_str()),
        )
        .await;
        scenario_results.push(result);
    }

    FeatureResult {
        name: feature.name.clone(),
        source_file: feature.source_file.clone(),
        tags: feature.tags.clone(),
        scenario_results,
        duration: feature_start.elapsed(),
    }
}
