//! Exercises the universal invariants a conformant implementation must
//! hold, each pinned down with a concrete representative case rather
//! than full property-test generation.

use std::collections::HashSet;

use gherkin_engine::step::{HandlerFn, StepOutcome};
use gherkin_engine::{expand, filter::LineFilter, parser, runner, Registry, ScenarioDefinition, StepMatch, StepStatus, TagFilter};

#[derive(Default)]
struct World;

fn handler<F>(f: F) -> HandlerFn<World>
where
    F: for<'a> Fn(&'a mut World, StepMatch) -> StepOutcome + 'static,
{
    Box::new(move |world, step_match| {
        let outcome = f(world, step_match);
        Box::pin(async move { outcome })
    })
}

fn ok() -> HandlerFn<World> {
    handler(|_, _| Ok(()))
}

/// Invariant 1: step count matches the number of keyword-prefixed
/// lines outside tables and doc-strings.
#[test]
fn step_count_matches_source_keyword_lines() {
    let source = "Feature: F\n  Scenario: S\n    Given a\n    When b\n    Then c\n    And d\n";
    let feature = parser::parse(source, None).unwrap();
    let ScenarioDefinition::Scenario(scenario) = &feature.scenarios[0] else {
        panic!()
    };
    assert_eq!(scenario.steps.len(), 4);
}

/// Invariant 2: an outline's expanded count equals the sum of every
/// examples table's row count, and every expansion has the same step
/// count as the outline.
#[test]
fn outline_row_count_sums_across_examples_tables() {
    let source = "Feature: F\n  Scenario Outline: O\n    Given a <n>\n    When b <n>\n    Examples:\n      | n |\n      | 1 |\n      | 2 |\n    Examples:\n      | n |\n      | 3 |\n";
    let feature = parser::parse(source, None).unwrap();
    let ScenarioDefinition::Outline(outline) = &feature.scenarios[0] else {
        panic!()
    };
    let expanded = expand::expand_outline(outline);
    assert_eq!(expanded.len(), 3);
    assert!(expanded.iter().all(|s| s.steps.len() == outline.steps.len()));
}

/// Invariant 3: no expanded step text retains a `<name>` token that
/// was a header of its originating row.
#[test]
fn substitution_leaves_no_bound_placeholder_behind() {
    let source = "Feature: F\n  Scenario Outline: O\n    Given I have <n> <fruit>\n    Examples:\n      | n | fruit |\n      | 1 | pear  |\n";
    let feature = parser::parse(source, None).unwrap();
    let ScenarioDefinition::Outline(outline) = &feature.scenarios[0] else {
        panic!()
    };
    let expanded = expand::expand_outline(outline);
    assert!(!expanded[0].steps[0].text.contains("<n>"));
    assert!(!expanded[0].steps[0].text.contains("<fruit>"));
}

/// Invariant 4: a matched step text equals the matched substring —
/// the anchoring admits no leading/trailing slop.
#[test]
fn registry_anchors_full_step_text() {
    let mut registry = Registry::<World>::new();
    registry.given(r"I have \d+ items", ok());

    let exact = gherkin_engine::ast::Step::new(
        gherkin_engine::StepKeyword::Given,
        "I have 5 items",
        1,
    );
    let padded = gherkin_engine::ast::Step::new(
        gherkin_engine::StepKeyword::Given,
        "I have 5 items extra",
        1,
    );

    assert!(registry.find_match(&exact).unwrap().is_some());
    assert!(registry.find_match(&padded).unwrap().is_none());
}

/// Invariant 5: ambiguity is symmetric under registration order.
#[test]
fn ambiguity_is_independent_of_registration_order() {
    let step = gherkin_engine::ast::Step::new(
        gherkin_engine::StepKeyword::Given,
        "I have 3 items",
        1,
    );

    let mut forward = Registry::<World>::new();
    forward.given(r"I have .*", ok());
    forward.given(r"I have (\d+) items", ok());

    let mut backward = Registry::<World>::new();
    backward.given(r"I have (\d+) items", ok());
    backward.given(r"I have .*", ok());

    assert!(forward.find_match(&step).is_err());
    assert!(backward.find_match(&step).is_err());
}

/// Invariant 6: the runner skip law — exactly one failed/undefined
/// step, everything before it passed, everything after it skipped.
#[tokio::test]
async fn runner_skip_law_holds_on_a_failing_scenario() {
    let feature = parser::parse(
        "Feature: F\n  Scenario: S\n    Given a\n    When b\n    Then c\n    And d\n",
        None,
    )
    .unwrap();

    let mut registry = Registry::<World>::new();
    registry.given("a", ok());
    registry.when("b", handler(|_, _| Err("boom".into())));
    registry.then("c", ok());
    registry.given("d", ok());

    let mut world = World;
    let result = runner::run_feature(&mut world, &registry, &feature, None).await;
    let scenario = &result.scenario_results[0];

    assert!(!scenario.passed);
    let failing_idx = scenario
        .step_results
        .iter()
        .position(|s| matches!(s.status, StepStatus::Failed | StepStatus::Undefined))
        .unwrap();

    assert!(scenario.step_results[..failing_idx]
        .iter()
        .all(|s| s.status == StepStatus::Passed));
    assert!(scenario.step_results[failing_idx + 1..]
        .iter()
        .all(|s| s.status == StepStatus::Skipped));
    assert_eq!(
        scenario.step_results.iter().filter(|s| matches!(
            s.status,
            StepStatus::Failed | StepStatus::Undefined
        )).count(),
        1
    );
}

/// Invariant 7: every non-skipped step has a non-negative duration, and
/// a scenario's duration is at least the sum of its steps'.
#[tokio::test]
async fn durations_are_non_negative_and_scenario_bounds_steps() {
    let feature = parser::parse(
        "Feature: F\n  Scenario: S\n    Given a\n    When b\n    Then c\n",
        None,
    )
    .unwrap();

    let mut registry = Registry::<World>::new();
    registry.given("a", ok());
    registry.when("b", ok());
    registry.then("c", ok());

    let mut world = World;
    let result = runner::run_feature(&mut world, &registry, &feature, None).await;
    let scenario = &result.scenario_results[0];

    let step_total: std::time::Duration =
        scenario.step_results.iter().map(|s| s.duration).sum();
    assert!(scenario.duration >= step_total);
    assert!(scenario.step_results.iter().all(|s| s.duration >= std::time::Duration::ZERO));
}

/// Invariant 8: exclusion always wins regardless of the include set.
#[test]
fn tag_filter_exclusion_dominates_include_on_overlap() {
    let filter = TagFilter::new(
        ["smoke".to_string()].into_iter().collect(),
        ["wip".to_string()].into_iter().collect(),
    );
    assert!(!filter.matches(&["smoke".to_string(), "wip".to_string()]));
}

/// Invariant 9: merging filters never loses what either side alone
/// would accept (exclude-empty case) and never gains beyond either
/// side (include-empty case).
#[test]
fn tag_filter_merge_is_monotone() {
    let a = TagFilter::new(["a".to_string()].into_iter().collect(), HashSet::new());
    let b = TagFilter::new(["b".to_string()].into_iter().collect(), HashSet::new());
    let merged = a.merge(&b);
    assert!(merged.matches(&["a".to_string()]));
    assert!(merged.matches(&["b".to_string()]));

    let only_exclude_a = TagFilter::new(HashSet::new(), ["x".to_string()].into_iter().collect());
    let only_exclude_b = TagFilter::new(HashSet::new(), ["y".to_string()].into_iter().collect());
    let merged_excludes = only_exclude_a.merge(&only_exclude_b);
    assert!(!merged_excludes.matches(&["x".to_string()]));
    assert!(!merged_excludes.matches(&["y".to_string()]));
    assert!(merged_excludes.matches(&["z".to_string()]));
}

/// Invariant 10: a line filter selects the scenario whose source line
/// is the greatest one not exceeding the requested line.
#[test]
fn line_filter_selects_enclosing_scenario() {
    let feature = parser::parse(
        "Feature: F\n  Scenario: A\n    Given a\n  Scenario: B\n    Given b\n    Given c\n",
        None,
    )
    .unwrap();
    let lines: Vec<usize> =
        feature.scenarios.iter().map(ScenarioDefinition::source_line).collect();

    let requested_within_b = lines[1] + 1;
    let filter = LineFilter::new([requested_within_b]);
    assert_eq!(filter.select(&feature.scenarios), HashSet::from([lines[1]]));

    let below_everything = LineFilter::new([0]);
    assert!(below_everything.select(&feature.scenarios).is_empty());
}

/// Invariant 11: run-level aggregation sums feature-level counts.
#[tokio::test]
async fn aggregation_sums_across_features() {
    let feature_a = parser::parse("Feature: A\n  Scenario: S1\n    Given a\n", None).unwrap();
    let feature_b = parser::parse(
        "Feature: B\n  Scenario: S2\n    Given a\n  Scenario: S3\n    Given a\n",
        None,
    )
    .unwrap();

    let mut registry = Registry::<World>::new();
    registry.given("a", ok());

    let mut world = World;
    let result_a = runner::run_feature(&mut world, &registry, &feature_a, None).await;
    let result_b = runner::run_feature(&mut world, &registry, &feature_b, None).await;

    let run = gherkin_engine::TestRunResult {
        feature_results: vec![result_a.clone(), result_b.clone()],
        started_at: std::time::Duration::ZERO,
        ended_at: std::time::Duration::ZERO,
    };

    assert_eq!(
        run.total_scenario_count(),
        result_a.scenario_results.len() + result_b.scenario_results.len()
    );
    assert_eq!(
        run.total_step_count(StepStatus::Passed),
        result_a.step_count(StepStatus::Passed) + result_b.step_count(StepStatus::Passed)
    );
}
