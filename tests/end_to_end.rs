//! End-to-end coverage of parse → expand → run for representative
//! scenarios: a happy path, a background failure, outline expansion
//! naming, ambiguous and undefined steps, and tag-filter merging.

use std::cell::RefCell;
use std::rc::Rc;

use gherkin_engine::step::{HandlerFn, StepOutcome};
use gherkin_engine::{parser, runner, Registry, ScenarioDefinition, StepMatch, StepStatus, TagFilter};

#[derive(Default)]
struct World {
    counter: i64,
}

fn handler<F>(f: F) -> HandlerFn<World>
where
    F: for<'a> Fn(&'a mut World, StepMatch) -> StepOutcome + 'static,
{
    Box::new(move |world, step_match| {
        let outcome = f(world, step_match);
        Box::pin(async move { outcome })
    })
}

#[tokio::test]
async fn e1_simple_happy_path() {
    let feature = parser::parse(
        "Feature: Math\n  Scenario: Add\n    Given I have 5\n    When I add 3\n    Then I get 8\n",
        None,
    )
    .unwrap();

    let mut registry = Registry::<World>::new();
    registry.given(
        r"I have (\d+)",
        handler(|w, m| {
            w.counter = m.get(0).unwrap().parse().unwrap();
            Ok(())
        }),
    );
    registry.when(
        r"I add (\d+)",
        handler(|w, m| {
            w.counter += m.get(0).unwrap().parse::<i64>().unwrap();
            Ok(())
        }),
    );
    registry.then(
        r"I get (\d+)",
        handler(|w, m| {
            let expected: i64 = m.get(0).unwrap().parse().unwrap();
            if w.counter == expected {
                Ok(())
            } else {
                Err(format!("Expected {expected} but got {}", w.counter).into())
            }
        }),
    );

    let mut world = World::default();
    let result = runner::run_feature(&mut world, &registry, &feature, None).await;

    assert_eq!(result.scenario_results.len(), 1);
    let scenario = &result.scenario_results[0];
    assert!(scenario.passed);
    assert_eq!(scenario.steps_executed, 3);
    assert_eq!(scenario.step_results.len(), 3);
    assert!(scenario.step_results.iter().all(|s| s.status == StepStatus::Passed));
}

#[tokio::test]
async fn e2_background_plus_failure() {
    let feature = parser::parse(
        "Feature: Cart\n  Background:\n    Given empty cart\n  Scenario: Add\n    When add \"apple\"\n    Then count is 2\n",
        None,
    )
    .unwrap();

    let cart: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let mut registry = Registry::<World>::new();
    let c = Rc::clone(&cart);
    registry.given(
        "empty cart",
        handler(move |_, _| {
            c.borrow_mut().clear();
            Ok(())
        }),
    );
    let c = Rc::clone(&cart);
    registry.when(
        r#"add "(\w+)""#,
        handler(move |_, m| {
            c.borrow_mut().push(m.get(0).unwrap().to_owned());
            Ok(())
        }),
    );
    let c = Rc::clone(&cart);
    registry.then(
        r"count is (\d+)",
        handler(move |_, m| {
            let expected: usize = m.get(0).unwrap().parse().unwrap();
            let actual = c.borrow().len();
            if actual == expected {
                Ok(())
            } else {
                Err(format!("count is {actual}").into())
            }
        }),
    );

    let mut world = World::default();
    let result = runner::run_feature(&mut world, &registry, &feature, None).await;
    let scenario = &result.scenario_results[0];

    assert!(!scenario.passed);
    assert_eq!(scenario.steps_executed, 2);
    assert_eq!(scenario.step_results[0].status, StepStatus::Passed);
    assert_eq!(scenario.step_results[1].status, StepStatus::Passed);
    assert_eq!(scenario.step_results[2].status, StepStatus::Failed);
    let message = scenario.error.as_ref().unwrap();
    assert!(message.contains("count is 2"));
    assert!(message.contains('1'));
}

#[test]
fn e3_outline_expansion_naming() {
    let feature = parser::parse(
        "Feature: F\n  Scenario Outline: Eat <n>\n    Given I have <n> apples\n    Examples:\n      | n  |\n      | 10 |\n      | 5  |\n",
        None,
    )
    .unwrap();

    let expanded = gherkin_engine::expand::expand(&feature);
    assert_eq!(expanded.scenarios.len(), 2);

    let ScenarioDefinition::Scenario(first) = &expanded.scenarios[0] else {
        panic!("expected concrete scenario");
    };
    let ScenarioDefinition::Scenario(second) = &expanded.scenarios[1] else {
        panic!("expected concrete scenario");
    };

    assert_eq!(first.name, "Eat <n> [Row 1]");
    assert_eq!(second.name, "Eat <n> [Row 2]");
    assert_eq!(first.steps[0].text, "I have 10 apples");
    assert_eq!(second.steps[0].text, "I have 5 apples");
    assert_eq!(first.source_line, feature.scenarios[0].source_line());
    assert_eq!(second.source_line, feature.scenarios[0].source_line());
}

#[tokio::test]
async fn e4_ambiguous_step_classified_as_failed() {
    let feature =
        parser::parse("Feature: F\n  Scenario: S\n    Given I have 3 items\n", None).unwrap();

    let mut registry = Registry::<World>::new();
    registry.given(r"I have .*", handler(|_, _| Ok(())));
    registry.given(r"I have (\d+) items", handler(|_, _| Ok(())));

    let mut world = World::default();
    let result = runner::run_feature(&mut world, &registry, &feature, None).await;
    let scenario = &result.scenario_results[0];

    assert!(!scenario.passed);
    assert_eq!(scenario.step_results[0].status, StepStatus::Failed);
    let message = scenario.error.as_ref().unwrap();
    assert!(message.contains("Ambiguous"));
    assert!(message.contains('2'));
}

#[tokio::test]
async fn e5_undefined_step() {
    let feature = parser::parse("Feature: F\n  Scenario: S\n    Then nothing\n", None).unwrap();
    let registry = Registry::<World>::new();

    let mut world = World::default();
    let result = runner::run_feature(&mut world, &registry, &feature, None).await;
    let scenario = &result.scenario_results[0];

    assert!(!scenario.passed);
    assert_eq!(scenario.steps_executed, 0);
    assert_eq!(scenario.step_results.len(), 1);
    assert_eq!(scenario.step_results[0].status, StepStatus::Undefined);
    assert!(scenario.error.is_some());
}

#[tokio::test]
async fn e6_tag_filter_merge() {
    let feature = parser::parse(
        "Feature: F\n  @smoke\n  Scenario: S1\n    Given a\n  @wip\n  Scenario: S2\n    Given a\n  @smoke @wip\n  Scenario: S3\n    Given a\n",
        None,
    )
    .unwrap();

    let mut registry = Registry::<World>::new();
    registry.given("a", handler(|_, _| Ok(())));

    let filter = TagFilter::new(
        ["smoke".to_string()].into_iter().collect(),
        ["wip".to_string()].into_iter().collect(),
    );

    let mut world = World::default();
    let result = runner::run_feature(&mut world, &registry, &feature, Some(&filter)).await;

    assert_eq!(result.scenario_results.len(), 1);
    assert_eq!(result.scenario_results[0].name, "S1");
}
