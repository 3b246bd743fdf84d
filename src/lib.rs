// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![deny(rust_2018_idioms)]

//! A native Behavior-Driven-Development test engine.
//!
//! Parses Gherkin sources into an AST ([`ast`]), expands scenario
//! outlines ([`expand`]), matches step lines against a user-supplied
//! catalogue of regex-bound handlers ([`step`]), executes scenarios
//! with failure containment and timing ([`runner`]), and rolls the
//! outcome up into a structured, aggregated result ([`result`]) a host
//! adapter can gate on or render.
//!
//! # What this crate does not do
//!
//! Rendering an HTML report, a thread-safe result collector
//! implementation, bridges into a host test framework, and
//! environment-variable parsing are all boundary concerns described by
//! [`collector`]'s traits but left to a host adapter to implement. This
//! crate also does not schedule scenarios in parallel, and does not
//! implement the full Gherkin-6 grammar (no `Rule:`, no localized
//! keywords).
//!
//! # A minimal walkthrough
//!
//! ```
//! # futures::executor::block_on(async {
//! use gherkin_engine::step::{HandlerFn, StepOutcome};
//! use gherkin_engine::{parser, runner, step::Registry};
//!
//! #[derive(Default)]
//! struct World { counter: i64 }
//!
//! fn handler<F>(f: F) -> HandlerFn<World>
//! where
//!     F: for<'a> Fn(&'a mut World, gherkin_engine::StepMatch) -> StepOutcome + 'static,
//! {
//!     Box::new(move |world, step_match| {
//!         let outcome = f(world, step_match);
//!         Box::pin(async move { outcome })
//!     })
//! }
//!
//! let feature = parser::parse(
//!     "Feature: Math\n  Scenario: Add\n    Given I have 5\n    When I add 3\n    Then I get 8\n",
//!     None,
//! ).unwrap();
//!
//! let mut registry = Registry::<World>::new();
//! registry.given(r"I have (\d+)", handler(|world, m| {
//!     world.counter = m.get(0).unwrap().parse().unwrap();
//!     Ok(())
//! }));
//! registry.when(r"I add (\d+)", handler(|world, m| {
//!     world.counter += m.get(0).unwrap().parse::<i64>().unwrap();
//!     Ok(())
//! }));
//! registry.then(r"I get (\d+)", handler(|world, m| {
//!     let expected: i64 = m.get(0).unwrap().parse().unwrap();
//!     if world.counter == expected { Ok(()) } else { Err("mismatch".into()) }
//! }));
//!
//! let mut world = World::default();
//! let result = runner::run_feature(&mut world, &registry, &feature, None).await;
//! assert!(result.all_passed());
//! # });
//! ```
//!
//! # Environment-variable surface
//!
//! The core itself never reads the environment; a host adapter is
//! expected to translate the following into the [`config`] and
//! [`filter`] types above before calling into this crate:
//!
//! | Name | Effect |
//! |------|--------|
//! | `CUCUMBER_TAGS` | comma-separated include tags (leading `@` optional) |
//! | `CUCUMBER_EXCLUDE_TAGS` | comma-separated exclude tags |
//! | `CUCUMBER_SCENARIOS` | comma-separated scenario names (case-insensitive) |
//! | `CUCUMBER_FEATURES` | space-separated path specs, each `path[:line…]` |
//! | `CUCUMBER_STEP_DEFINITIONS` | comma-separated step-definition type names to enable |
//! | `PICKLE_REPORT` | any value enables the HTML report |
//! | `PICKLE_REPORT_PATH` | output path for the HTML report (default `pickle-report.html`) |

pub mod ast;
pub mod collector;
pub mod config;
pub mod data_table;
pub mod error;
pub mod expand;
pub mod filter;
pub mod parser;
pub mod result;
pub mod runner;
pub mod step;

#[doc(inline)]
pub use ast::{
    Background, Feature, Scenario, ScenarioDefinition, ScenarioOutline, Step,
    StepKeyword,
};
#[doc(inline)]
pub use data_table::DataTable;
#[doc(inline)]
pub use error::{EngineError, Result};
#[doc(inline)]
pub use filter::{LineFilter, ScenarioNameFilter, TagFilter};
#[doc(inline)]
pub use result::{FeatureResult, ScenarioResult, StepResult, StepStatus, TestRunResult};
#[doc(inline)]
pub use step::{HandlerFn, Registry, StepMatch};
