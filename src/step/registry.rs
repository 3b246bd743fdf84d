// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The [`Registry`] of `(pattern, handler)` pairs steps are matched against.

use futures::future::LocalBoxFuture;
use regex::Regex;

use super::{
    context::StepMatch,
    error::{AmbiguityError, RegistrationError},
    regex::HashableRegex,
};
use crate::ast::Step;

/// Outcome of a handler invocation: `Ok(())` on success, or the boxed error
/// the handler raised.
pub type StepOutcome =
    Result<(), Box<dyn std::error::Error + Send + Sync + 'static>>;

/// A registered step handler: takes the mutable `World` and the
/// [`StepMatch`], returns a boxed future of its outcome.
pub type HandlerFn<World> = Box<
    dyn for<'a> Fn(&'a mut World, StepMatch) -> LocalBoxFuture<'a, StepOutcome>,
>;

/// Catalogue of `(anchored regex, handler)` pairs a [`Step`] is matched
/// against.
///
/// Registration verbs (`given`/`when`/`then`/`step`) are all equivalent
/// from the matcher's perspective: the keyword used at registration is
/// advisory only and does not participate in matching, so a step written
/// with any keyword can match a pattern registered under any other.
pub struct Registry<World> {
    definitions: Vec<(HashableRegex, HandlerFn<World>)>,
    registration_errors: Vec<RegistrationError>,
}

impl<World> Default for Registry<World> {
    fn default() -> Self {
        Self { definitions: Vec::new(), registration_errors: Vec::new() }
    }
}

impl<World> Registry<World> {
    /// Creates a new, empty [`Registry`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a `Given` step. Equivalent to [`Registry::when`],
    /// [`Registry::then`] and [`Registry::step`] for matching purposes.
    pub fn given(&mut self, pattern: &str, handler: HandlerFn<World>) {
        self.register(pattern, handler);
    }

    /// Registers a `When` step. See [`Registry::given`].
    pub fn when(&mut self, pattern: &str, handler: HandlerFn<World>) {
        self.register(pattern, handler);
    }

    /// Registers a `Then` step. See [`Registry::given`].
    pub fn then(&mut self, pattern: &str, handler: HandlerFn<World>) {
        self.register(pattern, handler);
    }

    /// Registers a keyword-agnostic step. See [`Registry::given`].
    pub fn step(&mut self, pattern: &str, handler: HandlerFn<World>) {
        self.register(pattern, handler);
    }

    fn register(&mut self, pattern: &str, handler: HandlerFn<World>) {
        let anchored = format!("^{pattern}$");
        match Regex::new(&anchored) {
            Ok(re) => self.definitions.push((re.into(), handler)),
            Err(source) => self
                .registration_errors
                .push(RegistrationError::new(pattern, &source)),
        }
    }

    /// Clears both the catalogue and the recorded registration errors.
    pub fn reset(&mut self) {
        self.definitions.clear();
        self.registration_errors.clear();
    }

    /// Number of successfully compiled definitions.
    #[must_use]
    pub fn count(&self) -> usize {
        self.definitions.len()
    }

    /// Registration errors recorded since the last [`Registry::reset`].
    #[must_use]
    pub fn registration_errors(&self) -> &[RegistrationError] {
        &self.registration_errors
    }

    /// Attempts to match `step` against the catalogue.
    ///
    /// Returns `Ok(None)` if nothing matches, `Ok(Some(..))` carrying the
    /// handler and a [`StepMatch`] built from the captures plus the step's
    /// table and doc-string, or `Err` if two or more definitions match.
    #[expect(clippy::type_complexity, reason = "mirrors the match contract 1:1")]
    pub fn find_match(
        &self,
        step: &Step,
    ) -> Result<Option<(&HandlerFn<World>, StepMatch)>, AmbiguityError> {
        let mut matches: Vec<_> = self
            .definitions
            .iter()
            .filter_map(|(re, handler)| {
                re.captures(&step.text).map(|caps| {
                    let captures = (1..caps.len())
                        .map(|i| caps.get(i).map_or("", |m| m.as_str()).to_owned())
                        .collect::<Vec<_>>();
                    (re, handler, captures)
                })
            })
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => {
                let (_, handler, captures) =
                    matches.pop().unwrap_or_else(|| unreachable!());
                Ok(Some((
                    handler,
                    StepMatch::new(
                        captures,
                        step.table.clone(),
                        step.doc_string.clone(),
                    ),
                )))
            }
            _ => Err(AmbiguityError::new(
                step.text.clone(),
                matches.into_iter().map(|(re, ..)| re.as_str().to_owned()).collect(),
            )),
        }
    }
}
