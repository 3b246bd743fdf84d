// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors produced while registering or matching [`Step`]s.
//!
//! [`Step`]: crate::Step

use derive_more::with_trait::{Display, Error};

/// An invalid regex pattern supplied at registration time.
///
/// Recording this instead of aborting the process lets a caller register
/// the rest of a catalogue and surface every bad pattern at once, rather
/// than failing on the first.
#[derive(Clone, Debug, Display, Error)]
#[display("invalid step pattern `{pattern}`: {source}")]
pub struct RegistrationError {
    /// Pattern string as supplied to `given`/`when`/`then`/`step`.
    #[error(not(source))]
    pub pattern: String,

    /// Underlying [`regex`] compilation error, rendered.
    #[error(not(source))]
    pub source: String,
}

impl RegistrationError {
    /// Creates a new [`RegistrationError`] from a failed compilation.
    #[must_use]
    pub fn new(pattern: impl Into<String>, source: &regex::Error) -> Self {
        Self { pattern: pattern.into(), source: source.to_string() }
    }
}

/// A step text matched more than one registered pattern.
#[derive(Clone, Debug, Display, Error)]
#[display("Ambiguous step '{step_text}' matches {} definitions", patterns.len())]
pub struct AmbiguityError {
    /// Text of the step that matched ambiguously.
    #[error(not(source))]
    pub step_text: String,

    /// Patterns that matched, in registration order.
    #[error(not(source))]
    pub patterns: Vec<String>,
}

impl AmbiguityError {
    /// Creates a new [`AmbiguityError`].
    #[must_use]
    pub fn new(step_text: impl Into<String>, patterns: Vec<String>) -> Self {
        Self { step_text: step_text.into(), patterns }
    }

    /// Number of definitions that matched.
    #[must_use]
    pub fn count(&self) -> usize {
        self.patterns.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_error_display_includes_pattern_and_source() {
        let bad = regex::Regex::new("(").unwrap_err();
        let err = RegistrationError::new("(", &bad);
        assert!(err.to_string().contains("("));
    }

    #[test]
    fn ambiguity_error_display_matches_spec_wording() {
        let err = AmbiguityError::new(
            "I have 5 items",
            vec!["I have .*".into(), "I have (\\d+) items".into()],
        );
        let msg = err.to_string();
        assert!(msg.contains("Ambiguous step 'I have 5 items' matches 2 definitions"));
        assert_eq!(err.count(), 2);
    }
}
