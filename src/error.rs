// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`EngineError`]: the top-level union of every error kind this crate
//! raises.
//!
//! Most call sites never see this type directly — the parser, registry
//! and runner each return their own narrower error, and the runner in
//! particular never propagates one out of `run_scenario`/`run_feature`
//! at all. [`EngineError`] exists for callers that want a single type
//! to bubble up through `?`, e.g. a host adapter wiring a whole run
//! together.

use derive_more::with_trait::{Display, Error, From};

use crate::parser::ParseError;
use crate::runner::error::{StepFailure, UndefinedStepError};
use crate::step::{AmbiguityError, RegistrationError};

/// Union of every error kind this crate raises.
#[derive(Debug, Display, Error, From)]
pub enum EngineError {
    /// A source failed to parse.
    Parse(ParseError),
    /// A pattern failed to compile at registration time.
    Registration(RegistrationError),
    /// Two or more step definitions matched one step.
    Ambiguity(AmbiguityError),
    /// No step definition matched a step.
    Undefined(UndefinedStepError),
    /// A step handler raised an error.
    StepFailed(StepFailure),
}

/// Convenience alias for a `Result` whose error is an [`EngineError`].
pub type Result<T> = std::result::Result<T, EngineError>;
