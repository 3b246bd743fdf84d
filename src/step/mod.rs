// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The step registry: pattern-to-handler catalogue, matching and the
//! value passed to a handler when its pattern matches.

pub mod context;
pub mod error;
pub mod regex;
pub mod registry;

#[doc(inline)]
pub use context::StepMatch;
#[doc(inline)]
pub use error::{AmbiguityError, RegistrationError};
#[doc(inline)]
pub use registry::{HandlerFn, Registry, StepOutcome};
