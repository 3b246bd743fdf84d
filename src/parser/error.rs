// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors produced while parsing a [Gherkin] source.
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

use std::path::PathBuf;

use derive_more::with_trait::{Display, Error};

fn source_label(source: &Option<PathBuf>) -> String {
    source
        .as_ref()
        .map_or_else(|| "<in-memory>".to_owned(), |p| p.display().to_string())
}

/// Syntactic or structural problem found while parsing a single source.
///
/// Fatal to the affected source only: a batch parse (see
/// [`crate::parser::parse_directory`]) still succeeds for every other
/// source.
#[derive(Clone, Debug, Display, Error)]
pub enum ParseError {
    /// End of input reached with no `Feature:` keyword seen.
    #[display("{}: no `Feature:` found in source", source_label(source))]
    NoFeatureFound {
        /// Identifier of the source that failed to parse.
        #[error(not(source))]
        source: Option<PathBuf>,
    },

    /// A second `Background:` appeared within the same feature.
    #[display("{}:{line}: duplicate `Background:`", source_label(source))]
    DuplicateBackground {
        /// Identifier of the source that failed to parse.
        #[error(not(source))]
        source: Option<PathBuf>,
        /// 1-based line of the offending `Background:`.
        line: usize,
    },

    /// End of input reached while still inside a doc-string.
    #[display(
        "{}:{start_line}: unterminated doc-string",
        source_label(source)
    )]
    UnterminatedDocString {
        /// Identifier of the source that failed to parse.
        #[error(not(source))]
        source: Option<PathBuf>,
        /// 1-based line the doc-string was opened on.
        start_line: usize,
    },

    /// A keyword appeared somewhere strict checking disallows.
    ///
    /// Reserved for future strict checks; the current state machine never
    /// raises this variant itself.
    #[display(
        "{}:{line}: unexpected keyword `{keyword}`",
        source_label(source)
    )]
    UnexpectedKeyword {
        /// Identifier of the source that failed to parse.
        #[error(not(source))]
        source: Option<PathBuf>,
        /// 1-based line of the offending keyword.
        line: usize,
        /// The keyword text encountered.
        keyword: String,
    },

    /// The source file could not be read from disk.
    #[display("{}: {cause}", source_label(source))]
    Io {
        /// Path that failed to read, if known.
        #[error(not(source))]
        source: Option<PathBuf>,
        /// Underlying I/O error, rendered.
        #[error(not(source))]
        cause: String,
    },
}

impl ParseError {
    /// Returns the source identifier this error was raised against, if any.
    #[must_use]
    pub fn source_path(&self) -> Option<&PathBuf> {
        match self {
            Self::NoFeatureFound { source }
            | Self::DuplicateBackground { source, .. }
            | Self::UnterminatedDocString { source, .. }
            | Self::UnexpectedKeyword { source, .. }
            | Self::Io { source, .. } => source.as_ref(),
        }
    }
}
