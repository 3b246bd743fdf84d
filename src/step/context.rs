// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The value passed to a step handler when its pattern matches.

use crate::data_table::DataTable;

/// Payload handed to a handler when its pattern matches a [`Step`].
///
/// Captures exclude the whole match (group 0); only the parenthesized
/// groups of the pattern are exposed, in left-to-right order.
///
/// [`Step`]: crate::Step
#[derive(Clone, Debug, PartialEq)]
pub struct StepMatch {
    /// Ordered capture groups, excluding the whole match.
    pub captures: Vec<String>,

    /// The matched step's attached table, if any.
    pub table: Option<DataTable>,

    /// The matched step's attached doc-string, if any.
    pub doc_string: Option<String>,
}

impl StepMatch {
    /// Creates a new [`StepMatch`].
    #[must_use]
    pub fn new(
        captures: Vec<String>,
        table: Option<DataTable>,
        doc_string: Option<String>,
    ) -> Self {
        Self { captures, table, doc_string }
    }

    /// Returns the capture at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.captures.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_capture_by_index() {
        let m = StepMatch::new(vec!["5".into(), "apples".into()], None, None);
        assert_eq!(m.get(0), Some("5"));
        assert_eq!(m.get(1), Some("apples"));
        assert_eq!(m.get(2), None);
    }

    #[test]
    fn carries_table_and_doc_string_through_verbatim() {
        let table = DataTable::from(vec![vec!["a", "b"]]);
        let m = StepMatch::new(vec![], Some(table.clone()), Some("text".into()));
        assert_eq!(m.table, Some(table));
        assert_eq!(m.doc_string.as_deref(), Some("text"));
    }
}
