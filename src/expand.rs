// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Expands [`ScenarioOutline`]s into concrete [`Scenario`]s.
//!
//! Expansion is a pure function of a [`Feature`]: every
//! [`ScenarioDefinition::Outline`] is replaced, in place, by one
//! [`Scenario`] per row of every [`ExamplesTable`] it carries. Plain
//! scenarios pass through untouched.

use crate::ast::{Feature, Scenario, ScenarioDefinition, ScenarioOutline, Step};

/// Returns a copy of `feature` with every scenario outline replaced by
/// its expanded scenarios. Feature name, description, tags and
/// background are unchanged; only `scenarios` is rewritten.
#[must_use]
pub fn expand(feature: &Feature) -> Feature {
    let scenarios = feature
        .scenarios
        .iter()
        .flat_map(|def| match def {
            ScenarioDefinition::Scenario(s) => {
                vec![ScenarioDefinition::Scenario(s.clone())]
            }
            ScenarioDefinition::Outline(outline) => expand_outline(outline)
                .into_iter()
                .map(ScenarioDefinition::Scenario)
                .collect(),
        })
        .collect();

    Feature { scenarios, ..feature.clone() }
}

/// Expands a single [`ScenarioOutline`] into its concrete [`Scenario`]s,
/// one per row of every [`ExamplesTable`] attached to it.
///
/// Naming follows `"{name} [Row N]"` when the outline has exactly one
/// examples table, and `"{name} [Examples M, Row N]"` when it has more
/// than one, both 1-based and counted within this outline only. Tags
/// are the outline's own tags followed by the examples table's tags.
/// The source line of every expanded scenario is the outline's own
/// source line.
#[must_use]
pub fn expand_outline(outline: &ScenarioOutline) -> Vec<Scenario> {
    let multiple_tables = outline.examples.len() > 1;
    let mut scenarios = Vec::new();

    for (table_idx, examples) in outline.examples.iter().enumerate() {
        let header = examples.table.raw().first().cloned().unwrap_or_default();
        for (row_idx, row) in examples.table.rows().iter().enumerate() {
            let name = if multiple_tables {
                format!(
                    "{} [Examples {}, Row {}]",
                    outline.name,
                    table_idx + 1,
                    row_idx + 1
                )
            } else {
                format!("{} [Row {}]", outline.name, row_idx + 1)
            };

            let tags = outline
                .tags
                .iter()
                .cloned()
                .chain(examples.tags.iter().cloned())
                .collect();

            let steps = outline
                .steps
                .iter()
                .map(|step| substitute_step(step, &header, row))
                .collect();

            scenarios.push(Scenario {
                name,
                tags,
                steps,
                source_line: outline.source_line,
            });
        }
    }

    scenarios
}

/// Substitutes every `<placeholder>` token in `step`'s text, table and
/// doc-string with the matching value from `row`, keyed by `header`.
fn substitute_step(step: &Step, header: &[String], row: &[String]) -> Step {
    Step {
        keyword: step.keyword,
        text: substitute(&step.text, header, row),
        table: step
            .table
            .as_ref()
            .map(|table| table.map_cells(|cell| substitute(cell, header, row))),
        doc_string: step
            .doc_string
            .as_ref()
            .map(|doc| substitute(doc, header, row)),
        source_line: step.source_line,
    }
}

/// Replaces every `<name>` token found in `text` with the value of
/// `row` at the column `header` names `name`, via a single left-to-right
/// scan. A substituted value is never re-scanned for further
/// placeholders, and a `<name>` with no matching header column is left
/// untouched verbatim.
fn substitute(text: &str, header: &[String], row: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find('>') else {
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let name = &after_open[..close];
        if let Some(value) = lookup(header, row, name) {
            out.push_str(value);
        } else {
            out.push('<');
            out.push_str(name);
            out.push('>');
        }
        rest = &after_open[close + 1..];
    }
    out.push_str(rest);
    out
}

fn lookup<'a>(header: &'a [String], row: &'a [String], name: &str) -> Option<&'a str> {
    header
        .iter()
        .position(|h| h == name)
        .and_then(|idx| row.get(idx))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ExamplesTable, StepKeyword};
    use crate::data_table::DataTable;

    fn outline_with_one_table() -> ScenarioOutline {
        ScenarioOutline {
            name: "Eat".into(),
            tags: vec!["fruit".into()],
            steps: vec![Step::new(
                StepKeyword::Given,
                "I have <n> <fruit>",
                3,
            )],
            examples: vec![ExamplesTable {
                tags: vec!["wip".into()],
                table: DataTable::from(vec![
                    vec!["n", "fruit"],
                    vec!["10", "apples"],
                    vec!["5", "oranges"],
                ]),
                source_line: 5,
            }],
            source_line: 2,
        }
    }

    #[test]
    fn expands_one_scenario_per_row() {
        let scenarios = expand_outline(&outline_with_one_table());
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].name, "Eat [Row 1]");
        assert_eq!(scenarios[0].steps[0].text, "I have 10 apples");
        assert_eq!(scenarios[1].name, "Eat [Row 2]");
        assert_eq!(scenarios[1].steps[0].text, "I have 5 oranges");
    }

    #[test]
    fn combines_outline_and_examples_tags() {
        let scenarios = expand_outline(&outline_with_one_table());
        assert_eq!(scenarios[0].tags, vec!["fruit".to_string(), "wip".to_string()]);
    }

    #[test]
    fn source_line_is_inherited_from_outline() {
        let scenarios = expand_outline(&outline_with_one_table());
        assert_eq!(scenarios[0].source_line, 2);
    }

    #[test]
    fn multiple_examples_tables_are_named_with_table_index() {
        let mut outline = outline_with_one_table();
        outline.examples.push(ExamplesTable {
            tags: vec![],
            table: DataTable::from(vec![vec!["n", "fruit"], vec!["1", "pears"]]),
            source_line: 8,
        });

        let scenarios = expand_outline(&outline);
        assert_eq!(scenarios.len(), 3);
        assert_eq!(scenarios[0].name, "Eat [Examples 1, Row 1]");
        assert_eq!(scenarios[2].name, "Eat [Examples 2, Row 1]");
    }

    #[test]
    fn substitution_is_single_left_to_right_scan_not_recursive() {
        let header = vec!["a".to_string()];
        let row = vec!["<a>".to_string()];
        assert_eq!(substitute("value is <a>", &header, &row), "value is <a>");
    }

    #[test]
    fn unmatched_placeholder_is_left_verbatim() {
        let header = vec!["a".to_string()];
        let row = vec!["1".to_string()];
        assert_eq!(substitute("<missing> and <a>", &header, &row), "<missing> and 1");
    }

    #[test]
    fn substitutes_into_attached_table_and_doc_string() {
        let mut outline = outline_with_one_table();
        outline.steps[0].table = Some(DataTable::from(vec![vec!["<n>"]]));
        outline.steps[0].doc_string = Some("count: <n>".into());

        let scenarios = expand_outline(&outline);
        assert_eq!(scenarios[0].steps[0].table.as_ref().unwrap().raw()[0], vec!["10"]);
        assert_eq!(scenarios[0].steps[0].doc_string.as_deref(), Some("count: 10"));
    }

    #[test]
    fn plain_scenarios_pass_through_untouched() {
        let feature = Feature {
            name: "F".into(),
            description: String::new(),
            tags: vec![],
            background: None,
            scenarios: vec![ScenarioDefinition::Scenario(Scenario {
                name: "S".into(),
                tags: vec![],
                steps: vec![],
                source_line: 1,
            })],
            source_file: None,
        };
        let expanded = expand(&feature);
        assert_eq!(expanded.scenarios.len(), 1);
        assert_eq!(expanded.scenarios[0].name(), "S");
    }
}
