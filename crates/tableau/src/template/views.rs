//! Element rendering through template views.
//!
//! Each element renders its children first, then hands itself to its view as
//! the data context. Child markup arrives as pre-rendered strings (`cells`,
//! `rows`, `thead`/`tbody`/`tfoot`), so a view only decides how its own tag
//! looks.
//!
//! | View | Context |
//! |------|---------|
//! | `table` | `attributes`, `thead`, `tbody`, `tfoot` (excluded sections are `""`), `has_thead`, `has_tfoot` |
//! | `thead`, `tbody`, `tfoot` | `attributes`, `rows` |
//! | `tr` | `index`, `attributes`, `cells` |
//! | `td`, `th` | `index`, `key`, `row`, `content`, `attributes` |

use serde_json::json;

use super::engine::TemplateEngine;
use crate::error::Result;
use crate::html::{Cell, HtmlTable, Row, RowEntry, Section};

/// Names of the views an engine must provide.
pub const VIEW_NAMES: [&str; 7] = ["table", "thead", "tbody", "tfoot", "tr", "td", "th"];

/// The default views. They mirror [`Render`](crate::html::Render) output.
pub const DEFAULT_VIEWS: [(&str, &str); 7] = [
    (
        "table",
        "<table{{ attributes | html_attributes }}>{{ thead }}{{ tbody }}{{ tfoot }}</table>",
    ),
    (
        "thead",
        "<thead{{ attributes | html_attributes }}>{% for row in rows %}{{ row }}{% endfor %}</thead>",
    ),
    (
        "tbody",
        "<tbody{{ attributes | html_attributes }}>{% for row in rows %}{{ row }}{% endfor %}</tbody>",
    ),
    (
        "tfoot",
        "<tfoot{{ attributes | html_attributes }}>{% for row in rows %}{{ row }}{% endfor %}</tfoot>",
    ),
    (
        "tr",
        "<tr{{ attributes | html_attributes }}>{% for cell in cells %}{{ cell }}{% endfor %}</tr>",
    ),
    (
        "td",
        "<td{{ attributes | html_attributes }}>{{ content }}</td>",
    ),
    (
        "th",
        "<th{{ attributes | html_attributes }}>{{ content }}</th>",
    ),
];

/// Rendering through a [`TemplateEngine`].
pub trait View {
    fn render_view(&self, engine: &dyn TemplateEngine) -> Result<String>;
}

impl View for Cell {
    fn render_view(&self, engine: &dyn TemplateEngine) -> Result<String> {
        let data = json!({
            "index": self.index,
            "key": self.key,
            "row": self.row,
            "content": self.text(),
            "attributes": self.attributes,
        });
        engine.render_named(self.kind.tag(), &data)
    }
}

impl View for Row {
    fn render_view(&self, engine: &dyn TemplateEngine) -> Result<String> {
        let cells = self
            .cells
            .iter()
            .map(|cell| cell.render_view(engine))
            .collect::<Result<Vec<_>>>()?;
        let data = json!({
            "index": self.index,
            "attributes": self.attributes,
            "cells": cells,
        });
        engine.render_named("tr", &data)
    }
}

impl View for RowEntry {
    fn render_view(&self, engine: &dyn TemplateEngine) -> Result<String> {
        match self {
            RowEntry::Row(row) => row.render_view(engine),
            RowEntry::Markup(markup) => Ok(markup.clone()),
        }
    }
}

impl View for Section {
    fn render_view(&self, engine: &dyn TemplateEngine) -> Result<String> {
        let rows = self
            .rows
            .iter()
            .map(|entry| entry.render_view(engine))
            .collect::<Result<Vec<_>>>()?;
        let data = json!({
            "kind": self.kind,
            "attributes": self.attributes,
            "rows": rows,
        });
        engine.render_named(self.kind.tag(), &data)
    }
}

impl View for HtmlTable {
    fn render_view(&self, engine: &dyn TemplateEngine) -> Result<String> {
        let thead = match &self.head {
            Some(head) => head.render_view(engine)?,
            None => String::new(),
        };
        let tfoot = match &self.foot {
            Some(foot) => foot.render_view(engine)?,
            None => String::new(),
        };
        let data = json!({
            "attributes": self.attributes,
            "thead": thead,
            "tbody": self.body.render_view(engine)?,
            "tfoot": tfoot,
            "has_thead": self.head.is_some(),
            "has_tfoot": self.foot.is_some(),
        });
        engine.render_named("table", &data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::{Attributes, Element, Render};
    use crate::template::MiniJinjaEngine;

    fn sample_table() -> HtmlTable {
        let mut attrs = Attributes::new();
        attrs.insert("class".into(), "name".into());

        let mut row = Row::new(
            0,
            vec![
                Cell::td(0, Some("name".into()), 0, "Joe &amp; Co", attrs.clone()),
                Cell::td(1, Some("age".into()), 0, 42, Attributes::new()),
            ],
        );
        row.add_class("even");

        HtmlTable {
            attributes: Attributes::new(),
            head: Some(Section::head(vec![
                RowEntry::Markup("<tr><th colspan=\"2\">People</th></tr>".into()),
                Row::new(0, vec![Cell::th(0, Some("name".into()), 0, "Name", attrs)]).into(),
            ])),
            body: Section::body(vec![row.into()]),
            foot: None,
        }
    }

    #[test]
    fn default_views_match_direct_rendering() {
        let engine = MiniJinjaEngine::new();
        let table = sample_table();
        assert_eq!(table.render_view(&engine).unwrap(), table.render());
    }

    #[test]
    fn table_view_sees_section_flags() {
        let mut engine = MiniJinjaEngine::new();
        engine
            .add_template("table", "{{ has_thead }}/{{ has_tfoot }}")
            .unwrap();
        assert_eq!(sample_table().render_view(&engine).unwrap(), "true/false");
    }

    #[test]
    fn cell_view_receives_position() {
        let mut engine = MiniJinjaEngine::new();
        engine
            .add_template("td", "[{{ row }}:{{ index }}:{{ key }}]")
            .unwrap();
        let cell = Cell::td(3, Some("age".into()), 7, 1, Attributes::new());
        assert_eq!(cell.render_view(&engine).unwrap(), "[7:3:age]");
    }
}
