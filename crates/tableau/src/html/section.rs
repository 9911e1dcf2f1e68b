//! Row containers: `<thead>`, `<tbody>` and `<tfoot>`.

use serde::Serialize;

use super::element::{Attributes, Element, Render};
use super::row::Row;
use crate::markup;

/// Which table section a container renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Head,
    Body,
    Foot,
}

impl SectionKind {
    /// The HTML tag name, also used as the template view name.
    pub fn tag(self) -> &'static str {
        match self {
            SectionKind::Head => "thead",
            SectionKind::Body => "tbody",
            SectionKind::Foot => "tfoot",
        }
    }
}

/// One entry of a section: a built row, or a raw markup fragment injected by
/// the caller (already a complete `<tr>...</tr>`).
#[derive(Clone, Debug, PartialEq)]
pub enum RowEntry {
    Row(Row),
    Markup(String),
}

impl Render for RowEntry {
    fn render(&self) -> String {
        match self {
            RowEntry::Row(row) => row.render(),
            RowEntry::Markup(markup) => markup.clone(),
        }
    }
}

impl From<Row> for RowEntry {
    fn from(row: Row) -> Self {
        RowEntry::Row(row)
    }
}

/// An ordered sequence of rows wrapped in a section tag.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub attributes: Attributes,
    pub rows: Vec<RowEntry>,
}

impl Section {
    pub fn new(kind: SectionKind, rows: Vec<RowEntry>) -> Self {
        Section {
            kind,
            attributes: Attributes::new(),
            rows,
        }
    }

    pub fn head(rows: Vec<RowEntry>) -> Self {
        Section::new(SectionKind::Head, rows)
    }

    pub fn body(rows: Vec<RowEntry>) -> Self {
        Section::new(SectionKind::Body, rows)
    }

    pub fn foot(rows: Vec<RowEntry>) -> Self {
        Section::new(SectionKind::Foot, rows)
    }

    /// Iterate over the built rows, skipping raw markup entries.
    pub fn built_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter().filter_map(|entry| match entry {
            RowEntry::Row(row) => Some(row),
            RowEntry::Markup(_) => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Element for Section {
    fn index(&self) -> usize {
        0
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Render for Section {
    fn render(&self) -> String {
        let tag = self.kind.tag();
        let mut out = format!("<{tag}{}>", markup::attributes(&self.attributes));
        for entry in &self.rows {
            out.push_str(&entry.render());
        }
        out.push_str(&format!("</{tag}>"));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_renders_wrapper_only() {
        assert_eq!(Section::body(Vec::new()).render(), "<tbody></tbody>");
    }

    #[test]
    fn markup_entries_are_spliced_verbatim() {
        let section = Section::head(vec![
            RowEntry::Markup("<tr><th colspan=\"2\">Group</th></tr>".into()),
            Row::new(0, Vec::new()).into(),
        ]);
        assert_eq!(
            section.render(),
            "<thead><tr><th colspan=\"2\">Group</th></tr><tr></tr></thead>"
        );
        assert_eq!(section.built_rows().count(), 1);
    }
}
