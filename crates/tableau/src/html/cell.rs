//! Table cells (`<td>` and `<th>`).

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::element::{Attributes, Element, Render};
use crate::markup;
use crate::source::RowData;

/// Which tag a cell renders as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    /// Data cell.
    Td,
    /// Header cell.
    Th,
}

impl CellKind {
    /// The HTML tag name, also used as the template view name.
    pub fn tag(self) -> &'static str {
        match self {
            CellKind::Td => "td",
            CellKind::Th => "th",
        }
    }
}

/// A single data or header cell.
///
/// `content` starts out as the raw value from the row data (or the column
/// title for header cells). Callbacks rewrite it, and the owning column
/// escapes it last, so by render time it is treated as markup.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Tag kind.
    pub kind: CellKind,
    /// Column position within the row.
    pub index: usize,
    /// Key of the column that produced this cell, if any.
    pub key: Option<String>,
    /// Output row index the cell belongs to.
    pub row: usize,
    /// Cell content.
    pub content: Value,
    /// Cell attributes.
    pub attributes: Attributes,
    /// The full data row a body cell was built from. Shared by every cell of
    /// the row.
    pub data: Option<Arc<RowData>>,
}

impl Cell {
    /// Create a `<td>` cell.
    pub fn td(
        index: usize,
        key: Option<String>,
        row: usize,
        content: impl Into<Value>,
        attributes: Attributes,
    ) -> Self {
        Cell {
            kind: CellKind::Td,
            index,
            key,
            row,
            content: content.into(),
            attributes,
            data: None,
        }
    }

    /// Create a `<th>` cell.
    pub fn th(
        index: usize,
        key: Option<String>,
        row: usize,
        content: impl Into<Value>,
        attributes: Attributes,
    ) -> Self {
        Cell {
            kind: CellKind::Th,
            ..Cell::td(index, key, row, content, attributes)
        }
    }

    /// Attach the data row this cell belongs to.
    pub fn with_row_data(mut self, data: Arc<RowData>) -> Self {
        self.data = Some(data);
        self
    }

    /// The data row this cell was built from. `None` for header cells and
    /// cells built outside a table.
    pub fn row_data(&self) -> Option<&RowData> {
        self.data.as_deref()
    }

    /// Another field of the cell's data row.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use tableau::{Cell, RowData};
    /// use serde_json::json;
    ///
    /// let mut data = RowData::new();
    /// data.insert("id".into(), json!(7));
    /// data.insert("name".into(), json!("Joe"));
    ///
    /// let cell = Cell::td(1, Some("name".into()), 0, "Joe", Default::default())
    ///     .with_row_data(Arc::new(data));
    /// assert_eq!(cell.row_value("id"), Some(&json!(7)));
    /// assert_eq!(cell.row_value("email"), None);
    /// ```
    pub fn row_value(&self, key: &str) -> Option<&Value> {
        self.row_data().and_then(|data| data.get(key))
    }

    /// Whether this is a header cell.
    pub fn is_header(&self) -> bool {
        self.kind == CellKind::Th
    }

    /// Content as display text.
    pub fn text(&self) -> String {
        value_text(&self.content)
    }

    /// Replace the content with a string.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = Value::String(text.into());
    }

    /// Whether the content counts as empty (null, `""`, `false`, or an empty
    /// list or map).
    pub fn is_empty(&self) -> bool {
        match &self.content {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => map.is_empty(),
            Value::Number(_) => false,
        }
    }

    /// HTML-escape the current content in place.
    pub fn escape(&mut self) {
        let escaped = markup::escape(&self.text()).into_owned();
        self.content = Value::String(escaped);
    }
}

impl Element for Cell {
    fn index(&self) -> usize {
        self.index
    }

    fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    fn attributes_mut(&mut self) -> &mut Attributes {
        &mut self.attributes
    }
}

impl Render for Cell {
    fn render(&self) -> String {
        let tag = self.kind.tag();
        format!(
            "<{tag}{}>{}</{tag}>",
            markup::attributes(&self.attributes),
            self.text()
        )
    }
}

/// Display text for a row value.
///
/// Null renders empty, booleans render as `1` / empty, strings render
/// verbatim, numbers use their JSON form and lists or maps fall back to
/// compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(class: &str) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("class".into(), class.into());
        attrs
    }

    #[test]
    fn td_renders_tag_attributes_and_content() {
        let cell = Cell::td(0, Some("name".into()), 0, "Joe", attrs("name"));
        assert_eq!(cell.render(), r#"<td class="name">Joe</td>"#);
    }

    #[test]
    fn th_renders_header_tag() {
        let cell = Cell::th(1, None, 0, "Name", Attributes::new());
        assert!(cell.is_header());
        assert_eq!(cell.render(), "<th>Name</th>");
    }

    #[test]
    fn null_content_renders_empty() {
        let cell = Cell::td(0, None, 0, Value::Null, Attributes::new());
        assert_eq!(cell.render(), "<td></td>");
        assert!(cell.is_empty());
    }

    #[test]
    fn value_text_forms() {
        assert_eq!(value_text(&json!(42)), "42");
        assert_eq!(value_text(&json!(1.5)), "1.5");
        assert_eq!(value_text(&json!(true)), "1");
        assert_eq!(value_text(&json!(false)), "");
        assert_eq!(value_text(&json!(["a", "b"])), r#"["a","b"]"#);
    }

    #[test]
    fn escape_rewrites_content() {
        let mut cell = Cell::td(0, None, 0, "<i>x</i>", Attributes::new());
        cell.escape();
        assert_eq!(cell.content, json!("&lt;i&gt;x&lt;/i&gt;"));
    }

    #[test]
    fn row_data_is_absent_by_default() {
        let cell = Cell::td(0, None, 0, "x", Attributes::new());
        assert!(cell.row_data().is_none());
        assert!(cell.row_value("x").is_none());
    }

    #[test]
    fn zero_is_not_empty() {
        let cell = Cell::td(0, None, 0, 0, Attributes::new());
        assert!(!cell.is_empty());
    }
}
