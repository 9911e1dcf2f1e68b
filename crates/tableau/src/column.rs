//! Column definitions.
//!
//! A [`Column`] maps one key of the row data to a cell in every row. It owns
//! two callback pipelines, one for body cells and one for its header cell,
//! plus the attributes stamped onto every cell it produces.
//!
//! ```rust
//! use tableau::{callbacks, Column};
//! use serde_json::json;
//!
//! let mut column = Column::new("user_name", None, None);
//! assert_eq!(column.title(), "user name");
//! assert_eq!(column.attribute("class"), Some("user_name"));
//!
//! column.add_callback(callbacks::uppercase);
//! let cell = column.td(json!("joe <admin>"), 0, 0).unwrap();
//! assert_eq!(cell.text(), "JOE &lt;ADMIN&gt;");
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::Result;
use crate::html::{append_class, Attributes, Cell};
use crate::source::RowData;

/// A cell transformation step. Arguments are captured by the closure when it
/// is registered. Body cells built by a table expose their whole data row
/// through [`Cell::row_value`].
pub type CellCallback = Box<dyn Fn(Cell) -> Result<Cell> + Send + Sync>;

/// A named data-to-cell mapping with its own callback pipelines.
pub struct Column {
    key: String,
    title: String,
    escape: bool,
    attributes: Attributes,
    callbacks: Vec<CellCallback>,
    title_callbacks: Vec<CellCallback>,
}

impl Column {
    /// Create a column for `key`.
    ///
    /// When `title` is `None` it becomes the key with underscores replaced by
    /// spaces. When `class` is `None` the `class` attribute is the key itself.
    pub fn new(key: impl Into<String>, title: Option<&str>, class: Option<&str>) -> Self {
        let key = key.into();
        let title = match title {
            Some(title) => title.to_string(),
            None => default_title(&key),
        };
        let mut attributes = Attributes::new();
        attributes.insert(
            "class".to_string(),
            class.map_or_else(|| key.clone(), str::to_string),
        );

        Column {
            key,
            title,
            escape: true,
            attributes,
            callbacks: Vec::new(),
            title_callbacks: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Change the data key this column reads from.
    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = key.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    /// Whether cell content is HTML-escaped after the callbacks run.
    pub fn is_escaped(&self) -> bool {
        self.escape
    }

    /// Turn escaping on or off. Columns whose callbacks emit markup must turn
    /// it off, since escaping always runs last.
    pub fn set_escaped(&mut self, escaped: bool) -> &mut Self {
        self.escape = escaped;
        self
    }

    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Merge attributes, overwriting existing keys.
    pub fn set_attributes<I, K, V>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes.extend(
            attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into())),
        );
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Append a class to every cell this column produces.
    pub fn add_class(&mut self, class: &str) -> &mut Self {
        append_class(&mut self.attributes, class);
        self
    }

    /// Append a step to the body-cell pipeline.
    pub fn add_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(Cell) -> Result<Cell> + Send + Sync + 'static,
    {
        self.callbacks.push(Box::new(callback));
        self
    }

    /// Append a step to the header-cell pipeline.
    pub fn add_title_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(Cell) -> Result<Cell> + Send + Sync + 'static,
    {
        self.title_callbacks.push(Box::new(callback));
        self
    }

    /// Build a body cell from `value`: run the callbacks in registration
    /// order, then escape.
    pub fn td(&self, value: Value, index: usize, row: usize) -> Result<Cell> {
        let cell = Cell::td(
            index,
            Some(self.key.clone()),
            row,
            value,
            self.attributes.clone(),
        );
        self.finish(cell, &self.callbacks)
    }

    /// Build a body cell from the value under this column's key in `data`
    /// (null when missing). Callbacks can read the rest of the row through
    /// [`Cell::row_value`].
    pub fn td_from_row(&self, data: &Arc<RowData>, index: usize, row: usize) -> Result<Cell> {
        let value = data.get(&self.key).cloned().unwrap_or(Value::Null);
        let cell = Cell::td(
            index,
            Some(self.key.clone()),
            row,
            value,
            self.attributes.clone(),
        )
        .with_row_data(Arc::clone(data));
        self.finish(cell, &self.callbacks)
    }

    /// Build the header cell from the title: run the title callbacks in
    /// registration order, then escape.
    pub fn th(&self, index: usize, row: usize) -> Result<Cell> {
        let cell = Cell::th(
            index,
            Some(self.key.clone()),
            row,
            self.title.as_str(),
            self.attributes.clone(),
        );
        self.finish(cell, &self.title_callbacks)
    }

    fn finish(&self, cell: Cell, pipeline: &[CellCallback]) -> Result<Cell> {
        let mut cell = pipeline
            .iter()
            .try_fold(cell, |cell, callback| callback(cell))?;
        if self.escape {
            cell.escape();
        }
        Ok(cell)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("escape", &self.escape)
            .field("attributes", &self.attributes)
            .field("callbacks", &self.callbacks.len())
            .field("title_callbacks", &self.title_callbacks.len())
            .finish()
    }
}

/// The title a column gets when none is given.
pub fn default_title(key: &str) -> String {
    key.replace('_', " ")
}
