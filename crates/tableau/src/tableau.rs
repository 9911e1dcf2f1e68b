//! The table builder.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace};

use crate::column::Column;
use crate::config::{ColumnSpec, TableConfig};
use crate::error::{Result, TableError};
use crate::html::{append_class, Attributes, Cell, HtmlTable, Render, Row, RowEntry, Section};
use crate::source::{DataSource, RowData};
use crate::template::{TemplateEngine, View};

/// A whole-row post-processing step. Returning `Ok(None)` drops the row from
/// the output.
pub type RowCallback = Box<dyn Fn(Row) -> Result<Option<Row>> + Send + Sync>;

/// Builds an HTML table from row data and column definitions.
///
/// Configuration and data persist across renders; the element tree is built
/// fresh on every [`render`](Self::render), so rendering never changes the
/// builder.
///
/// ```rust
/// use tableau::{callbacks, Tableau};
/// use serde_json::json;
///
/// let mut table = Tableau::new();
/// table.set_data(json!([
///     { "id": 1, "name": "Joe" },
///     { "id": 2, "name": "Jane" },
/// ])).unwrap();
/// table.add_column("id", Some("ID"), None);
/// table.add_column("name", Some("Name"), None);
/// table.add_row_callback(callbacks::zebra).include_tfoot(false);
///
/// assert_eq!(
///     table.render().unwrap(),
///     concat!(
///         "<table>",
///         r#"<thead><tr><th class="id">ID</th><th class="name">Name</th></tr></thead>"#,
///         "<tbody>",
///         r#"<tr class="even"><td class="id">1</td><td class="name">Joe</td></tr>"#,
///         r#"<tr class="odd"><td class="id">2</td><td class="name">Jane</td></tr>"#,
///         "</tbody>",
///         "</table>",
///     ),
/// );
/// ```
pub struct Tableau {
    /// Columns under the name they were registered with, which stays fixed
    /// even if [`Column::set_key`] later points the column at another field.
    columns: Vec<(String, Column)>,
    data: Vec<RowData>,
    row_callbacks: Vec<RowCallback>,
    row_titles: Vec<String>,
    thead_before: Vec<String>,
    thead_after: Vec<String>,
    tfoot_rows: Vec<String>,
    include_thead: bool,
    include_tfoot: bool,
    attributes: Attributes,
}

impl Default for Tableau {
    fn default() -> Self {
        Tableau {
            columns: Vec::new(),
            data: Vec::new(),
            row_callbacks: Vec::new(),
            row_titles: Vec::new(),
            thead_before: Vec::new(),
            thead_after: Vec::new(),
            tfoot_rows: Vec::new(),
            include_thead: true,
            include_tfoot: true,
            attributes: Attributes::new(),
        }
    }
}

impl Tableau {
    /// An empty table: no data, no columns, head and foot included.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with initial data and columns. See [`add_columns`](Self::add_columns)
    /// for the column forms.
    pub fn with_data<S, I, C>(source: S, columns: I) -> Result<Self>
    where
        S: DataSource,
        I: IntoIterator<Item = C>,
        C: Into<ColumnSpec>,
    {
        let mut table = Self::new();
        table.set_data(source)?;
        table.add_columns(columns);
        Ok(table)
    }

    /// A table configured from a [`TableConfig`].
    pub fn with_config(config: TableConfig) -> Self {
        let mut table = Self::new();
        table
            .add_columns(config.columns)
            .set_row_titles(config.row_titles)
            .include_thead(config.include_thead)
            .include_tfoot(config.include_tfoot);
        table.attributes = config.attributes;
        table
    }

    // Columns

    /// Register a column for `key`, replacing any column already registered
    /// under it (the replacement keeps the old position).
    ///
    /// The title defaults to the key with underscores replaced by spaces, and
    /// the class to the key. Returns the column for further configuration.
    ///
    /// `key` is both the registered name and the data key the column reads.
    /// Re-keying the column with [`Column::set_key`] changes only the latter.
    pub fn add_column(
        &mut self,
        key: impl Into<String>,
        title: Option<&str>,
        class: Option<&str>,
    ) -> &mut Column {
        let name = key.into();
        let column = Column::new(name.as_str(), title, class);
        let position = match self.position(&name) {
            Some(position) => {
                self.columns[position].1 = column;
                position
            }
            None => {
                self.columns.push((name, column));
                self.columns.len() - 1
            }
        };
        &mut self.columns[position].1
    }

    /// Register several columns. Each entry is a bare key or a
    /// `(key, title, class)` tuple:
    ///
    /// ```rust
    /// use tableau::{ColumnSpec, Tableau};
    ///
    /// let mut table = Tableau::new();
    /// table.add_columns([
    ///     ColumnSpec::from("id"),
    ///     ColumnSpec::from(("user_name", "name")),
    ///     ColumnSpec::from(("actions", "")),
    ///     ColumnSpec::from(("25", None, Some("col_25"))),
    /// ]);
    /// assert_eq!(table.columns().len(), 4);
    /// assert_eq!(table.column("25").unwrap().title(), "25");
    /// ```
    pub fn add_columns<I, C>(&mut self, specs: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ColumnSpec>,
    {
        for spec in specs {
            let spec = spec.into();
            self.add_column(spec.key(), spec.title(), spec.class());
        }
        self
    }

    /// Remove and return the column registered under `key`.
    pub fn remove_column(&mut self, key: &str) -> Result<Column> {
        let position = self.try_position(key)?;
        Ok(self.columns.remove(position).1)
    }

    /// The column registered under `key`.
    pub fn column(&self, key: &str) -> Result<&Column> {
        let position = self.try_position(key)?;
        Ok(&self.columns[position].1)
    }

    /// Mutable access to the column registered under `key`.
    pub fn column_mut(&mut self, key: &str) -> Result<&mut Column> {
        let position = self.try_position(key)?;
        Ok(&mut self.columns[position].1)
    }

    /// Registered columns in registration order. Empty until a column is
    /// added; inferred columns are never stored.
    pub fn columns(&self) -> impl ExactSizeIterator<Item = &Column> + '_ {
        self.columns.iter().map(|(_, column)| column)
    }

    /// Names the columns were registered under, in registration order.
    pub fn column_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|(registered, _)| registered == name)
    }

    fn try_position(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| TableError::ColumnNotFound(name.to_string()))
    }

    // Rows

    /// Add a whole-row step that always keeps the row.
    pub fn add_row_callback<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(Row) -> Result<Row> + Send + Sync + 'static,
    {
        self.row_callbacks
            .push(Box::new(move |row| callback(row).map(Some)));
        self
    }

    /// Add a whole-row step that may drop the row by returning `Ok(None)`.
    ///
    /// Dropped rows leave no gap: the next surviving row takes the dropped
    /// row's index (and row title).
    pub fn add_row_filter<F>(&mut self, callback: F) -> &mut Self
    where
        F: Fn(Row) -> Result<Option<Row>> + Send + Sync + 'static,
    {
        self.row_callbacks.push(Box::new(callback));
        self
    }

    /// Titles rendered as a leading `<th>` on every body row, matched by
    /// output row index. The head row gets an empty leading `<th>`.
    ///
    /// Rendering fails with [`TableError::RowTitleMissing`] if a row has no
    /// title.
    pub fn set_row_titles<I, S>(&mut self, titles: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.row_titles = titles.into_iter().map(Into::into).collect();
        self
    }

    pub fn row_titles(&self) -> &[String] {
        &self.row_titles
    }

    /// Add a raw `<tr>` after the generated title row.
    pub fn append_thead_row(&mut self, markup: impl Into<String>) -> &mut Self {
        self.thead_after.push(markup.into());
        self
    }

    /// Add a raw `<tr>` at the top of the head, before the generated title
    /// row and any rows prepended earlier.
    pub fn prepend_thead_row(&mut self, markup: impl Into<String>) -> &mut Self {
        self.thead_before.push(markup.into());
        self
    }

    /// Add a raw `<tr>` to the foot.
    pub fn append_tfoot_row(&mut self, markup: impl Into<String>) -> &mut Self {
        self.tfoot_rows.push(markup.into());
        self
    }

    // Data

    /// Replace the data with the rows produced by `source`.
    pub fn set_data<S: DataSource>(&mut self, source: S) -> Result<&mut Self> {
        self.data = source.into_rows()?;
        Ok(self)
    }

    /// Add one value to each row, by row order, to build a table column by
    /// column. Values are stored under `key`, or under the next free integer
    /// key when `key` is `None`. Rows are created if there are more values
    /// than rows.
    pub fn add_data_column<I, V>(&mut self, values: I, key: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        for (i, value) in values.into_iter().enumerate() {
            if i == self.data.len() {
                self.data.push(RowData::new());
            }
            let row = &mut self.data[i];
            let key = match key {
                Some(key) => key.to_string(),
                None => next_positional_key(row),
            };
            row.insert(key, value.into());
        }
        self
    }

    pub fn data(&self) -> &[RowData] {
        &self.data
    }

    /// The data row at input position `row`.
    pub fn row_data(&self, row: usize) -> Option<&RowData> {
        self.data.get(row)
    }

    /// The value at input position `row` under `key`.
    pub fn value(&self, row: usize, key: &str) -> Option<&Value> {
        self.data.get(row).and_then(|data| data.get(key))
    }

    // Table element

    /// Whether the `<thead>` is rendered.
    pub fn thead_included(&self) -> bool {
        self.include_thead
    }

    pub fn include_thead(&mut self, include: bool) -> &mut Self {
        self.include_thead = include;
        self
    }

    /// Whether the `<tfoot>` is rendered.
    pub fn tfoot_included(&self) -> bool {
        self.include_tfoot
    }

    pub fn include_tfoot(&mut self, include: bool) -> &mut Self {
        self.include_tfoot = include;
        self
    }

    /// Set an attribute on the `<table>` element.
    pub fn set_table_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Append a class to the `<table>` element.
    pub fn add_table_class(&mut self, class: &str) -> &mut Self {
        append_class(&mut self.attributes, class);
        self
    }

    pub fn table_attributes(&self) -> &Attributes {
        &self.attributes
    }

    // Building

    /// Columns inferred from the first data row when none are registered.
    fn inferred_columns(&self) -> Vec<Column> {
        if !self.columns.is_empty() {
            return Vec::new();
        }
        let inferred: Vec<Column> = self
            .data
            .first()
            .map(|row| row.keys().map(|key| Column::new(key.as_str(), None, None)).collect())
            .unwrap_or_default();
        debug!(
            columns = ?inferred.iter().map(Column::key).collect::<Vec<_>>(),
            "inferred columns from first data row"
        );
        inferred
    }

    /// The columns a render uses: the registered ones, or `inferred`.
    fn active_columns<'a>(&'a self, inferred: &'a [Column]) -> Vec<&'a Column> {
        if self.columns.is_empty() {
            inferred.iter().collect()
        } else {
            self.columns().collect()
        }
    }

    /// Rows of the `<thead>`: prepended markup, the title row, appended markup.
    pub fn thead_rows(&self) -> Result<Vec<RowEntry>> {
        let inferred = self.inferred_columns();
        self.head_rows(&self.active_columns(&inferred))
    }

    /// Rows of the `<tbody>`, after row callbacks.
    pub fn tbody_rows(&self) -> Result<Vec<Row>> {
        let inferred = self.inferred_columns();
        self.body_rows(&self.active_columns(&inferred))
    }

    /// Rows of the `<tfoot>`.
    pub fn tfoot_rows(&self) -> Vec<RowEntry> {
        self.tfoot_rows
            .iter()
            .cloned()
            .map(RowEntry::Markup)
            .collect()
    }

    fn head_rows(&self, columns: &[&Column]) -> Result<Vec<RowEntry>> {
        let mut cells = Vec::with_capacity(columns.len() + 1);
        if !self.row_titles.is_empty() {
            cells.push(Cell::th(0, None, 0, "", Attributes::new()));
        }
        for (index, column) in columns.iter().enumerate() {
            cells.push(column.th(index, 0)?);
        }

        let mut rows: Vec<RowEntry> = self
            .thead_before
            .iter()
            .rev()
            .cloned()
            .map(RowEntry::Markup)
            .collect();
        rows.push(Row::new(0, cells).into());
        rows.extend(self.thead_after.iter().cloned().map(RowEntry::Markup));
        Ok(rows)
    }

    fn body_rows(&self, columns: &[&Column]) -> Result<Vec<Row>> {
        let mut rows = Vec::with_capacity(self.data.len());

        for (position, data_row) in self.data.iter().enumerate() {
            let index = rows.len();
            let shared = Arc::new(data_row.clone());
            let mut cells = Vec::with_capacity(columns.len() + 1);

            if !self.row_titles.is_empty() {
                let title = self.row_titles.get(index).ok_or(TableError::RowTitleMissing {
                    row: index,
                    titles: self.row_titles.len(),
                })?;
                cells.push(Cell::th(0, None, index, title.as_str(), Attributes::new()));
            }

            for (col, column) in columns.iter().enumerate() {
                cells.push(column.td_from_row(&shared, col, index)?);
            }

            let mut row = Some(Row::new(index, cells));
            for callback in &self.row_callbacks {
                row = match row {
                    Some(current) => callback(current)?,
                    None => break,
                };
            }

            match row {
                Some(row) => rows.push(row),
                None => trace!(position, "row dropped by row callback"),
            }
        }

        Ok(rows)
    }

    /// Materialize the full element tree.
    pub fn build(&self) -> Result<HtmlTable> {
        let inferred = self.inferred_columns();
        let columns = self.active_columns(&inferred);

        let head = if self.include_thead {
            Some(Section::head(self.head_rows(&columns)?))
        } else {
            None
        };
        let body = Section::body(
            self.body_rows(&columns)?
                .into_iter()
                .map(RowEntry::from)
                .collect(),
        );
        let foot = self
            .include_tfoot
            .then(|| Section::foot(self.tfoot_rows()));

        trace!(
            columns = columns.len(),
            data_rows = self.data.len(),
            body_rows = body.rows.len(),
            "built table"
        );

        Ok(HtmlTable {
            attributes: self.attributes.clone(),
            head,
            body,
            foot,
        })
    }

    /// Render the table to markup.
    pub fn render(&self) -> Result<String> {
        Ok(self.build()?.render())
    }

    /// Render the table through template views.
    pub fn render_with(&self, engine: &dyn TemplateEngine) -> Result<String> {
        self.build()?.render_view(engine)
    }
}

/// The next positional key: one past the largest integer key.
fn next_positional_key(row: &RowData) -> String {
    row.keys()
        .filter_map(|key| key.parse::<usize>().ok())
        .max()
        .map_or(0, |max| max + 1)
        .to_string()
}

/// String conversion, equivalent to [`Tableau::render`]. Render errors are
/// returned, not swallowed.
impl TryFrom<&Tableau> for String {
    type Error = TableError;

    fn try_from(table: &Tableau) -> Result<Self> {
        table.render()
    }
}

impl fmt::Debug for Tableau {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tableau")
            .field("columns", &self.columns)
            .field("data", &self.data)
            .field("row_callbacks", &self.row_callbacks.len())
            .field("row_titles", &self.row_titles)
            .field("include_thead", &self.include_thead)
            .field("include_tfoot", &self.include_tfoot)
            .field("attributes", &self.attributes)
            .finish()
    }
}
