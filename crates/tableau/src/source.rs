//! Data adapters.
//!
//! The builder only ever sees [`RowData`] mappings. Anything that can produce
//! a sequence of them implements [`DataSource`]; [`Tableau::set_data`] calls
//! [`DataSource::into_rows`] exactly once per call.
//!
//! Built-in sources:
//!
//! - `Vec<RowData>`: used as is.
//! - [`serde_json::Value`]: must be an array of objects (or `null` for no rows).
//! - [`Records`]: any collection of `Serialize` structs, one row per record.
//!
//! Query-result types from a data-access layer plug in by implementing the
//! trait in the calling application:
//!
//! ```rust
//! use tableau::source::{DataSource, RowData};
//! use tableau::Result;
//! use serde_json::json;
//!
//! struct QueryResult {
//!     names: Vec<String>,
//! }
//!
//! impl DataSource for QueryResult {
//!     fn into_rows(self) -> Result<Vec<RowData>> {
//!         Ok(self
//!             .names
//!             .into_iter()
//!             .map(|name| {
//!                 let mut row = RowData::new();
//!                 row.insert("name".into(), json!(name));
//!                 row
//!             })
//!             .collect())
//!     }
//! }
//! ```
//!
//! [`Tableau::set_data`]: crate::Tableau::set_data

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, TableError};

/// One row of data: column key to value, in insertion order.
pub type RowData = Map<String, Value>;

/// A source of row mappings.
pub trait DataSource {
    /// Materialize the source into rows.
    fn into_rows(self) -> Result<Vec<RowData>>;
}

impl DataSource for Vec<RowData> {
    fn into_rows(self) -> Result<Vec<RowData>> {
        Ok(self)
    }
}

impl DataSource for Value {
    fn into_rows(self) -> Result<Vec<RowData>> {
        match self {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(row) => Ok(row),
                    other => Err(TableError::invalid_source(format!(
                        "row {i} is not an object: {other}"
                    ))),
                })
                .collect(),
            other => Err(TableError::invalid_source(format!(
                "expected an array of rows, got {}",
                kind(&other)
            ))),
        }
    }
}

/// Adapter for a collection of serializable records (structs, maps).
///
/// ```rust
/// use serde::Serialize;
/// use tableau::source::{DataSource, Records};
///
/// #[derive(Serialize)]
/// struct User { id: u32, name: String }
///
/// let rows = Records(vec![User { id: 1, name: "Joe".into() }])
///     .into_rows()
///     .unwrap();
/// assert_eq!(rows[0]["name"], "Joe");
/// ```
pub struct Records<I>(pub I);

impl<I, T> DataSource for Records<I>
where
    I: IntoIterator<Item = T>,
    T: Serialize,
{
    fn into_rows(self) -> Result<Vec<RowData>> {
        self.0
            .into_iter()
            .enumerate()
            .map(|(i, record)| match serde_json::to_value(record)? {
                Value::Object(row) => Ok(row),
                other => Err(TableError::invalid_source(format!(
                    "record {i} did not serialize to a map (got {})",
                    kind(&other)
                ))),
            })
            .collect()
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
