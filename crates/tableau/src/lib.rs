//! # Tableau - HTML tables from tabular data
//!
//! `tableau` assembles column definitions and row data into a tree of table
//! elements and renders it to markup. Each column runs its own pipeline of
//! cell callbacks, and whole-row callbacks can restyle or drop rows.
//!
//! ## Core Concepts
//!
//! - [`Tableau`]: the builder. Owns columns, data, row callbacks, row titles
//!   and section flags.
//! - [`Column`]: maps a data key to `<td>`/`<th>` cells, with callback
//!   pipelines and an escaping flag.
//! - [`callbacks`]: ready-made cell and element transformations.
//! - [`html`]: the element tree ([`HtmlTable`], [`Section`], [`Row`], [`Cell`]).
//! - [`source`]: adapters that turn data into row mappings.
//! - [`template`]: render the same tree through template views.
//!
//! ## Quick Start
//!
//! ```rust
//! use tableau::{callbacks, Tableau};
//! use serde_json::json;
//!
//! let mut table = Tableau::new();
//! table.set_data(json!([
//!     { "id": 1, "name": "Joe <joe@example.com>", "joined": 0 },
//!     { "id": 2, "name": "Jane", "joined": 86400 },
//! ])).unwrap();
//!
//! table.add_column("id", Some("ID"), None);
//! table.add_column("name", None, None).add_callback(callbacks::max_length(8, false, 0, "…"));
//! table
//!     .add_column("joined", Some("Joined"), Some("date"))
//!     .add_callback(callbacks::format_date("%Y-%m-%d"));
//! table.add_row_callback(callbacks::zebra).include_tfoot(false);
//!
//! let html = table.render().unwrap();
//! assert!(html.starts_with(r#"<table><thead><tr><th class="id">ID</th>"#));
//! assert!(html.contains(r#"<td class="name">Joe &lt;joe…</td>"#));
//! assert!(html.contains(r#"<tr class="odd"><td class="id">2</td>"#));
//! assert!(html.contains(r#"<td class="date">1970-01-02</td>"#));
//! ```
//!
//! ## Pipeline
//!
//! On every render:
//!
//! 1. If no columns are registered, they are inferred from the first data row.
//! 2. For each data row, each column builds a `<td>` from the row's value
//!    (missing keys give empty content), runs its callbacks, then escapes.
//!    Callbacks can read the rest of the row with [`Cell::row_value`].
//! 3. Row callbacks run in order over the assembled [`Row`]; a filter
//!    returning `None` drops it.
//! 4. Rows are wrapped in sections and the table is rendered.
//!
//! Nothing derived during a render is stored, so rendering twice gives the
//! same markup.

pub mod callbacks;
mod column;
pub mod config;
mod error;
pub mod html;
pub mod markup;
pub mod source;
mod tableau;
pub mod template;

pub use column::{default_title, CellCallback, Column};
pub use config::{ColumnSpec, TableConfig};
pub use error::{Result, TableError};
pub use html::{Cell, CellKind, Element, HtmlTable, Render, Row, RowEntry, Section, SectionKind};
pub use source::{DataSource, Records, RowData};
pub use tableau::{RowCallback, Tableau};
pub use template::{MiniJinjaEngine, TemplateEngine};
