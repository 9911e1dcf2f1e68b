//! The renderable element tree.
//!
//! A render materializes a fresh tree on every call:
//!
//! ```text
//! HtmlTable
//! ├── head: Section(Head)  ── RowEntry::Row(Row) ── Cell(Th)…
//! ├── body: Section(Body)  ── RowEntry::Row(Row) ── Cell(Td)…
//! └── foot: Section(Foot)
//! ```
//!
//! Every node implements [`Render`] for direct string building. Nodes that
//! carry attributes and a position also implement [`Element`], which is what
//! element-level callbacks such as [`zebra`](crate::callbacks::zebra) operate
//! on. The same tree can instead be rendered through template views, see
//! [`crate::template`].

mod cell;
mod element;
mod row;
mod section;
mod table;

pub use cell::{value_text, Cell, CellKind};
pub use element::{append_class, Attributes, Element, Render};
pub use row::Row;
pub use section::{RowEntry, Section, SectionKind};
pub use table::HtmlTable;
