//! Template-based rendering.
//!
//! Direct rendering ([`Render`](crate::html::Render)) builds markup with
//! string concatenation. This module is the alternate path: every element is
//! rendered by a named view in a [`TemplateEngine`], with the element itself
//! as the view's data.
//!
//! With the default views the two paths produce identical markup:
//!
//! ```rust
//! use tableau::template::MiniJinjaEngine;
//! use tableau::Tableau;
//! use serde_json::json;
//!
//! let mut table = Tableau::new();
//! table.set_data(json!([{ "id": 1, "name": "Joe" }])).unwrap();
//!
//! let engine = MiniJinjaEngine::new();
//! assert_eq!(table.render_with(&engine).unwrap(), table.render().unwrap());
//! ```
//!
//! ## View names
//!
//! `table`, `thead`, `tbody`, `tfoot`, `tr`, `td` and `th`. See [`views`] for
//! the context each receives. Views render without auto-escaping: cell
//! content was already escaped by its column.

mod engine;
pub mod filters;
pub mod views;

pub use engine::{MiniJinjaEngine, TemplateEngine};
pub use views::{View, DEFAULT_VIEWS, VIEW_NAMES};
