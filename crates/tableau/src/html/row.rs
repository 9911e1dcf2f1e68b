//! Table rows.

use super::cell::Cell;
use super::element::{Attributes, Element, Render};
use crate::markup;

/// A `<tr>` holding an ordered sequence of cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    /// Position of the row within its section.
    pub index: usize,
    /// Row attributes.
    pub attributes: Attributes,
    /// Cells in column order.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row with no attributes.
    pub fn new(index: usize, cells: Vec<Cell>) -> Self {
        Row {
            index,
            attributes: Attributes::new(),
            cells,
        }
    }

    /// The cell produced by the column with `key`, if present.
    pub fn cell(&self, key: &str) -> Option<&Cell> {
        self.cells.iter().find(|c| c.key.as_deref() == Some(key))
    }

    /// Mutable access to the cell produced by the column with `key`.
    pub fn cell_mut(&mut self, key: &str) -> Option<&mut Cell> {
        self.cells.iter_mut().find(|c| c.key.as_deref() == Some(key))
    }
}

impl Element for Row {
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

impl Render for Row {
    fn render(&self) -> String {
        let mut out = format!("<tr{}>", markup::attributes(&self.attributes));
        for cell in &self.cells {
            out.push_str(&cell.render());
        }
        out.push_str("</tr>");
        out
    }
}
