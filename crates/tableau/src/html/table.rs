//! The `<table>` element.

use super::element::{Attributes, Element, Render};
use super::section::Section;
use crate::markup;

/// A fully materialized table element.
///
/// `head` and `foot` are `None` when the builder excluded them, so rendering
/// never has to consult the builder again.
#[derive(Clone, Debug, PartialEq)]
pub struct HtmlTable {
    pub attributes: Attributes,
    pub head: Option<Section>,
    pub body: Section,
    pub foot: Option<Section>,
}

impl Element for HtmlTable {
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

impl Render for HtmlTable {
    fn render(&self) -> String {
        let mut out = format!("<table{}>", markup::attributes(&self.attributes));
        if let Some(head) = &self.head {
            out.push_str(&head.render());
        }
        out.push_str(&self.body.render());
        if let Some(foot) = &self.foot {
            out.push_str(&foot.render());
        }
        out.push_str("</table>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omits_excluded_sections() {
        let table = HtmlTable {
            attributes: Attributes::new(),
            head: None,
            body: Section::body(Vec::new()),
            foot: None,
        };
        assert_eq!(table.render(), "<table><tbody></tbody></table>");
    }

    #[test]
    fn renders_all_sections_in_order() {
        let mut table = HtmlTable {
            attributes: Attributes::new(),
            head: Some(Section::head(Vec::new())),
            body: Section::body(Vec::new()),
            foot: Some(Section::foot(Vec::new())),
        };
        table.add_class("report");
        assert_eq!(
            table.render(),
            r#"<table class="report"><thead></thead><tbody></tbody><tfoot></tfoot></table>"#
        );
    }
}
