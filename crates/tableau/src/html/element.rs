//! Shared element contracts.

use std::collections::BTreeMap;

/// Attribute mapping for an element. Sorted by key so serialization is stable.
pub type Attributes = BTreeMap<String, String>;

/// Something that renders itself to markup.
pub trait Render {
    /// Returns the element's full markup.
    fn render(&self) -> String;
}

/// An attribute-bearing node with a position inside its parent.
///
/// The position index means a column index for cells and a row index within
/// the section for rows. Element-level callbacks such as
/// [`alternating_class`](crate::callbacks::alternating_class) key off it.
pub trait Element {
    /// Position of this element within its parent (0-based).
    fn index(&self) -> usize;

    /// The element's attributes.
    fn attributes(&self) -> &Attributes;

    /// Mutable access to the element's attributes.
    fn attributes_mut(&mut self) -> &mut Attributes;

    /// Sets a single attribute, replacing any previous value.
    fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>)
    where
        Self: Sized,
    {
        self.attributes_mut().insert(key.into(), value.into());
    }

    /// Appends a class to the `class` attribute.
    fn add_class(&mut self, class: &str) {
        append_class(self.attributes_mut(), class);
    }

    /// Whether the `class` attribute contains `class` as a whole word.
    fn has_class(&self, class: &str) -> bool {
        self.attributes()
            .get("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }
}

/// Appends `class` to the space-separated `class` attribute of `attrs`.
///
/// Empty class names are ignored.
pub fn append_class(attrs: &mut Attributes, class: &str) {
    let class = class.trim();
    if class.is_empty() {
        return;
    }
    match attrs.get_mut("class") {
        Some(existing) if !existing.trim().is_empty() => {
            existing.push(' ');
            existing.push_str(class);
        }
        _ => {
            attrs.insert("class".to_string(), class.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_class_to_missing_attribute() {
        let mut attrs = Attributes::new();
        append_class(&mut attrs, "even");
        assert_eq!(attrs["class"], "even");
    }

    #[test]
    fn append_class_is_additive() {
        let mut attrs = Attributes::new();
        attrs.insert("class".into(), "name".into());
        append_class(&mut attrs, "odd");
        append_class(&mut attrs, "");
        assert_eq!(attrs["class"], "name odd");
    }
}
