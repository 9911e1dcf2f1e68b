//! Template engine abstraction.
//!
//! This module defines the [`TemplateEngine`] trait, the seam through which
//! the element tree can be rendered by an external template service instead
//! of direct string building. The default implementation is
//! [`MiniJinjaEngine`], preloaded with the table views.

use minijinja::{Environment, Value};
use tracing::debug;

use super::filters::register_filters;
use super::views::{DEFAULT_VIEWS, VIEW_NAMES};
use crate::error::Result;

/// A template engine that can render named templates with data.
///
/// Elements pass themselves (serialized) as the data context and look their
/// view up by name: `table`, `thead`, `tbody`, `tfoot`, `tr`, `td`, `th`.
pub trait TemplateEngine: Send + Sync {
    /// Compiles and renders a template string in one step.
    fn render_template(&self, template: &str, data: &serde_json::Value) -> Result<String>;

    /// Adds (or replaces) a named template.
    fn add_template(&mut self, name: &str, source: &str) -> Result<()>;

    /// Renders a previously registered template.
    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String>;

    /// Checks if a template with the given name exists.
    fn has_template(&self, name: &str) -> bool;
}

/// MiniJinja-based template engine.
///
/// Comes with the default table views registered, so rendering through it
/// produces the same markup as direct rendering. Replace a single view to
/// customize one element type:
///
/// ```rust
/// use tableau::template::{MiniJinjaEngine, TemplateEngine};
/// use tableau::Tableau;
/// use serde_json::json;
///
/// let mut engine = MiniJinjaEngine::new();
/// engine
///     .add_template("td", "<td{{ attributes | html_attributes }}><span>{{ content }}</span></td>")
///     .unwrap();
///
/// let mut table = Tableau::new();
/// table.set_data(json!([{ "id": 1 }])).unwrap();
/// table.include_thead(false).include_tfoot(false);
///
/// let html = table.render_with(&engine).unwrap();
/// assert_eq!(html, r#"<table><tbody><tr><td class="id"><span>1</span></td></tr></tbody></table>"#);
/// ```
pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    /// Creates an engine with filters and the default table views registered.
    pub fn new() -> Self {
        let mut env = Environment::new();
        register_filters(&mut env);
        for (name, source) in DEFAULT_VIEWS {
            env.add_template(name, source)
                .expect("default table views are static, valid templates");
        }
        Self { env }
    }

    /// Returns a reference to the underlying MiniJinja environment.
    pub fn environment(&self) -> &Environment<'static> {
        &self.env
    }

    /// Returns a mutable reference to the underlying MiniJinja environment,
    /// for registering extra filters or functions used by custom views.
    pub fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render_template(&self, template: &str, data: &serde_json::Value) -> Result<String> {
        let value = Value::from_serialize(data);
        Ok(self.env.render_str(template, value)?)
    }

    fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        if VIEW_NAMES.contains(&name) {
            debug!(view = name, "overriding table view");
        }
        self.env
            .add_template_owned(name.to_string(), source.to_string())?;
        Ok(())
    }

    fn render_named(&self, name: &str, data: &serde_json::Value) -> Result<String> {
        let tmpl = self.env.get_template(name)?;
        let value = Value::from_serialize(data);
        Ok(tmpl.render(value)?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TableError;
    use serde_json::json;

    #[test]
    fn test_default_views_registered() {
        let engine = MiniJinjaEngine::new();
        for name in VIEW_NAMES {
            assert!(engine.has_template(name), "missing view {name}");
        }
    }

    #[test]
    fn test_default_views_compile() {
        let mut env = Environment::new();
        register_filters(&mut env);
        for (name, source) in DEFAULT_VIEWS {
            assert!(
                env.add_template(name, source).is_ok(),
                "default view {name} does not compile"
            );
        }
    }

    #[test]
    fn test_render_template_string() {
        let engine = MiniJinjaEngine::new();
        let output = engine
            .render_template("Hello, {{ name }}!", &json!({ "name": "World" }))
            .unwrap();
        assert_eq!(output, "Hello, World!");
    }

    #[test]
    fn test_views_do_not_autoescape() {
        let engine = MiniJinjaEngine::new();
        let output = engine
            .render_named(
                "td",
                &json!({ "attributes": {}, "content": "<b>bold</b>" }),
            )
            .unwrap();
        assert_eq!(output, "<td><b>bold</b></td>");
    }

    #[test]
    fn test_override_view() {
        let mut engine = MiniJinjaEngine::new();
        engine.add_template("th", "<th>{{ content | upper }}</th>").unwrap();
        let output = engine
            .render_named("th", &json!({ "content": "name" }))
            .unwrap();
        assert_eq!(output, "<th>NAME</th>");
    }

    #[test]
    fn test_missing_template() {
        let engine = MiniJinjaEngine::new();
        let err = engine.render_named("caption", &json!({})).unwrap_err();
        assert!(matches!(err, TableError::TemplateNotFound(_)));
    }

    #[test]
    fn test_syntax_error() {
        let mut engine = MiniJinjaEngine::new();
        assert!(matches!(
            engine.add_template("tr", "{{ unclosed"),
            Err(TableError::Template(_))
        ));
    }
}
