//! MiniJinja filter registration.

use minijinja::{Environment, Error, Value};

use crate::html::Attributes;
use crate::markup;

/// Registers the filters the table views rely on.
///
/// - `html_attributes`: serializes an attribute map to ` key="value"` pairs,
///   exactly like direct rendering does. `none`/undefined values are skipped.
pub fn register_filters(env: &mut Environment<'static>) {
    env.add_filter("html_attributes", html_attributes);
}

fn html_attributes(value: Value) -> Result<String, Error> {
    if value.is_undefined() || value.is_none() {
        return Ok(String::new());
    }
    let mut attrs = Attributes::new();
    for key in value.try_iter()? {
        let item = value.get_item(&key)?;
        if item.is_undefined() || item.is_none() {
            continue;
        }
        attrs.insert(key.to_string(), item.to_string());
    }
    Ok(markup::attributes(&attrs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    fn render(source: &str, ctx: Value) -> String {
        let mut env = Environment::new();
        register_filters(&mut env);
        env.render_str(source, ctx).unwrap()
    }

    #[test]
    fn serializes_map_like_direct_rendering() {
        let out = render(
            "<tr{{ attrs | html_attributes }}>",
            context! { attrs => context! { class => "even", id => "r\"1" } },
        );
        assert_eq!(out, r#"<tr class="even" id="r&quot;1">"#);
    }

    #[test]
    fn missing_attributes_render_nothing() {
        assert_eq!(render("<td{{ nope | html_attributes }}>", context! {}), "<td>");
    }

    #[test]
    fn none_values_skipped() {
        let out = render(
            "{{ attrs | html_attributes }}",
            context! { attrs => context! { class => "a", title => () } },
        );
        assert_eq!(out, r#" class="a""#);
    }
}
