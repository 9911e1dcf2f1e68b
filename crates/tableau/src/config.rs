//! Declarative table configuration.
//!
//! Column lists and section flags can be written as data and loaded from YAML
//! or JSON, then applied with [`Tableau::with_config`]. Callbacks stay in
//! code, since they are closures.
//!
//! ```rust
//! use tableau::config::TableConfig;
//!
//! let config = TableConfig::from_yaml(r#"
//! columns:
//!   - id
//!   - [user_name, Name]
//!   - [actions, ""]
//!   - ["25", null, col_25]
//! include_tfoot: false
//! attributes:
//!   class: users
//! "#).unwrap();
//!
//! assert_eq!(config.columns.len(), 4);
//! assert!(config.include_thead);
//! assert!(!config.include_tfoot);
//! ```
//!
//! [`Tableau::with_config`]: crate::Tableau::with_config

use serde::Deserialize;

use crate::error::{Result, TableError};
use crate::html::Attributes;

/// How a column is declared in bulk: a bare key, or a positional
/// `[key, title?, class?]` list mirroring [`Tableau::add_column`].
///
/// [`Tableau::add_column`]: crate::Tableau::add_column
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ColumnSpec {
    Key(String),
    Full(String, #[serde(default)] Option<String>, #[serde(default)] Option<String>),
}

impl ColumnSpec {
    pub fn key(&self) -> &str {
        match self {
            ColumnSpec::Key(key) | ColumnSpec::Full(key, _, _) => key,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            ColumnSpec::Key(_) => None,
            ColumnSpec::Full(_, title, _) => title.as_deref(),
        }
    }

    pub fn class(&self) -> Option<&str> {
        match self {
            ColumnSpec::Key(_) => None,
            ColumnSpec::Full(_, _, class) => class.as_deref(),
        }
    }
}

impl From<&str> for ColumnSpec {
    fn from(key: &str) -> Self {
        ColumnSpec::Key(key.to_string())
    }
}

impl From<String> for ColumnSpec {
    fn from(key: String) -> Self {
        ColumnSpec::Key(key)
    }
}

impl From<(&str, &str)> for ColumnSpec {
    fn from((key, title): (&str, &str)) -> Self {
        ColumnSpec::Full(key.to_string(), Some(title.to_string()), None)
    }
}

impl From<(&str, &str, &str)> for ColumnSpec {
    fn from((key, title, class): (&str, &str, &str)) -> Self {
        ColumnSpec::Full(
            key.to_string(),
            Some(title.to_string()),
            Some(class.to_string()),
        )
    }
}

impl From<(&str, Option<&str>, Option<&str>)> for ColumnSpec {
    fn from((key, title, class): (&str, Option<&str>, Option<&str>)) -> Self {
        ColumnSpec::Full(
            key.to_string(),
            title.map(str::to_string),
            class.map(str::to_string),
        )
    }
}

fn default_true() -> bool {
    true
}

/// Table-wide settings that can be expressed as data.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TableConfig {
    #[serde(default)]
    pub columns: Vec<ColumnSpec>,
    #[serde(default)]
    pub row_titles: Vec<String>,
    #[serde(default = "default_true")]
    pub include_thead: bool,
    #[serde(default = "default_true")]
    pub include_tfoot: bool,
    /// Attributes for the `<table>` element.
    #[serde(default)]
    pub attributes: Attributes,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            columns: Vec::new(),
            row_titles: Vec::new(),
            include_thead: true,
            include_tfoot: true,
            attributes: Attributes::new(),
        }
    }
}

impl TableConfig {
    /// Parse a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| TableError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_spec_forms() {
        let specs: Vec<ColumnSpec> =
            serde_json::from_str(r#"["id", ["user_name", "name"], ["25", null, "col_25"]]"#)
                .unwrap();
        assert_eq!(specs[0], ColumnSpec::Key("id".into()));
        assert_eq!(specs[1].title(), Some("name"));
        assert_eq!(specs[1].class(), None);
        assert_eq!(specs[2].title(), None);
        assert_eq!(specs[2].class(), Some("col_25"));
    }

    #[test]
    fn column_spec_from_tuples() {
        assert_eq!(ColumnSpec::from("id").key(), "id");
        assert_eq!(ColumnSpec::from(("actions", "")).title(), Some(""));
        let spec = ColumnSpec::from(("25", None, Some("col_25")));
        assert_eq!(spec.class(), Some("col_25"));
    }

    #[test]
    fn defaults_when_fields_missing() {
        let config = TableConfig::from_json("{}").unwrap();
        assert_eq!(config, TableConfig::default());
    }

    #[test]
    fn bad_yaml_is_config_error() {
        let err = TableConfig::from_yaml("columns: {").unwrap_err();
        assert!(matches!(err, TableError::Config(_)));
    }
}
