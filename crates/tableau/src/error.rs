//! Error types for table building and rendering.
//!
//! This module provides [`TableError`], the single error type returned by the
//! builder, the callback catalog, data adapters, and the template render path.
//! Template engine errors are folded into it so callers never see minijinja
//! types in signatures.

use thiserror::Error;

/// Errors that can occur while configuring or rendering a table.
#[derive(Debug, Error)]
pub enum TableError {
    /// No column is registered under the given key.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// Row titles are configured but there is none for this output row.
    #[error("no row title for row {row} ({titles} titles configured)")]
    RowTitleMissing { row: usize, titles: usize },

    /// A data source could not be turned into row mappings.
    #[error("invalid data source: {0}")]
    InvalidSource(String),

    /// A cell or row callback could not process its input.
    #[error("callback failed: {0}")]
    Callback(String),

    /// Template syntax error or render failure.
    #[error("template error: {0}")]
    Template(String),

    /// A view name has no registered template.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Data serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Table configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl TableError {
    /// Create a callback error.
    pub fn callback(msg: impl Into<String>) -> Self {
        Self::Callback(msg.into())
    }

    /// Create an invalid-source error.
    pub fn invalid_source(msg: impl Into<String>) -> Self {
        Self::InvalidSource(msg.into())
    }
}

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

impl From<serde_json::Error> for TableError {
    fn from(err: serde_json::Error) -> Self {
        TableError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for TableError {
    fn from(err: serde_yaml::Error) -> Self {
        TableError::Config(err.to_string())
    }
}

// Keep minijinja out of the public error surface
impl From<minijinja::Error> for TableError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => TableError::TemplateNotFound(err.to_string()),
            ErrorKind::BadSerialization => TableError::Serialization(err.to_string()),
            _ => TableError::Template(err.to_string()),
        }
    }
}
