//! Error types for the definition compiler

use std::path::PathBuf;

use thiserror::Error;

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, GenError>;

/// What kind of file a missing-resource error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Definition,
    Schema,
    Template,
    OutputDir,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResourceKind::Definition => "definition file",
            ResourceKind::Schema => "schema file",
            ResourceKind::Template => "template file",
            ResourceKind::OutputDir => "output directory",
        };
        f.write_str(s)
    }
}

/// Definition compiler errors
#[derive(Error, Debug)]
pub enum GenError {
    #[error("{kind} does not exist: {}", .path.display())]
    MissingResource { kind: ResourceKind, path: PathBuf },

    #[error("{} does not conform to its schema:\n  {}", .path.display(), .errors.join("\n  "))]
    SchemaViolation { path: PathBuf, errors: Vec<String> },

    #[error("Invalid schema {}: {reason}", .path.display())]
    InvalidSchema { path: PathBuf, reason: String },

    #[error("{item}: {field} value '{value}' cannot be converted ({})", .path.display())]
    ValueParse {
        item: String,
        field: &'static str,
        value: String,
        path: PathBuf,
    },

    #[error("{item}: {field} value '{value}' is out of bound ({})", .path.display())]
    RangeViolation {
        item: String,
        field: &'static str,
        value: String,
        path: PathBuf,
    },

    #[error("Request/response class '{0}' has no items")]
    EmptyClass(String),

    #[error("Template file name {} does not end with '{suffix}'", .path.display())]
    TemplateName { path: PathBuf, suffix: String },

    #[error("Malformed definition record in {}: {source}", .path.display())]
    Record {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config_crate::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parse_names_item_and_file() {
        let err = GenError::ValueParse {
            item: "diagSessCtrl".to_string(),
            field: "Hex",
            value: "0xZZ".to_string(),
            path: PathBuf::from("definitions/serv.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("diagSessCtrl"));
        assert!(msg.contains("definitions/serv.json"));
        assert!(msg.contains("0xZZ"));
    }

    #[test]
    fn test_schema_violation_lists_every_error() {
        let err = GenError::SchemaViolation {
            path: PathBuf::from("serv.json"),
            errors: vec!["first".to_string(), "second".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("first"));
        assert!(msg.contains("second"));
    }
}
