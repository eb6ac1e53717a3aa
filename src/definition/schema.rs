//! Companion schema lookup and validation
//!
//! Every definition document is checked against a JSON Schema (draft 7)
//! before any record is read. The schemas ship inside the binary and can be
//! replaced by pointing the configuration at a directory of overrides.

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{include_dir, Dir};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::error::{GenError, ResourceKind, Result};

static EMBEDDED_SCHEMAS: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/schemas");

/// Where companion schemas are read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SchemaSource {
    /// Schemas compiled into the binary
    #[default]
    Embedded,
    /// Schemas read from a directory on disk
    Directory(PathBuf),
}

impl SchemaSource {
    /// Load a schema document by file name
    ///
    /// Returns the path used for diagnostics alongside the parsed schema.
    pub fn load(&self, file_name: &str) -> Result<(PathBuf, Value)> {
        match self {
            SchemaSource::Embedded => {
                let path = PathBuf::from("<embedded>").join(file_name);
                let content = EMBEDDED_SCHEMAS
                    .get_file(file_name)
                    .and_then(|f| f.contents_utf8())
                    .ok_or_else(|| GenError::MissingResource {
                        kind: ResourceKind::Schema,
                        path: path.clone(),
                    })?;
                Ok((path, serde_json::from_str(content)?))
            }
            SchemaSource::Directory(dir) => {
                let path = dir.join(file_name);
                if !path.is_file() {
                    return Err(GenError::MissingResource {
                        kind: ResourceKind::Schema,
                        path,
                    });
                }
                let content = fs::read_to_string(&path)?;
                Ok((path, serde_json::from_str(&content)?))
            }
        }
    }
}

/// A compiled companion schema
pub struct SchemaValidator {
    path: PathBuf,
    compiled: JSONSchema,
}

impl SchemaValidator {
    /// Compile a schema document
    pub fn compile(path: impl AsRef<Path>, schema: &Value) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema)
            .map_err(|e| GenError::InvalidSchema {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self { path, compiled })
    }

    /// Path of the schema this validator was compiled from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check a document
    ///
    /// Returns every violation, in the order the validator reports them.
    pub fn check(&self, document: &Value) -> std::result::Result<(), Vec<String>> {
        match self.compiled.validate(document) {
            Ok(()) => Ok(()),
            Err(errors) => Err(errors
                .map(|e| {
                    let at = e.instance_path.to_string();
                    if at.is_empty() {
                        e.to_string()
                    } else {
                        format!("{} (at {})", e, at)
                    }
                })
                .collect()),
        }
    }
}
