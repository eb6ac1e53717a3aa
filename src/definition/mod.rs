//! Definition Loading
//!
//! Reads the three definition documents, validates each one against its
//! companion schema and converts it into typed records. This is the only
//! place that handles untyped JSON.

pub mod records;
pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{GenError, ResourceKind, Result};

pub use records::{
    ReqRespRecord, ReqRespTable, ServiceRecord, ServiceSubRecord, ServiceSubTable, ServiceTable,
};
pub use schema::{SchemaSource, SchemaValidator};

/// The three logical definition documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Services,
    ServiceSubs,
    ReqResp,
}

impl DefinitionKind {
    /// File name of the companion schema
    pub fn schema_file(&self) -> &'static str {
        match self {
            DefinitionKind::Services => "service.schema.json",
            DefinitionKind::ServiceSubs => "service_sub.schema.json",
            DefinitionKind::ReqResp => "req_resp.schema.json",
        }
    }

    /// Default definition file name
    pub fn default_file(&self) -> &'static str {
        match self {
            DefinitionKind::Services => "serv.json",
            DefinitionKind::ServiceSubs => "serv_sub.json",
            DefinitionKind::ReqResp => "req_resp.json",
        }
    }
}

/// Locations of the definition documents and their schemas
#[derive(Debug, Clone)]
pub struct DefinitionPaths {
    pub services: PathBuf,
    pub service_subs: PathBuf,
    pub req_resp: PathBuf,
    pub schemas: SchemaSource,
}

impl DefinitionPaths {
    /// Default file names inside one directory, embedded schemas
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            services: dir.join(DefinitionKind::Services.default_file()),
            service_subs: dir.join(DefinitionKind::ServiceSubs.default_file()),
            req_resp: dir.join(DefinitionKind::ReqResp.default_file()),
            schemas: SchemaSource::Embedded,
        }
    }

    /// Check that every definition file exists before any parsing starts
    pub fn ensure_exist(&self) -> Result<()> {
        for path in [&self.services, &self.service_subs, &self.req_resp] {
            if !path.is_file() {
                return Err(GenError::MissingResource {
                    kind: ResourceKind::Definition,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }
}

/// A definition document that passed schema validation
#[derive(Debug, Clone)]
pub struct DefinitionDocument {
    pub path: PathBuf,
    pub root: Value,
}

impl DefinitionDocument {
    /// Read a document and validate it against its companion schema
    pub fn load(kind: DefinitionKind, path: impl AsRef<Path>, schemas: &SchemaSource) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(GenError::MissingResource {
                kind: ResourceKind::Definition,
                path,
            });
        }

        let content = fs::read_to_string(&path)?;
        let root: Value = serde_json::from_str(&content).map_err(|source| GenError::Record {
            path: path.clone(),
            source,
        })?;

        Self::from_value(kind, path, root, schemas)
    }

    /// Validate an already parsed document
    pub fn from_value(
        kind: DefinitionKind,
        path: impl AsRef<Path>,
        root: Value,
        schemas: &SchemaSource,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (schema_path, schema) = schemas.load(kind.schema_file())?;
        let validator = SchemaValidator::compile(&schema_path, &schema)?;
        debug!(document = %path.display(), schema = %validator.path().display(), "validating definition");

        validator
            .check(&root)
            .map_err(|errors| GenError::SchemaViolation {
                path: path.clone(),
                errors,
            })?;

        Ok(Self { path, root })
    }

    /// Convert the validated tree into typed records
    pub fn records<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.root.clone()).map_err(|source| GenError::Record {
            path: self.path.clone(),
            source,
        })
    }
}

/// All three tables, validated and typed
#[derive(Debug, Clone, Default)]
pub struct DefinitionSet {
    pub services: ServiceTable,
    pub service_subs: ServiceSubTable,
    pub req_resp: ReqRespTable,
}

impl DefinitionSet {
    /// Load, validate and convert every definition document
    pub fn load(paths: &DefinitionPaths) -> Result<Self> {
        paths.ensure_exist()?;

        let mut services: ServiceTable =
            DefinitionDocument::load(DefinitionKind::Services, &paths.services, &paths.schemas)?.records()?;
        services.path = paths.services.clone();
        info!(path = %services.path.display(), records = services.services.len(), "loaded service table");

        let mut service_subs: ServiceSubTable =
            DefinitionDocument::load(DefinitionKind::ServiceSubs, &paths.service_subs, &paths.schemas)?
                .records()?;
        service_subs.path = paths.service_subs.clone();
        info!(path = %service_subs.path.display(), records = service_subs.subs.len(), "loaded sub-function table");

        let mut req_resp: ReqRespTable =
            DefinitionDocument::load(DefinitionKind::ReqResp, &paths.req_resp, &paths.schemas)?.records()?;
        req_resp.path = paths.req_resp.clone();
        info!(path = %req_resp.path.display(), records = req_resp.items.len(), "loaded request/response table");

        Ok(Self {
            services,
            service_subs,
            req_resp,
        })
    }
}
