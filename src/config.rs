//! Configuration for the definition compiler
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (udsgen.toml)
//! - Environment variables (UDSGEN__*)
//!
//! ## Example config file (udsgen.toml):
//! ```toml
//! [definitions]
//! dir = "definitions"
//! services = "serv.json"
//! service_subs = "serv_sub.json"
//! req_resp = "req_resp.json"
//! schema_dir = "schemas"
//!
//! [output]
//! dir = "output"
//! template_dir = "templates"
//! template_suffix = ".template"
//! ```

use std::path::{Path, PathBuf};

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::codegen::{TemplateSource, TEMPLATE_SUFFIX};
use crate::definition::{DefinitionKind, DefinitionPaths, SchemaSource};

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenConfig {
    /// Definition document locations
    #[serde(default)]
    pub definitions: DefinitionsConfig,

    /// Generated artifact settings
    #[serde(default)]
    pub output: OutputConfig,
}

/// Definition documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefinitionsConfig {
    /// Directory the file names below are resolved against
    #[serde(default = "default_definitions_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_services_file")]
    pub services: PathBuf,

    #[serde(default = "default_service_subs_file")]
    pub service_subs: PathBuf,

    #[serde(default = "default_req_resp_file")]
    pub req_resp: PathBuf,

    /// Overrides the schemas built into the binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_dir: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the fixed header/implementation pair is written
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Overrides the templates built into the binary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,

    #[serde(default = "default_template_suffix")]
    pub template_suffix: String,
}

// Default value functions
fn default_definitions_dir() -> PathBuf {
    PathBuf::from("definitions")
}

fn default_services_file() -> PathBuf {
    PathBuf::from(DefinitionKind::Services.default_file())
}

fn default_service_subs_file() -> PathBuf {
    PathBuf::from(DefinitionKind::ServiceSubs.default_file())
}

fn default_req_resp_file() -> PathBuf {
    PathBuf::from(DefinitionKind::ReqResp.default_file())
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_template_suffix() -> String {
    TEMPLATE_SUFFIX.to_string()
}

impl Default for DefinitionsConfig {
    fn default() -> Self {
        Self {
            dir: default_definitions_dir(),
            services: default_services_file(),
            service_subs: default_service_subs_file(),
            req_resp: default_req_resp_file(),
            schema_dir: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            template_dir: None,
            template_suffix: default_template_suffix(),
        }
    }
}

impl GenConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file on top of the defaults
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["udsgen.toml", ".udsgen.toml", "config/udsgen.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = directories::ProjectDirs::from("dev", "udsgen", "udsgen") {
            let xdg_config = dirs.config_dir().join("udsgen.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // UDSGEN__OUTPUT__DIR=gen and similar
        builder = builder.add_source(Environment::with_prefix("UDSGEN").separator("__").try_parsing(true));

        builder.build()?.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Definition file paths resolved against `definitions.dir`
    pub fn definition_paths(&self) -> DefinitionPaths {
        let defs = &self.definitions;
        DefinitionPaths {
            services: defs.dir.join(&defs.services),
            service_subs: defs.dir.join(&defs.service_subs),
            req_resp: defs.dir.join(&defs.req_resp),
            schemas: match &defs.schema_dir {
                Some(dir) => SchemaSource::Directory(dir.clone()),
                None => SchemaSource::Embedded,
            },
        }
    }

    pub fn template_source(&self) -> TemplateSource {
        match &self.output.template_dir {
            Some(dir) => TemplateSource::Directory(dir.clone()),
            None => TemplateSource::Embedded,
        }
    }
}
