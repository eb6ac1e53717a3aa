//! Domain Model
//!
//! Strongly typed services, sub-functions and request/response layouts,
//! built once from a [`DefinitionSet`] and read-only afterwards.

pub mod names;
pub mod req_resp;
pub mod service;
pub mod sub_function;
pub mod text;

use tracing::info;

use crate::definition::{DefinitionPaths, DefinitionSet};
use crate::error::Result;

pub use names::IdentifierRegistry;
pub use req_resp::{build_req_resp_classes, Direction, FixedWidthType, ReqRespClass, ReqRespItem};
pub use service::{build_services, ServiceCollection, ServiceItem};
pub use sub_function::{build_sub_functions, SubFunctionCollection, SubFunctionItem};

/// Everything the generation stage receives
#[derive(Debug, Clone, Default)]
pub struct UdsModel {
    pub services: ServiceCollection,
    pub req_resp_classes: Vec<ReqRespClass>,
}

impl UdsModel {
    /// Build the model from loaded definitions
    pub fn build(definitions: &DefinitionSet) -> Result<Self> {
        let services = build_services(&definitions.services, &definitions.service_subs)?;
        let req_resp_classes = build_req_resp_classes(&definitions.req_resp)?;

        info!(
            services = services.len(),
            req_resp_classes = req_resp_classes.len(),
            "model built"
        );

        Ok(Self {
            services,
            req_resp_classes,
        })
    }

    /// Load every definition document and build the model
    pub fn load(paths: &DefinitionPaths) -> Result<Self> {
        let definitions = DefinitionSet::load(paths)?;
        Self::build(&definitions)
    }
}
