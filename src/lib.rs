//! UDS Definition Compiler
//!
//! Reads the three JSON documents that describe a UDS (ISO 14229) diagnostic
//! protocol surface, validates them against their companion schemas, builds
//! a typed model and renders it through tera templates.
//!
//! ## Pipeline
//!
//! ```text
//! serv.json ─────┐
//! serv_sub.json ─┼─► definition ─► model ─► codegen ─► uds_def.h
//! req_resp.json ─┘   (validate)   (build)   (render)   uds_def.cpp
//! ```
//!
//! - **Services**: one per service identifier, each owning its sub-functions
//! - **Sub-functions**: single values or `0xNNto0xMM` ranges
//! - **Request/response layouts**: byte fields grouped into classes
//!
//! Identifiers that repeat within a collection are made unique by appending
//! an occurrence counter (see [`model::IdentifierRegistry`]).

pub mod codegen;
pub mod config;
pub mod definition;
pub mod error;
pub mod model;

pub use codegen::{generate_fixed, generate_from_template, Generator, RenderContext, TemplateSource};
pub use config::GenConfig;
pub use definition::{DefinitionPaths, DefinitionSet};
pub use error::{GenError, Result};
pub use model::UdsModel;
