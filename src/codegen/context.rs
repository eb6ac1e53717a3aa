//! Render Context
//!
//! A serializable projection of [`UdsModel`]. Templates only see these
//! fields; derived values (capitalized names, qualified class names, C type
//! names) are computed here so templates stay free of logic.

use serde::Serialize;

use crate::error::Result;
use crate::model::text::capitalize_first;
use crate::model::{ReqRespClass, ReqRespItem, ServiceItem, SubFunctionItem, UdsModel};

#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    pub services: Vec<ServiceView<'a>>,
    pub req_resp_classes: Vec<ClassView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ServiceView<'a> {
    pub programmer_name: &'a str,
    pub capitalized_name: String,
    pub hex_code: u8,
    pub hex_code_raw: &'a str,
    /// C hex literal built from the parsed code, e.g. `0x3E`
    pub hex_code_literal: String,
    pub short_name: &'a str,
    pub default_session: &'a str,
    pub non_default_session: &'a str,
    pub has_sub_functions: bool,
    pub sub_functions: Vec<SubFunctionView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct SubFunctionView<'a> {
    pub programmer_name: &'a str,
    pub capitalized_name: String,
    pub hex_start: u32,
    pub hex_end: u32,
    pub hex_start_raw: &'a str,
    pub hex_end_raw: &'a str,
    pub hex_start_literal: String,
    pub hex_end_literal: String,
    pub is_range: bool,
    pub name: &'a str,
    pub mnemonic: &'a str,
    pub detail: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ClassView<'a> {
    pub class_name: &'a str,
    pub qualified_name: String,
    pub items: Vec<ItemView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ItemView<'a> {
    pub programmer_name: &'a str,
    pub capitalized_name: String,
    pub direction: &'static str,
    pub byte_index: u32,
    pub size: Option<i64>,
    pub size_raw: &'a str,
    pub size_known: bool,
    pub is_standard_size: bool,
    /// `uint8_t` .. `uint64_t`, empty for non-standard sizes
    pub data_type: &'static str,
    pub bits: Option<u32>,
    pub is_byte: bool,
    pub detail: &'a str,
}

impl<'a> RenderContext<'a> {
    pub fn from_model(model: &'a UdsModel) -> Result<Self> {
        let services = model.services.items().iter().map(ServiceView::new).collect();
        let req_resp_classes = model
            .req_resp_classes
            .iter()
            .map(ClassView::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            services,
            req_resp_classes,
        })
    }

    pub fn to_tera(&self) -> Result<tera::Context> {
        Ok(tera::Context::from_serialize(self)?)
    }
}

/// Source text may omit the `0x` prefix, so literals come from parsed values
fn hex_literal(value: u32) -> String {
    format!("0x{:02X}", value)
}

impl<'a> ServiceView<'a> {
    fn new(service: &'a ServiceItem) -> Self {
        Self {
            programmer_name: &service.programmer_name,
            capitalized_name: capitalize_first(&service.programmer_name),
            hex_code: service.hex_code,
            hex_code_raw: &service.hex_code_raw,
            hex_code_literal: hex_literal(service.hex_code.into()),
            short_name: &service.short_name,
            default_session: &service.default_session_label,
            non_default_session: &service.non_default_session_label,
            has_sub_functions: service.has_sub_functions(),
            sub_functions: service.sub_functions.items().iter().map(SubFunctionView::new).collect(),
        }
    }
}

impl<'a> SubFunctionView<'a> {
    fn new(sub: &'a SubFunctionItem) -> Self {
        Self {
            programmer_name: &sub.programmer_name,
            capitalized_name: capitalize_first(&sub.programmer_name),
            hex_start: sub.hex_range_start,
            hex_end: sub.hex_range_end,
            hex_start_raw: &sub.hex_range_start_raw,
            hex_end_raw: &sub.hex_range_end_raw,
            hex_start_literal: hex_literal(sub.hex_range_start),
            hex_end_literal: hex_literal(sub.hex_range_end),
            is_range: sub.is_range(),
            name: &sub.display_name,
            mnemonic: &sub.mnemonic,
            detail: &sub.detail,
        }
    }
}

impl<'a> ClassView<'a> {
    fn new(class: &'a ReqRespClass) -> Result<Self> {
        Ok(Self {
            class_name: &class.class_name,
            qualified_name: class.qualified_name()?,
            items: class.items.iter().map(ItemView::new).collect(),
        })
    }
}

impl<'a> ItemView<'a> {
    fn new(item: &'a ReqRespItem) -> Self {
        let width = item.fixed_width_type();
        Self {
            programmer_name: &item.programmer_name,
            capitalized_name: capitalize_first(&item.programmer_name),
            direction: item.direction.as_str(),
            byte_index: item.byte_index,
            size: item.size,
            size_raw: &item.size_raw,
            size_known: item.size_known(),
            is_standard_size: width.is_some(),
            data_type: width.map(|w| w.c_type()).unwrap_or_default(),
            bits: width.map(|w| w.bits()),
            is_byte: width.map(|w| w.bits() == 8).unwrap_or(false),
            detail: &item.detail,
        }
    }
}
