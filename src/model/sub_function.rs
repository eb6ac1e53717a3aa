//! Sub-Function Model Builder

use std::path::Path;

use tracing::debug;

use super::names::IdentifierRegistry;
use super::text::{escape_detail, parse_hex_u32, strip_whitespace};
use crate::definition::{ServiceSubRecord, ServiceSubTable};
use crate::error::{GenError, Result};

/// Separator between the start and end of a sub-function range
pub const RANGE_SEPARATOR: &str = "to";

const BIT_RANGE_FIELD: &str = "Bit6to0";

/// Largest sub-function value; generated tables store values as one byte
pub const SUB_FUNCTION_MAX: u32 = 0xFF;

/// One sub-function (or reserved range of sub-functions) of a service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubFunctionItem {
    pub programmer_name: String,
    pub hex_range_start_raw: String,
    pub hex_range_end_raw: String,
    pub hex_range_start: u32,
    pub hex_range_end: u32,
    pub display_name: String,
    pub mnemonic: String,
    pub detail: String,
}

impl SubFunctionItem {
    /// Whether the item covers more than one value
    pub fn is_range(&self) -> bool {
        self.hex_range_start != self.hex_range_end
    }

    /// Build an item from one record
    ///
    /// `path` is the definition file, used in error messages.
    pub fn from_record(record: &ServiceSubRecord, path: &Path) -> Result<Self> {
        let programmer_name = record.sub_function_name_for_programmer.clone();

        let (start_raw, end_raw) = match record.bit_range.split_once(RANGE_SEPARATOR) {
            Some((start, end)) => (strip_whitespace(start), strip_whitespace(end)),
            None => {
                let value = strip_whitespace(&record.bit_range);
                (value.clone(), value)
            }
        };

        let parse = |raw: &str| {
            parse_hex_u32(raw).map_err(|_| GenError::ValueParse {
                item: programmer_name.clone(),
                field: BIT_RANGE_FIELD,
                value: record.bit_range.clone(),
                path: path.to_path_buf(),
            })
        };
        let start = parse(&start_raw)?;
        let end = parse(&end_raw)?;

        if end < start || end > SUB_FUNCTION_MAX {
            return Err(GenError::RangeViolation {
                item: programmer_name,
                field: BIT_RANGE_FIELD,
                value: record.bit_range.clone(),
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            programmer_name,
            hex_range_start_raw: start_raw,
            hex_range_end_raw: end_raw,
            hex_range_start: start,
            hex_range_end: end,
            display_name: record.short_name.clone(),
            mnemonic: record.mnemonic.clone(),
            detail: escape_detail(&record.details),
        })
    }
}

/// Ordered sub-functions of one service, with their own naming scope
#[derive(Debug, Clone, Default)]
pub struct SubFunctionCollection {
    items: Vec<SubFunctionItem>,
    names: IdentifierRegistry,
}

impl SubFunctionCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item, making its programmer name unique in this collection
    pub fn add(&mut self, mut item: SubFunctionItem) {
        item.programmer_name = self.names.register(&item.programmer_name);
        self.items.push(item);
    }

    pub fn items(&self) -> &[SubFunctionItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Build the sub-function collection of one service
///
/// Only records whose owning-service name equals `service_name` are used.
pub fn build_sub_functions(service_name: &str, table: &ServiceSubTable) -> Result<SubFunctionCollection> {
    let mut collection = SubFunctionCollection::new();

    for record in table
        .subs
        .iter()
        .filter(|r| r.service_name_for_programmer == service_name)
    {
        let item = SubFunctionItem::from_record(record, &table.path)?;
        collection.add(item);
    }

    debug!(service = service_name, sub_functions = collection.len(), "built sub-functions");
    Ok(collection)
}
