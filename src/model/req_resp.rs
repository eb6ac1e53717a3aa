//! Request/Response Layout Builder
//!
//! Groups byte-layout records into classes. Class order is the order in
//! which a class name first appears; item order within a class is source
//! order.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use super::text::escape_detail;
use crate::definition::{ReqRespRecord, ReqRespTable};
use crate::error::{GenError, Result};

/// Message role of a layout field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Req,
    PosResp,
    NegResp,
}

impl Direction {
    /// Tag as written in definition files and appended to class names
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Req => "Req",
            Direction::PosResp => "PosResp",
            Direction::NegResp => "NegResp",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Req" => Ok(Direction::Req),
            "PosResp" => Ok(Direction::PosResp),
            "NegResp" => Ok(Direction::NegResp),
            _ => Err(()),
        }
    }
}

/// Unsigned integer type for fields of a standard size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixedWidthType {
    U8,
    U16,
    U32,
    U64,
}

impl FixedWidthType {
    /// Width for a byte size of 1, 2, 4 or 8
    pub fn from_size(size: i64) -> Option<Self> {
        match size {
            1 => Some(FixedWidthType::U8),
            2 => Some(FixedWidthType::U16),
            4 => Some(FixedWidthType::U32),
            8 => Some(FixedWidthType::U64),
            _ => None,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            FixedWidthType::U8 => 8,
            FixedWidthType::U16 => 16,
            FixedWidthType::U32 => 32,
            FixedWidthType::U64 => 64,
        }
    }

    /// C/C++ `<cstdint>` type name
    pub fn c_type(&self) -> &'static str {
        match self {
            FixedWidthType::U8 => "uint8_t",
            FixedWidthType::U16 => "uint16_t",
            FixedWidthType::U32 => "uint32_t",
            FixedWidthType::U64 => "uint64_t",
        }
    }
}

/// One field of a request or response message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReqRespItem {
    pub programmer_name: String,
    pub direction: Direction,
    /// Zero-based byte position
    pub byte_index: u32,
    /// Size text when numeric, empty otherwise
    pub size_raw: String,
    pub size: Option<i64>,
    pub detail: String,
}

impl ReqRespItem {
    /// Build an item from one record
    pub fn from_record(record: &ReqRespRecord, path: &Path) -> Result<Self> {
        let direction = record.req_resp.parse::<Direction>().map_err(|_| GenError::ValueParse {
            item: record.name_for_programmer.clone(),
            field: "ReqResp",
            value: record.req_resp.clone(),
            path: path.to_path_buf(),
        })?;

        let byte_index = record.data_byte.checked_sub(1).ok_or_else(|| GenError::RangeViolation {
            item: record.name_for_programmer.clone(),
            field: "DataByte",
            value: record.data_byte.to_string(),
            path: path.to_path_buf(),
        })?;

        let (size, size_raw) = match record.size.trim().parse::<i64>() {
            Ok(size) => (Some(size), record.size.clone()),
            Err(_) => {
                warn!(
                    field = %record.name_for_programmer,
                    class = %record.mem_class_name,
                    size = %record.size,
                    "size is not numeric, treating as unknown"
                );
                (None, String::new())
            }
        };

        Ok(Self {
            programmer_name: record.name_for_programmer.clone(),
            direction,
            byte_index,
            size_raw,
            size,
            detail: escape_detail(record.details.as_deref().unwrap_or_default()),
        })
    }

    pub fn size_known(&self) -> bool {
        self.size.is_some()
    }

    pub fn is_standard_size(&self) -> bool {
        self.fixed_width_type().is_some()
    }

    pub fn fixed_width_type(&self) -> Option<FixedWidthType> {
        self.size.and_then(FixedWidthType::from_size)
    }
}

/// Fields sharing one class name, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReqRespClass {
    pub class_name: String,
    pub items: Vec<ReqRespItem>,
}

impl ReqRespClass {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            items: Vec::new(),
        }
    }

    /// Class name followed by the direction tag of its first item
    pub fn qualified_name(&self) -> Result<String> {
        let first = self
            .items
            .first()
            .ok_or_else(|| GenError::EmptyClass(self.class_name.clone()))?;
        Ok(format!("{}{}", self.class_name, first.direction))
    }
}

/// Group every layout record into classes
pub fn build_req_resp_classes(table: &ReqRespTable) -> Result<Vec<ReqRespClass>> {
    let mut classes: Vec<ReqRespClass> = Vec::new();

    for record in &table.items {
        if !classes.iter().any(|c| c.class_name == record.mem_class_name) {
            classes.push(ReqRespClass::new(record.mem_class_name.clone()));
        }
    }

    for record in &table.items {
        let item = ReqRespItem::from_record(record, &table.path)?;
        if let Some(class) = classes.iter_mut().find(|c| c.class_name == record.mem_class_name) {
            class.items.push(item);
        }
    }

    for class in &classes {
        debug!(class = %class.class_name, items = class.items.len(), "built request/response class");
    }
    Ok(classes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(class: &str, name: &str, dir: &str, byte: u32, size: &str) -> ReqRespRecord {
        ReqRespRecord {
            mem_class_name: class.to_string(),
            name_for_programmer: name.to_string(),
            req_resp: dir.to_string(),
            data_byte: byte,
            size: size.to_string(),
            details: None,
        }
    }

    fn table(records: Vec<ReqRespRecord>) -> ReqRespTable {
        ReqRespTable {
            path: PathBuf::from("req_resp.json"),
            items: records,
        }
    }

    #[test]
    fn test_standard_size() {
        let item = ReqRespItem::from_record(&record("DiagSessCtrl", "sessParam", "PosResp", 3, "4"), Path::new("x")).unwrap();
        assert!(item.size_known());
        assert!(item.is_standard_size());
        assert_eq!(item.fixed_width_type(), Some(FixedWidthType::U32));
        assert_eq!(item.size_raw, "4");
        assert_eq!(item.byte_index, 2);
    }

    #[test]
    fn test_every_standard_width() {
        let widths: Vec<_> = ["1", "2", "4", "8"]
            .iter()
            .map(|s| {
                ReqRespItem::from_record(&record("C", "f", "Req", 1, s), Path::new("x"))
                    .unwrap()
                    .fixed_width_type()
                    .map(|w| w.bits())
            })
            .collect();
        assert_eq!(widths, vec![Some(8), Some(16), Some(32), Some(64)]);
    }

    #[test]
    fn test_known_non_standard_size() {
        let item = ReqRespItem::from_record(&record("C", "dtc", "PosResp", 3, "3"), Path::new("x")).unwrap();
        assert!(item.size_known());
        assert!(!item.is_standard_size());
        assert_eq!(item.fixed_width_type(), None);
    }

    #[test]
    fn test_variable_size() {
        let item = ReqRespItem::from_record(&record("C", "data", "Req", 2, "variable"), Path::new("x")).unwrap();
        assert!(!item.size_known());
        assert!(!item.is_standard_size());
        assert_eq!(item.fixed_width_type(), None);
        assert_eq!(item.size_raw, "");
    }

    #[test]
    fn test_padded_size() {
        let item = ReqRespItem::from_record(&record("C", "f", "Req", 1, " 8 "), Path::new("x")).unwrap();
        assert_eq!(item.fixed_width_type(), Some(FixedWidthType::U64));
    }

    #[test]
    fn test_first_byte_is_index_zero() {
        let item = ReqRespItem::from_record(&record("C", "sid", "Req", 1, "1"), Path::new("x")).unwrap();
        assert_eq!(item.byte_index, 0);
    }

    #[test]
    fn test_byte_zero_rejected() {
        let result = ReqRespItem::from_record(&record("C", "sid", "Req", 0, "1"), Path::new("x"));
        assert!(matches!(result, Err(GenError::RangeViolation { field: "DataByte", .. })));
    }

    #[test]
    fn test_unknown_direction_rejected() {
        let result = ReqRespItem::from_record(&record("C", "sid", "Request", 1, "1"), Path::new("x"));
        assert!(matches!(result, Err(GenError::ValueParse { field: "ReqResp", .. })));
    }

    #[test]
    fn test_detail_defaults_to_empty() {
        let mut rec = record("C", "sid", "Req", 1, "1");
        let item = ReqRespItem::from_record(&rec, Path::new("x")).unwrap();
        assert_eq!(item.detail, "");

        rec.details = Some("Service \"Id\"\nbyte".to_string());
        let item = ReqRespItem::from_record(&rec, Path::new("x")).unwrap();
        assert_eq!(item.detail, "Service \\\"Id\\\"\\nbyte");
    }

    #[test]
    fn test_grouping_preserves_order() {
        let table = table(vec![
            record("EcuReset", "sid", "Req", 1, "1"),
            record("TesterPresent", "sid", "Req", 1, "1"),
            record("EcuReset", "subFunc", "Req", 2, "1"),
            record("TesterPresent", "subFunc", "Req", 2, "1"),
        ]);
        let classes = build_req_resp_classes(&table).unwrap();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].class_name, "EcuReset");
        assert_eq!(classes[1].class_name, "TesterPresent");
        let names: Vec<&str> = classes[0].items.iter().map(|i| i.programmer_name.as_str()).collect();
        assert_eq!(names, vec!["sid", "subFunc"]);
    }

    #[test]
    fn test_qualified_name() {
        let classes = build_req_resp_classes(&table(vec![
            record("SecAcc", "sid", "PosResp", 1, "1"),
            record("", "sid", "NegResp", 1, "1"),
        ]))
        .unwrap();
        assert_eq!(classes[0].qualified_name().unwrap(), "SecAccPosResp");
        assert_eq!(classes[1].qualified_name().unwrap(), "NegResp");
    }

    #[test]
    fn test_empty_class_guarded() {
        let class = ReqRespClass::new("Orphan");
        assert!(matches!(class.qualified_name(), Err(GenError::EmptyClass(name)) if name == "Orphan"));
    }

    #[test]
    fn test_empty_table() {
        assert!(build_req_resp_classes(&table(vec![])).unwrap().is_empty());
    }
}
