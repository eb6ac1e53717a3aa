//! Typed definition records
//!
//! Field names follow the definition file keys. A document is deserialized
//! into these structs right after schema validation so nothing past the
//! loader looks at raw JSON keys.

use std::path::PathBuf;

use serde::Deserialize;

/// One row of the service table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceRecord {
    pub name_for_programmer: String,
    pub short_name: String,
    pub hex: String,
    pub default_session: String,
    pub non_default_session: String,
}

/// One row of the service sub-function table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ServiceSubRecord {
    /// Programmer name of the owning service, as written in the service table
    pub service_name_for_programmer: String,
    pub sub_function_name_for_programmer: String,
    /// Sub-function value, either `"0x01"` or a range `"0x05 to 0x3F"`
    #[serde(rename = "Bit6to0")]
    pub bit_range: String,
    pub short_name: String,
    pub mnemonic: String,
    pub details: String,
}

/// One byte-layout field of a request or response message
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReqRespRecord {
    pub mem_class_name: String,
    pub name_for_programmer: String,
    pub req_resp: String,
    /// 1-based position of the field in the message
    pub data_byte: u32,
    pub size: String,
    #[serde(default)]
    pub details: Option<String>,
}

/// The whole service table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceTable {
    #[serde(skip)]
    pub path: PathBuf,
    #[serde(rename = "Service", default)]
    pub services: Vec<ServiceRecord>,
}

/// The whole service sub-function table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceSubTable {
    #[serde(skip)]
    pub path: PathBuf,
    #[serde(rename = "ServiceSub", default)]
    pub subs: Vec<ServiceSubRecord>,
}

/// The whole request/response layout table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReqRespTable {
    #[serde(skip)]
    pub path: PathBuf,
    #[serde(rename = "ReqRespItem", default)]
    pub items: Vec<ReqRespRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_record_keys() {
        let record: ServiceRecord = serde_json::from_value(serde_json::json!({
            "NameForProgrammer": "diagSessCtrl",
            "ShortName": "DiagnosticSessionControl",
            "Hex": "0x10",
            "DefaultSession": "x",
            "NonDefaultSession": "x"
        }))
        .unwrap();
        assert_eq!(record.name_for_programmer, "diagSessCtrl");
        assert_eq!(record.hex, "0x10");
    }

    #[test]
    fn test_req_resp_details_optional() {
        let record: ReqRespRecord = serde_json::from_value(serde_json::json!({
            "MemClassName": "EcuReset",
            "NameForProgrammer": "sid",
            "ReqResp": "Req",
            "DataByte": 1,
            "Size": "1"
        }))
        .unwrap();
        assert_eq!(record.details, None);
    }

    #[test]
    fn test_missing_table_is_empty() {
        let table: ServiceSubTable = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(table.subs.is_empty());
    }
}
