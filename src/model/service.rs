//! Service Model Builder

use std::num::IntErrorKind;
use std::path::Path;

use tracing::debug;

use super::names::IdentifierRegistry;
use super::sub_function::{build_sub_functions, SubFunctionCollection};
use super::text::parse_hex_u64;
use crate::definition::{ServiceRecord, ServiceSubTable, ServiceTable};
use crate::error::{GenError, Result};

const HEX_FIELD: &str = "Hex";

/// One top-level service
#[derive(Debug, Clone)]
pub struct ServiceItem {
    pub programmer_name: String,
    pub hex_code_raw: String,
    pub hex_code: u8,
    pub short_name: String,
    pub default_session_label: String,
    pub non_default_session_label: String,
    pub sub_functions: SubFunctionCollection,
}

impl ServiceItem {
    /// Build a service and its sub-functions from one record
    pub fn from_record(record: &ServiceRecord, path: &Path, subs: &ServiceSubTable) -> Result<Self> {
        let hex_code = parse_service_code(record, path)?;

        // Sub-functions reference the service by its name as written, before deduplication.
        let sub_functions = build_sub_functions(&record.name_for_programmer, subs)?;

        Ok(Self {
            programmer_name: record.name_for_programmer.clone(),
            hex_code_raw: record.hex.clone(),
            hex_code,
            short_name: record.short_name.clone(),
            default_session_label: record.default_session.replace(' ', "_"),
            non_default_session_label: record.non_default_session.replace(' ', "_"),
            sub_functions,
        })
    }

    pub fn has_sub_functions(&self) -> bool {
        !self.sub_functions.is_empty()
    }
}

fn parse_service_code(record: &ServiceRecord, path: &Path) -> Result<u8> {
    let range_violation = || GenError::RangeViolation {
        item: record.name_for_programmer.clone(),
        field: HEX_FIELD,
        value: record.hex.clone(),
        path: path.to_path_buf(),
    };

    let value = match parse_hex_u64(record.hex.trim()) {
        Ok(value) => value,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => return Err(range_violation()),
        Err(_) => {
            return Err(GenError::ValueParse {
                item: record.name_for_programmer.clone(),
                field: HEX_FIELD,
                value: record.hex.clone(),
                path: path.to_path_buf(),
            })
        }
    };

    u8::try_from(value).map_err(|_| range_violation())
}

/// All services of the definition set, with one naming scope
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    items: Vec<ServiceItem>,
    names: IdentifierRegistry,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a service, making its programmer name unique across all services
    pub fn add(&mut self, mut item: ServiceItem) {
        item.programmer_name = self.names.register(&item.programmer_name);
        self.items.push(item);
    }

    pub fn items(&self) -> &[ServiceItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Build every service, in source order
pub fn build_services(services: &ServiceTable, subs: &ServiceSubTable) -> Result<ServiceCollection> {
    let mut collection = ServiceCollection::new();

    for record in &services.services {
        let item = ServiceItem::from_record(record, &services.path, subs)?;
        debug!(
            service = %item.programmer_name,
            code = item.hex_code,
            sub_functions = item.sub_functions.len(),
            "built service"
        );
        collection.add(item);
    }

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ServiceSubRecord;
    use std::path::PathBuf;

    fn record(name: &str, hex: &str) -> ServiceRecord {
        ServiceRecord {
            name_for_programmer: name.to_string(),
            short_name: format!("{} service", name),
            hex: hex.to_string(),
            default_session: "Default Session".to_string(),
            non_default_session: "Extended Diagnostic Session".to_string(),
        }
    }

    fn services(records: Vec<ServiceRecord>) -> ServiceTable {
        ServiceTable {
            path: PathBuf::from("serv.json"),
            services: records,
        }
    }

    fn sub(service: &str, name: &str) -> ServiceSubRecord {
        ServiceSubRecord {
            service_name_for_programmer: service.to_string(),
            sub_function_name_for_programmer: name.to_string(),
            bit_range: "0x01".to_string(),
            short_name: name.to_string(),
            mnemonic: String::new(),
            details: String::new(),
        }
    }

    #[test]
    fn test_all_byte_codes_accepted() {
        for code in 0u32..=255 {
            let rec = record("serv", &format!("{:02X}", code));
            let item = ServiceItem::from_record(&rec, Path::new("serv.json"), &ServiceSubTable::default()).unwrap();
            assert_eq!(u32::from(item.hex_code), code);
        }
    }

    #[test]
    fn test_code_above_byte_rejected() {
        let rec = record("tooBig", "0x100");
        let result = ServiceItem::from_record(&rec, Path::new("serv.json"), &ServiceSubTable::default());
        match result {
            Err(GenError::RangeViolation { item, .. }) => assert_eq!(item, "tooBig"),
            other => panic!("Expected RangeViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_code_is_range_violation() {
        let rec = record("huge", "0xFFFFFFFFFFFFFFFFFF");
        let result = ServiceItem::from_record(&rec, Path::new("serv.json"), &ServiceSubTable::default());
        assert!(matches!(result, Err(GenError::RangeViolation { .. })));
    }

    #[test]
    fn test_non_hex_code_rejected() {
        let rec = record("garbled", "0x1G");
        let result = ServiceItem::from_record(&rec, Path::new("serv.json"), &ServiceSubTable::default());
        match result {
            Err(GenError::ValueParse { item, field, .. }) => {
                assert_eq!(item, "garbled");
                assert_eq!(field, "Hex");
            }
            other => panic!("Expected ValueParse, got {:?}", other),
        }
    }

    #[test]
    fn test_session_labels_use_underscores() {
        let rec = record("diagSessCtrl", "0x10");
        let item = ServiceItem::from_record(&rec, Path::new("serv.json"), &ServiceSubTable::default()).unwrap();
        assert_eq!(item.default_session_label, "Default_Session");
        assert_eq!(item.non_default_session_label, "Extended_Diagnostic_Session");
        assert_eq!(item.hex_code_raw, "0x10");
    }

    #[test]
    fn test_duplicate_service_names() {
        let table = services(vec![record("Sensor", "0x10"), record("Sensor", "0x22")]);
        let collection = build_services(&table, &ServiceSubTable::default()).unwrap();
        let names: Vec<&str> = collection.items().iter().map(|s| s.programmer_name.as_str()).collect();
        assert_eq!(names, vec!["Sensor", "Sensor1"]);
        assert_eq!(collection.items()[1].hex_code, 0x22);
    }

    #[test]
    fn test_scopes_are_independent() {
        let table = services(vec![record("def", "0x10")]);
        let subs = ServiceSubTable {
            path: PathBuf::from("serv_sub.json"),
            subs: vec![sub("def", "def")],
        };
        let collection = build_services(&table, &subs).unwrap();
        let service = &collection.items()[0];
        assert_eq!(service.programmer_name, "def");
        assert_eq!(service.sub_functions.items()[0].programmer_name, "def");
    }

    #[test]
    fn test_duplicate_services_share_sub_functions() {
        let table = services(vec![record("Sensor", "0x10"), record("Sensor", "0x22")]);
        let subs = ServiceSubTable {
            path: PathBuf::from("serv_sub.json"),
            subs: vec![sub("Sensor", "read")],
        };
        let collection = build_services(&table, &subs).unwrap();
        assert!(collection.items().iter().all(|s| s.has_sub_functions()));
    }

    #[test]
    fn test_error_stops_build() {
        let table = services(vec![record("ok", "0x10"), record("bad", "nope")]);
        assert!(build_services(&table, &ServiceSubTable::default()).is_err());
    }
}
