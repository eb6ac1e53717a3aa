//! Text-transform filters exposed to templates
//!
//! Identifiers in the definition files are written in camelCase or
//! PascalCase. Every character after the first that is not a lowercase
//! letter starts a new segment, so digits and acronyms are split too:
//! `reserved2` becomes `RESERVED_2` and `readDTC` becomes `READ_D_T_C`.

use std::collections::HashMap;

use tera::{Tera, Value};

use crate::model::text::capitalize_first;

/// `reservedValue` -> `RESERVED_VALUE`
pub fn upper_snake(s: &str) -> String {
    segment(s).to_uppercase()
}

/// `ReservedValue` -> `reserved_value`
pub fn lower_snake(s: &str) -> String {
    segment(s).to_lowercase()
}

fn segment(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && !c.is_lowercase() {
            out.push('_');
        }
        out.push(c);
    }
    out
}

fn string_filter(
    name: &'static str,
    f: fn(&str) -> String,
) -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> + Sync + Send {
    move |value: &Value, _args: &HashMap<String, Value>| {
        let s = value
            .as_str()
            .ok_or_else(|| tera::Error::msg(format!("Filter `{}` expects a string, got {}", name, value)))?;
        Ok(Value::String(f(s)))
    }
}

/// Register `upper_snake`, `lower_snake` and `capitalize_first`
pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("upper_snake", string_filter("upper_snake", upper_snake));
    tera.register_filter("lower_snake", string_filter("lower_snake", lower_snake));
    tera.register_filter("capitalize_first", string_filter("capitalize_first", capitalize_first));
}
