//! Field text helpers shared by the model builders

use std::num::ParseIntError;

/// Escape detail text for embedding in a generated string literal
///
/// Only newlines and double quotes are touched; backslashes already in the
/// source are passed through as written.
pub fn escape_detail(text: &str) -> String {
    text.replace('\n', "\\n").replace('"', "\\\"")
}

/// Remove every whitespace character
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parse base-16 text, with or without a `0x` prefix
pub fn parse_hex_u64(text: &str) -> Result<u64, ParseIntError> {
    u64::from_str_radix(hex_digits(text), 16)
}

/// Parse base-16 text into a `u32`, with or without a `0x` prefix
pub fn parse_hex_u32(text: &str) -> Result<u32, ParseIntError> {
    u32::from_str_radix(hex_digits(text), 16)
}

fn hex_digits(text: &str) -> &str {
    text.strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text)
}

/// First character uppercased, the rest unchanged
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
