//! Shared helpers used across domain modules.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;

/// Render `value` as JSON indented by four spaces.
///
/// Object keys come out sorted because `serde_json::Map` is ordered.
pub fn to_pretty_json<T: Serialize>(value: &T) -> String {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(err) => format!("<unprintable JSON: {}>", err),
    }
}

/// Split a comma-separated CLI list, dropping blanks.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
