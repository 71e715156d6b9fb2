//! Status interpretation: raw key records to what the user is shown.
//!
//! Only `ACTIVE` records are reinterpreted, against a caller-supplied clock:
//!
//! | expiration                  | shown          |
//! |-----------------------------|----------------|
//! | in the past, year 1970      | `NEVER SIGNED` |
//! | in the past, any other year | `EXPIRED`      |
//! | now or later                | `SIGNED`       |
//!
//! The server stores the epoch as the expiration of keys it never signed.
//! Only the year is compared, so any 1970 expiration reads `NEVER SIGNED`.

use super::{DisplayStatus, KeyRecord, KeyStatus};
use crate::shared::to_pretty_json;

use chrono::{Datelike, NaiveDateTime};
use serde_json::Value;

/// Expiration timestamp format, fractional seconds optional.
pub const EXPIRATION_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Year of the "never signed" sentinel.
pub const EPOCH_YEAR: i32 = 1970;

pub fn parse_expiration(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), EXPIRATION_FORMAT).ok()
}

/// Display status of `record` at `now`.
///
/// An active record without a parsable expiration keeps its raw status.
pub fn interpret(record: &KeyRecord, now: NaiveDateTime) -> DisplayStatus {
    if record.status != KeyStatus::Active {
        return DisplayStatus::Raw(record.status.clone());
    }
    let Some(expiration) = record.expiration().and_then(parse_expiration) else {
        return DisplayStatus::Raw(record.status.clone());
    };

    if expiration < now {
        if expiration.year() == EPOCH_YEAR {
            DisplayStatus::NeverSigned
        } else {
            DisplayStatus::Expired
        }
    } else {
        DisplayStatus::Signed
    }
}

/// Rewrite every key record found in a status response.
///
/// Any object with a string `status` is a record; other objects and arrays
/// are walked. This covers a bare record, `user → record`,
/// `user → [record, ...]` and `user → {slot → record}`.
pub fn interpret_tree(value: Value, now: NaiveDateTime) -> Value {
    match value {
        Value::Object(map) if map.get("status").is_some_and(Value::is_string) => {
            match serde_json::from_value::<KeyRecord>(Value::Object(map.clone())) {
                Ok(record) => {
                    let display = interpret(&record, now);
                    record.into_display_value(&display)
                }
                Err(_) => Value::Object(map),
            }
        }
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (key, interpret_tree(inner, now)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|inner| interpret_tree(inner, now))
                .collect(),
        ),
        other => other,
    }
}

// ─── StatusReport ────────────────────────────────────────────────────────────

/// Outcome of a status call, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusReport {
    /// Body was not JSON (plain-text server error); shown verbatim.
    Raw(String),
    /// Body was `{}`: the user has no keys.
    Empty,
    /// Records with their display status applied.
    Keys(Value),
}

impl StatusReport {
    pub fn from_body(body: &str, now: NaiveDateTime) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) if map.is_empty() => StatusReport::Empty,
            Ok(value) => StatusReport::Keys(interpret_tree(value, now)),
            Err(err) => {
                tracing::warn!(error = %err, "Status response is not JSON, showing it as is");
                StatusReport::Raw(body.to_string())
            }
        }
    }

    /// Pretty JSON with sorted keys, or the raw body.
    pub fn render(&self) -> String {
        match self {
            StatusReport::Raw(body) => body.clone(),
            StatusReport::Empty => to_pretty_json(&Value::Object(Default::default())),
            StatusReport::Keys(value) => to_pretty_json(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn record(status: &str, expiration: &str) -> KeyRecord {
        serde_json::from_value(json!({"status": status, "expiration": expiration})).unwrap()
    }

    #[test]
    fn test_epoch_sentinel_reads_never_signed() {
        let now = at(2026, 10, 19);
        assert_eq!(
            interpret(&record("ACTIVE", "1970-01-01 00:00:00"), now),
            DisplayStatus::NeverSigned
        );
        assert_eq!(
            interpret(&record("ACTIVE", "1970-01-01 00:00:00.5"), now),
            DisplayStatus::NeverSigned
        );
        // Year-only comparison: late 1970 is still "never signed".
        assert_eq!(
            interpret(&record("ACTIVE", "1970-12-31 23:59:59"), now),
            DisplayStatus::NeverSigned
        );
    }

    #[test]
    fn test_past_expiration_reads_expired() {
        let now = at(2026, 10, 19);
        for exp in ["1971-01-01 00:00:00", "1969-12-31 23:59:59", "2026-10-19 11:59:59"] {
            assert_eq!(interpret(&record("ACTIVE", exp), now), DisplayStatus::Expired, "{exp}");
        }
    }

    #[test]
    fn test_future_or_now_reads_signed() {
        let now = at(2026, 10, 19);
        assert_eq!(
            interpret(&record("ACTIVE", "2026-10-19 12:00:00"), now),
            DisplayStatus::Signed
        );
        assert_eq!(
            interpret(&record("ACTIVE", "2030-01-01 00:00:00"), now),
            DisplayStatus::Signed
        );
    }

    #[test]
    fn test_inactive_states_unchanged() {
        let now = at(2026, 10, 19);
        for raw in ["PENDING", "REVOKED", "SUSPENDED"] {
            let shown = interpret(&record(raw, "1970-01-01 00:00:00"), now);
            assert_eq!(shown.as_str(), raw);
        }
    }

    #[test]
    fn test_unparsable_expiration_keeps_raw() {
        let now = at(2026, 10, 19);
        assert_eq!(
            interpret(&record("ACTIVE", "tomorrow"), now),
            DisplayStatus::Raw(KeyStatus::Active)
        );
    }

    #[test]
    fn test_null_expiration_is_printed() {
        let now = at(2026, 10, 19);
        let body = json!({"k2": {"status": "ACTIVE", "expiration": null}});
        let value = interpret_tree(body, now);
        assert_eq!(value["k2"]["status"], "ACTIVE");
        assert_eq!(value["k2"].get("expiration"), Some(&Value::Null));
        assert_eq!(
            StatusReport::Keys(value).render(),
            "{\n    \"k2\": {\n        \"expiration\": null,\n        \"status\": \"ACTIVE\"\n    }\n}"
        );
    }

    #[test]
    fn test_tree_single_and_multi_key() {
        let now = at(2026, 10, 19);
        let body = json!({
            "alice": {"status": "ACTIVE", "expiration": "2030-01-01 00:00:00", "realname": "a@x"},
            "bob": [
                {"status": "ACTIVE", "expiration": "1970-01-01 00:00:00"},
                {"status": "PENDING", "expiration": "1970-01-01 00:00:00"}
            ],
            "carol": {"laptop": {"status": "ACTIVE", "expiration": "2001-01-01 00:00:00"}}
        });
        let out = interpret_tree(body, now);
        assert_eq!(out["alice"]["status"], "SIGNED");
        assert_eq!(out["alice"]["realname"], "a@x");
        assert_eq!(out["bob"][0]["status"], "NEVER SIGNED");
        assert_eq!(out["bob"][1]["status"], "PENDING");
        assert_eq!(out["carol"]["laptop"]["status"], "EXPIRED");
    }

    #[test]
    fn test_report_variants() {
        let now = at(2026, 10, 19);
        assert_eq!(StatusReport::from_body("{}", now), StatusReport::Empty);
        assert_eq!(StatusReport::Empty.render(), "{}");
        assert_eq!(
            StatusReport::from_body("Error: user not found", now),
            StatusReport::Raw("Error: user not found".to_string())
        );
    }

    #[test]
    fn test_render_sorted_four_space_indent() {
        let now = at(2026, 10, 19);
        let report = StatusReport::from_body(
            r#"{"status": "REVOKED", "expiration": "2020-01-01 00:00:00", "name": "alice"}"#,
            now,
        );
        let expected = "{\n    \"expiration\": \"2020-01-01 00:00:00\",\n    \"name\": \"alice\",\n    \"status\": \"REVOKED\"\n}";
        assert_eq!(report.render(), expected);
    }
}
