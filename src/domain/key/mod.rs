//! Key domain: the user's own key: records, status interpretation, wire
//! endpoints and local key files.

pub mod client;
pub mod files;
pub mod status;
pub mod wire;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

// ─── KeyStatus ───────────────────────────────────────────────────────────────

/// Raw key state as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyStatus {
    Pending,
    Active,
    Revoked,
    /// Any state this client does not know; shown unchanged.
    Other(String),
}

impl KeyStatus {
    pub fn as_str(&self) -> &str {
        match self {
            KeyStatus::Pending => "PENDING",
            KeyStatus::Active => "ACTIVE",
            KeyStatus::Revoked => "REVOKED",
            KeyStatus::Other(raw) => raw,
        }
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "PENDING" => KeyStatus::Pending,
            "ACTIVE" => KeyStatus::Active,
            "REVOKED" => KeyStatus::Revoked,
            other => KeyStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for KeyStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for KeyStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(KeyStatus::parse(&s))
    }
}

// ─── DisplayStatus ───────────────────────────────────────────────────────────

/// What the user is shown for a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayStatus {
    /// Active with an expiration in the future.
    Signed,
    /// Active, but the last certificate has expired.
    Expired,
    /// Active, expiration carries the epoch sentinel.
    NeverSigned,
    /// Not active; the server's state is shown as is.
    Raw(KeyStatus),
}

impl DisplayStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DisplayStatus::Signed => "SIGNED",
            DisplayStatus::Expired => "EXPIRED",
            DisplayStatus::NeverSigned => "NEVER SIGNED",
            DisplayStatus::Raw(status) => status.as_str(),
        }
    }
}

impl fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── KeyRecord ───────────────────────────────────────────────────────────────

/// One signed-key slot returned by a status call.
///
/// Everything but `status` stays in `extra` verbatim, `expiration` included,
/// so the printed record shows exactly what the server sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyRecord {
    pub status: KeyStatus,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl KeyRecord {
    pub const EXPIRATION_FIELD: &'static str = "expiration";

    /// Raw expiration timestamp, when the server sent one as a string.
    pub fn expiration(&self) -> Option<&str> {
        self.extra.get(Self::EXPIRATION_FIELD).and_then(Value::as_str)
    }

    /// The record as printed: server fields plus `status` replaced by the
    /// display status.
    pub fn into_display_value(self, display: &DisplayStatus) -> Value {
        let mut map = self.extra;
        map.insert("status".to_string(), Value::String(display.to_string()));
        Value::Object(map)
    }
}

// ─── Certificate ─────────────────────────────────────────────────────────────

/// Signed certificate text returned by `POST /client`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate(String);

impl Certificate {
    /// Accept `body` as a certificate when it carries a known key-type prefix.
    pub fn from_response(body: &str) -> Option<Self> {
        wire::has_certificate_prefix(body).then(|| Self(body.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_status_serde() {
        let status: KeyStatus = serde_json::from_str("\"ACTIVE\"").unwrap();
        assert_eq!(status, KeyStatus::Active);
        let status: KeyStatus = serde_json::from_str("\"SUSPENDED\"").unwrap();
        assert_eq!(status, KeyStatus::Other("SUSPENDED".to_string()));
        assert_eq!(serde_json::to_string(&KeyStatus::Revoked).unwrap(), "\"REVOKED\"");
    }

    #[test]
    fn test_record_keeps_extra_fields() {
        let json = r#"{"status": "PENDING", "expiration": "2030-01-01 00:00:00", "realname": "alice@example.org", "ssh_key_hash": "SHA512:abc"}"#;
        let record: KeyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.status, KeyStatus::Pending);
        assert_eq!(record.extra.len(), 3);
        assert_eq!(record.expiration(), Some("2030-01-01 00:00:00"));

        let value = record.into_display_value(&DisplayStatus::Raw(KeyStatus::Pending));
        assert_eq!(value["status"], "PENDING");
        assert_eq!(value["realname"], "alice@example.org");
        assert_eq!(value["expiration"], "2030-01-01 00:00:00");
    }

    #[test]
    fn test_certificate_prefix() {
        assert!(Certificate::from_response("ssh-ed25519-cert-v01@openssh.com AAAA user").is_some());
        assert!(Certificate::from_response("ecdsa-sha2-nistp256-cert-v01@openssh.com AAAA").is_some());
        assert!(Certificate::from_response("Error: key not authorized").is_none());
    }
}
