//! Wire contract for the user's own key endpoints.
//!
//! | action | verb | path             | extra fields                          |
//! |--------|------|------------------|---------------------------------------|
//! | add    | PUT  | `/client`        | `pubkey`, `username`                  |
//! | sign   | POST | `/client`        | `pubkey`, `username`, `admin_force`?  |
//! | status | POST | `/client/status` |                                       |
//! | ca     | GET  | `/ca`            |                                       |
//! | krl    | GET  | `/krl`           |                                       |

use crate::auth::Payload;
use crate::http::{ApiRequest, Method};

pub const CLIENT_PATH: &str = "/client";
pub const STATUS_PATH: &str = "/client/status";
pub const CA_PATH: &str = "/ca";
pub const KRL_PATH: &str = "/krl";

pub const PUBKEY_FIELD: &str = "pubkey";
pub const USERNAME_FIELD: &str = "username";
pub const FORCE_FIELD: &str = "admin_force";

/// Substrings marking a successful signing response.
///
/// Matched anywhere in the body, not only at the start.
pub const CERTIFICATE_PREFIXES: [&str; 2] = ["ssh-", "ecdsa-"];

pub fn has_certificate_prefix(body: &str) -> bool {
    CERTIFICATE_PREFIXES.iter().any(|prefix| body.contains(prefix))
}

/// Fields identifying the key being added or signed.
pub fn key_fields(pubkey: &str, username: &str, force: bool) -> Payload {
    let fields = Payload::new()
        .with(PUBKEY_FIELD, pubkey)
        .with(USERNAME_FIELD, username);
    if force {
        fields.with(FORCE_FIELD, "true")
    } else {
        fields
    }
}

pub fn add_request(payload: Payload) -> ApiRequest {
    ApiRequest::with_form(Method::Put, CLIENT_PATH, payload)
}

pub fn sign_request(payload: Payload) -> ApiRequest {
    ApiRequest::with_form(Method::Post, CLIENT_PATH, payload)
}

pub fn status_request(payload: Payload) -> ApiRequest {
    ApiRequest::with_form(Method::Post, STATUS_PATH, payload)
}

pub fn ca_request() -> ApiRequest {
    ApiRequest::get(CA_PATH)
}

pub fn krl_request() -> ApiRequest {
    ApiRequest::get(KRL_PATH)
}
