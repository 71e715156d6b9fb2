//! Client identity and transport defaults.

/// Name announced to the server in the `User-Agent` header.
pub const CLIENT_NAME: &str = "CASSH-CLIENT";

/// Protocol version announced to the server.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Header carrying [`CLIENT_VERSION`] on every request.
pub const VERSION_HEADER: &str = "client_version";

/// Per-request timeout when the settings do not name one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 2;

pub fn user_agent() -> String {
    format!("{} v{}", CLIENT_NAME, CLIENT_VERSION)
}
