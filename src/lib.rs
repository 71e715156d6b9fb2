//! # CASSH client
//!
//! Command-line client library for the CASSH SSH certificate authority:
//! register and sign the user's public key, inspect key status, fetch the CA
//! key and revocation list, and administer other users' keys and principals.
//!
//! ## Architecture
//!
//! 1. **Core**: Settings, key records, status interpretation, admin actions
//!    (pure, no I/O beyond reading settings and key files)
//! 2. **Credentials**: Payload assembly + the password prompt boundary
//! 3. **HTTP**: The `Transport` seam and its reqwest implementation
//! 4. **High-Level Client**: `CasshClient` with `keys()` / `admin()` sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cassh::prelude::*;
//!
//! let settings = UserSettings::load(&UserSettings::default_path()?)?;
//! let client = CasshClient::builder(settings).build()?;
//!
//! let report = client.keys().status().await?;
//! println!("{}", report.render());
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Validated user settings.
pub mod config;

/// Domain modules (vertical slices): types, wire contract, sub-clients.
pub mod domain;

/// Unified error types.
pub mod error;

/// Client identity and transport defaults.
pub mod network;

/// Shared helpers.
pub mod shared;

// ── Layer 2: Credentials ─────────────────────────────────────────────────────

/// Payload assembly and password prompting.
pub mod auth;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// Transport trait and reqwest client.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// `CasshClient`, the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Settings
    pub use crate::config::{AuthMode, UserSettings};

    // Domain types: key
    pub use crate::domain::key::client::{SignOptions, SignOutcome};
    pub use crate::domain::key::status::StatusReport;
    pub use crate::domain::key::{Certificate, DisplayStatus, KeyRecord, KeyStatus};

    // Domain types: admin
    pub use crate::domain::admin::client::AdminOutcome;
    pub use crate::domain::admin::{
        AdminAction, AdminOptions, AdminVerb, PrincipalEdit, RawField, Username,
    };

    // Errors
    pub use crate::error::{CasshError, ConfigError, HttpError, KeyFileError, ValidationError};

    // Credentials
    pub use crate::auth::{Password, PasswordPrompt, Payload, StaticPassword, TerminalPrompt};

    // HTTP client + sub-clients
    pub use crate::client::{AdminClient, CasshClient, CasshClientBuilder, KeysClient};
    pub use crate::http::{ApiRequest, ApiResponse, CasshHttp, Method, Transport};
}
