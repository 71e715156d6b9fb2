//! Credentials: request payload assembly and the password boundary.
//!
//! ## Security Model
//!
//! - The password is prompted fresh for every request that needs it. It is
//!   never cached on the client and never written to logs.
//! - [`Password`] and [`Payload`] redact the secret in their `Debug` output,
//!   so `tracing` fields and error chains cannot leak it.
//! - Payload assembly ([`build_payload`]) is pure; the interactive read lives
//!   behind the [`PasswordPrompt`] trait.

pub mod prompt;

pub use prompt::{PasswordPrompt, StaticPassword, TerminalPrompt};

use crate::config::{AuthMode, UserSettings};
use crate::error::CasshError;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Form field carrying the LDAP password.
pub const PASSWORD_FIELD: &str = "password";

/// Form field carrying the LDAP realname.
pub const REALNAME_FIELD: &str = "realname";

// ─── Password ────────────────────────────────────────────────────────────────

/// A password read from the prompt.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

// ─── Payload ─────────────────────────────────────────────────────────────────

/// Form fields sent as an `application/x-www-form-urlencoded` body.
///
/// Field order is sorted, which keeps encoded bodies deterministic.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, String>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Merge `other` into `self`; fields from `other` win.
    pub fn merge(&mut self, other: Payload) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (field, value) in &self.0 {
            if field == PASSWORD_FIELD {
                map.entry(field, &"***");
            } else {
                map.entry(field, value);
            }
        }
        map.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ─── Assembly ────────────────────────────────────────────────────────────────

/// Assemble the body for one request.
///
/// Starts empty, adds `password` when LDAP is enabled and one was supplied,
/// adds `realname` in LDAP mode, then merges `extra` last so action fields
/// win on collision.
pub fn build_payload(settings: &UserSettings, password: Option<Password>, extra: Payload) -> Payload {
    let mut payload = Payload::new();
    if settings.ldap_enabled {
        if let Some(password) = password {
            payload.insert(PASSWORD_FIELD, password.0);
        }
    }
    if settings.auth_mode == AuthMode::Ldap {
        if let Some(realname) = &settings.realname {
            payload.insert(REALNAME_FIELD, realname.clone());
        }
    }
    payload.merge(extra);
    payload
}

/// Builds request payloads, prompting once per call when LDAP is enabled.
pub struct CredentialBuilder<'a> {
    settings: &'a UserSettings,
    prompt: &'a dyn PasswordPrompt,
}

impl<'a> CredentialBuilder<'a> {
    pub fn new(settings: &'a UserSettings, prompt: &'a dyn PasswordPrompt) -> Self {
        Self { settings, prompt }
    }

    pub fn build(&self, extra: Payload) -> Result<Payload, CasshError> {
        let password = if self.settings.ldap_enabled {
            Some(
                self.prompt
                    .read_password(self.settings.login_label())
                    .map_err(CasshError::Prompt)?,
            )
        } else {
            None
        };
        Ok(build_payload(self.settings, password, extra))
    }
}
