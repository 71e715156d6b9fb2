//! High-level client: `CasshClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the shared settings and the accessors.

use crate::auth::{CredentialBuilder, PasswordPrompt, TerminalPrompt};
use crate::config::UserSettings;
use crate::domain::admin::client::Admin;
use crate::domain::key::client::Keys;
use crate::error::CasshError;
use crate::http::{CasshHttp, Transport};

use chrono::{Local, NaiveDateTime};

// Re-export sub-client types for convenience.
pub use crate::domain::admin::client::Admin as AdminClient;
pub use crate::domain::key::client::Keys as KeysClient;

/// Reference clock for status interpretation.
pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

/// The primary entry point.
///
/// `client.keys()` works on the caller's own key, `client.admin()` on other
/// users' records.
pub struct CasshClient<T: Transport = CasshHttp> {
    settings: UserSettings,
    transport: T,
    prompt: Box<dyn PasswordPrompt>,
    clock: Clock,
}

impl CasshClient<CasshHttp> {
    pub fn builder(settings: UserSettings) -> CasshClientBuilder {
        CasshClientBuilder::new(settings)
    }
}

impl<T: Transport> CasshClient<T> {
    /// Client over an arbitrary transport.
    pub fn with_transport(
        settings: UserSettings,
        transport: T,
        prompt: impl PasswordPrompt + 'static,
    ) -> Self {
        Self {
            settings,
            transport,
            prompt: Box::new(prompt),
            clock: Box::new(local_now),
        }
    }

    /// Replace the reference clock.
    pub fn with_clock(mut self, clock: impl Fn() -> NaiveDateTime + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn keys(&self) -> Keys<'_, T> {
        Keys { client: self }
    }

    pub fn admin(&self) -> Admin<'_, T> {
        Admin { client: self }
    }

    // ── Shared state ─────────────────────────────────────────────────────

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn credentials(&self) -> CredentialBuilder<'_> {
        CredentialBuilder::new(&self.settings, self.prompt.as_ref())
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }
}

/// Expirations are naive server-local timestamps; compare on local time.
fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct CasshClientBuilder {
    settings: UserSettings,
    prompt: Box<dyn PasswordPrompt>,
}

impl CasshClientBuilder {
    fn new(settings: UserSettings) -> Self {
        Self {
            settings,
            prompt: Box::new(TerminalPrompt),
        }
    }

    /// Replace the terminal password prompt.
    pub fn prompt(mut self, prompt: impl PasswordPrompt + 'static) -> Self {
        self.prompt = Box::new(prompt);
        self
    }

    pub fn build(self) -> Result<CasshClient<CasshHttp>, CasshError> {
        let transport = CasshHttp::new(&self.settings)?;
        Ok(CasshClient {
            settings: self.settings,
            transport,
            prompt: self.prompt,
            clock: Box::new(local_now),
        })
    }
}
