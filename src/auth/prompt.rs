//! Interactive password boundary.

use super::Password;
use std::io;

/// Source of the LDAP password.
///
/// Called once per request; implementations must not cache the answer.
pub trait PasswordPrompt {
    fn read_password(&self, login: &str) -> io::Result<Password>;
}

/// Reads the password from the controlling terminal without echo.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl PasswordPrompt for TerminalPrompt {
    fn read_password(&self, login: &str) -> io::Result<Password> {
        let prompt = format!("Please type your LDAP password (user: {}): ", login);
        rpassword::prompt_password(prompt).map(Password::new)
    }
}

/// Fixed password, for non-interactive callers.
#[derive(Debug, Clone)]
pub struct StaticPassword(Password);

impl StaticPassword {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(Password::new(secret))
    }
}

impl PasswordPrompt for StaticPassword {
    fn read_password(&self, _login: &str) -> io::Result<Password> {
        Ok(self.0.clone())
    }
}
