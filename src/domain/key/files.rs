//! Local key material: reading the public key, installing a signed pair.
//!
//! Installation is not atomic. A failure after the copy leaves the signed
//! private key in place without its certificate.

use super::Certificate;
use crate::config::UserSettings;
use crate::error::{CasshError, KeyFileError};

use std::fs;
use std::path::PathBuf;

/// Mode of the signed private key copy.
#[cfg(unix)]
pub const SIGNED_KEY_MODE: u32 = 0o600;

pub struct KeyFiles<'a> {
    settings: &'a UserSettings,
}

impl<'a> KeyFiles<'a> {
    pub fn new(settings: &'a UserSettings) -> Self {
        Self { settings }
    }

    /// Contents of `{key_path}.pub`.
    pub fn read_public_key(&self) -> Result<String, CasshError> {
        let path = self.settings.require_public_key()?;
        fs::read_to_string(&path)
            .map_err(|source| KeyFileError::Read { path, source }.into())
    }

    /// Copy the private key to `key_signed_path` (owner read/write only) and
    /// write the certificate next to it. Returns the certificate path.
    pub fn install_signed(&self, certificate: &Certificate) -> Result<PathBuf, CasshError> {
        let private_key = self.settings.require_private_key()?;
        let signed_key = self.settings.key_signed_path.clone();
        let certificate_path = self.settings.certificate_path();

        fs::copy(&private_key, &signed_key).map_err(|source| KeyFileError::Copy {
            from: private_key.clone(),
            to: signed_key.clone(),
            source,
        })?;
        restrict_permissions(&signed_key)?;

        fs::write(&certificate_path, certificate.as_str()).map_err(|source| {
            KeyFileError::Write {
                path: certificate_path.clone(),
                source,
            }
        })?;

        tracing::info!(
            key = %signed_key.display(),
            certificate = %certificate_path.display(),
            "Installed signed key"
        );
        Ok(certificate_path)
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &std::path::Path) -> Result<(), KeyFileError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(SIGNED_KEY_MODE)).map_err(|source| {
        KeyFileError::Permissions {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &std::path::Path) -> Result<(), KeyFileError> {
    Ok(())
}
