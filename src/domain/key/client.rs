//! Keys sub-client: add, sign, status, CA and KRL for the current user.

use super::files::KeyFiles;
use super::status::StatusReport;
use super::{wire, Certificate};
use crate::auth::Payload;
use crate::client::CasshClient;
use crate::error::CasshError;
use crate::http::Transport;

use std::path::PathBuf;

/// Options of `cassh sign`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignOptions {
    /// Print the certificate instead of installing it.
    pub display_only: bool,
    /// Ask the server to override its checks (`admin_force=true`).
    pub force: bool,
}

/// Result of a successful signing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignOutcome {
    /// Signed pair installed; holds the certificate path.
    Installed(PathBuf),
    /// Display-only mode: nothing written.
    Displayed(Certificate),
}

pub struct Keys<'a, T: Transport> {
    pub(crate) client: &'a CasshClient<T>,
}

impl<'a, T: Transport> Keys<'a, T> {
    /// Register the public key. The server's answer is returned verbatim.
    pub async fn add(&self) -> Result<String, CasshError> {
        let settings = self.client.settings();
        let pubkey = KeyFiles::new(settings).read_public_key()?;
        let payload = self
            .client
            .credentials()
            .build(wire::key_fields(&pubkey, &settings.name, false))?;

        let response = self.client.transport().send(wire::add_request(payload)).await?;
        Ok(response.body)
    }

    /// Request a certificate for the public key.
    ///
    /// A body without a known certificate prefix is a rejection; nothing is
    /// written in that case and the call is not retried.
    pub async fn sign(&self, options: SignOptions) -> Result<SignOutcome, CasshError> {
        let settings = self.client.settings();
        let files = KeyFiles::new(settings);
        let pubkey = files.read_public_key()?;
        if !options.display_only {
            settings.require_private_key()?;
        }

        let payload = self
            .client
            .credentials()
            .build(wire::key_fields(&pubkey, &settings.name, options.force))?;
        let response = self.client.transport().send(wire::sign_request(payload)).await?;

        let certificate = Certificate::from_response(&response.body).ok_or_else(|| {
            CasshError::SignRejected {
                body: response.body.clone(),
            }
        })?;

        if options.display_only {
            return Ok(SignOutcome::Displayed(certificate));
        }
        let path = files.install_signed(&certificate)?;
        Ok(SignOutcome::Installed(path))
    }

    /// Signing/expiration state of the user's keys.
    pub async fn status(&self) -> Result<StatusReport, CasshError> {
        let payload = self.client.credentials().build(Payload::new())?;
        let response = self
            .client
            .transport()
            .send(wire::status_request(payload))
            .await?;
        Ok(StatusReport::from_body(&response.body, self.client.now()))
    }

    /// CA public key text.
    pub async fn ca(&self) -> Result<String, CasshError> {
        let response = self.client.transport().send(wire::ca_request()).await?;
        Ok(response.body)
    }

    /// Key revocation list text.
    pub async fn krl(&self) -> Result<String, CasshError> {
        let response = self.client.transport().send(wire::krl_request()).await?;
        Ok(response.body)
    }
}
