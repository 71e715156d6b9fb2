//! Admin sub-client: key lifecycle and principals of other users.

use super::{wire, AdminAction, Username};
use crate::client::CasshClient;
use crate::domain::key::status::StatusReport;
use crate::error::CasshError;
use crate::http::Transport;

/// Result of an admin call.
#[derive(Debug, Clone, PartialEq)]
pub enum AdminOutcome {
    /// Server answer, shown verbatim.
    Text(String),
    /// Interpreted answer of a `status` call.
    Status(StatusReport),
}

impl AdminOutcome {
    pub fn render(&self) -> String {
        match self {
            AdminOutcome::Text(body) => body.clone(),
            AdminOutcome::Status(report) => report.render(),
        }
    }
}

/// Sub-client for admin operations.
pub struct Admin<'a, T: Transport> {
    pub(crate) client: &'a CasshClient<T>,
}

impl<'a, T: Transport> Admin<'a, T> {
    /// Run `action` against `username`.
    pub async fn run(
        &self,
        username: &Username,
        action: &AdminAction,
    ) -> Result<AdminOutcome, CasshError> {
        let payload = self.client.credentials().build(wire::extra_fields(action))?;
        let request = wire::request(username, action, payload);
        tracing::debug!(user = %username, method = %request.method, path = %request.path, "Admin request");

        let response = self.client.transport().send(request).await?;
        match action {
            AdminAction::Status => Ok(AdminOutcome::Status(StatusReport::from_body(
                &response.body,
                self.client.now(),
            ))),
            _ => Ok(AdminOutcome::Text(response.body)),
        }
    }

    pub async fn status(&self, username: &Username) -> Result<StatusReport, CasshError> {
        match self.run(username, &AdminAction::Status).await? {
            AdminOutcome::Status(report) => Ok(report),
            AdminOutcome::Text(body) => Ok(StatusReport::Raw(body)),
        }
    }
}
