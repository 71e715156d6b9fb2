//! Low-level HTTP client: `CasshHttp`.
//!
//! Built once per run from [`UserSettings`]; carries the timeout, the TLS
//! verification policy and the client identification headers.

use crate::config::UserSettings;
use crate::error::HttpError;
use crate::http::{ApiRequest, ApiResponse, Transport};
use crate::network::{self, CLIENT_VERSION, VERSION_HEADER};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;

/// reqwest-backed [`Transport`].
#[derive(Clone)]
pub struct CasshHttp {
    base_url: String,
    client: Client,
}

impl CasshHttp {
    pub fn new(settings: &UserSettings) -> Result<Self, HttpError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(VERSION_HEADER),
            HeaderValue::from_static(CLIENT_VERSION),
        );

        let client = Client::builder()
            .user_agent(network::user_agent())
            .default_headers(headers)
            .timeout(settings.timeout)
            .danger_accept_invalid_certs(!settings.verify_tls)
            .build()
            .map_err(HttpError::Client)?;

        if !settings.verify_tls {
            tracing::warn!("TLS certificate verification is disabled");
        }

        Ok(Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Absolute URL plus form-urlencoded body, when the request has one.
    fn prepare(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, request.path);
        let req = self.client.request(request.method.into(), url);
        match &request.form {
            Some(form) => req.form(form),
            None => req,
        }
    }

    fn classify(&self, err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout {
                url: self.base_url.clone(),
            }
        } else {
            HttpError::Transport {
                url: self.base_url.clone(),
                reason: err.to_string(),
            }
        }
    }
}

impl Transport for CasshHttp {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError> {
        tracing::debug!(method = %request.method, path = %request.path, "Sending request");

        let resp = self
            .prepare(&request)
            .send()
            .await
            .map_err(|e| self.classify(e))?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| self.classify(e))?;
        tracing::debug!(status, bytes = body.len(), "Received response");

        Ok(ApiResponse { status, body })
    }
}
