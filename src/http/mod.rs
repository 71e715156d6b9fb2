//! HTTP layer: request description, the [`Transport`] seam, and the
//! reqwest-backed [`CasshHttp`].

pub mod client;

pub use client::CasshHttp;

use crate::auth::Payload;
use crate::error::HttpError;

// ─── Method ──────────────────────────────────────────────────────────────────

/// HTTP verbs used by the CA API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

// ─── Request / Response ──────────────────────────────────────────────────────

/// One call against the CA: verb, path relative to the base URL, optional
/// form body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub form: Option<Payload>,
}

impl ApiRequest {
    /// Body-less GET.
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            form: None,
        }
    }

    pub fn with_form(method: Method, path: impl Into<String>, form: Payload) -> Self {
        Self {
            method,
            path: path.into(),
            form: Some(form),
        }
    }
}

/// Raw server answer. The body is surfaced whatever the status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

// ─── Transport ───────────────────────────────────────────────────────────────

/// Executes requests against the configured server.
///
/// Implementations must not retry: a failed call is reported once and the
/// caller decides what to do.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Base URL every path is resolved against.
    fn base_url(&self) -> &str;

    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, HttpError>;
}
