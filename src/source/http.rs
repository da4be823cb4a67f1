//! HTTP transport used by the acquisition stages.
//!
//! The stages talk to the network only through the [`Transport`] trait so
//! that the fallback policy can be tested without a server.  [`HttpTransport`]
//! is the real implementation, a thin wrapper around a blocking
//! [`reqwest::blocking::Client`].

use std::time::Duration;

use super::FetchError;

/// Desktop Chrome identification sent by the fallback stage.
///
/// Some news endpoints reject or redirect requests that arrive without a
/// browser-looking `User-Agent`.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// A single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpGet {
    pub url: String,
    /// `None` sends no `User-Agent` header at all.
    pub user_agent: Option<String>,
    pub timeout: Duration,
}

/// Status and raw body of a completed request.
///
/// The body is kept as bytes so the parser sees exactly what the server
/// sent, including the XML encoding declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can perform a blocking GET.
///
/// Implementations report network-level failures as [`FetchError`]; a
/// response with an error status is still `Ok` and left to the caller.
pub trait Transport: Send + Sync {
    fn get(&self, request: &HttpGet) -> Result<HttpResponse, FetchError>;
}

/// [`Transport`] backed by reqwest.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, FetchError> {
        // No default User-Agent: the primary stage must go out bare, and the
        // fallback sets its own per request.
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &HttpGet) -> Result<HttpResponse, FetchError> {
        let mut builder = self.client.get(&request.url).timeout(request.timeout);
        if let Some(ua) = &request.user_agent {
            builder = builder.header(reqwest::header::USER_AGENT, ua);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.bytes()?.to_vec();

        tracing::debug!(url = %request.url, status, bytes = body.len(), "GET complete");
        Ok(HttpResponse { status, body })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
