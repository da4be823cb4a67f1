//! Error taxonomy for feed acquisition.
//!
//! Errors raised by the network or the parser never escape as panics or
//! early returns from the acquisition path.  They are captured as values:
//!
//! * [`FetchError`]: a transport failure (timeout, DNS, refused
//!   connection, non-2xx status).  Stored inside
//!   [`RawParseResult::Failed`](super::RawParseResult::Failed).
//! * [`ParseError`]: the payload could not be read as RSS/Atom.  Stored in
//!   [`ParsedFeed::malformed`](super::ParsedFeed::malformed); not fatal.
//! * [`AcquisitionError`]: the terminal, user-visible failure produced by
//!   the normaliser when no usable feed was obtained.

use thiserror::Error;

/// A network-level failure captured as data.
///
/// Holds rendered messages rather than the underlying [`reqwest::Error`] so
/// the value can be cloned out of the cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("server returned HTTP {code}")]
    Status { code: u16 },

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Short, stable label for the failure category.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Timeout(_) => "timeout",
            FetchError::Connect(_) => "connect",
            FetchError::Status { .. } => "status",
            FetchError::Body(_) => "body",
            FetchError::Request(_) => "request",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display omits the root cause ("error sending request"),
        // so walk the chain to keep the useful part of the message.
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        if err.is_timeout() {
            FetchError::Timeout(message)
        } else if err.is_connect() {
            FetchError::Connect(message)
        } else if let Some(status) = err.status() {
            FetchError::Status {
                code: status.as_u16(),
            }
        } else if err.is_body() || err.is_decode() {
            FetchError::Body(message)
        } else {
            FetchError::Request(message)
        }
    }
}

/// The feed parser rejected (part of) the payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed feed: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// No usable feed could be obtained from either stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no usable feed: {source}")]
pub struct AcquisitionError {
    #[source]
    pub source: FetchError,
}

impl AcquisitionError {
    /// Category of the error that ended the acquisition.
    pub fn kind(&self) -> &'static str {
        self.source.kind()
    }

    /// The original error's message.
    pub fn message(&self) -> String {
        self.source.to_string()
    }
}
