//! Error types for the REST Countries client.
//!
//! `NotFound` gets its own variant because callers distinguish "the lookup
//! returned nothing" from "the call itself failed". Every other failure carries
//! the URL that was requested so it can be logged as-is.

use thiserror::Error;

/// Errors returned by [`crate::api::CountrySource`] implementations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("request to {url} failed with HTTP {status}")]
    Status { url: String, status: u16 },

    /// The request could not be completed (DNS, connect, TLS, reset, ...).
    #[error("network error while requesting {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not the JSON we expected.
    #[error("could not decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Zero results where at least one was expected.
    #[error("no country matches \"{query}\"")]
    NotFound { query: String },
}

impl FetchError {
    /// True for the "zero results" condition, false for transport/HTTP failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
