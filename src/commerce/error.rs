//! Commerce client errors.

use thiserror::Error;

/// Failure of a single storefront or admin call.
///
/// The public client methods swallow these (logging them) and return
/// `None` or an empty list; the `try_*` variants expose them.
#[derive(Debug, Error)]
pub enum CommerceError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("GraphQL error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("unexpected response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl CommerceError {
    /// Message including every `source()` in the chain.
    pub fn chain(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(err) = source {
            message.push_str(": ");
            message.push_str(&err.to_string());
            source = err.source();
        }
        message
    }
}
