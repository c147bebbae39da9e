//! CLI error types.

use thiserror::Error;

/// Errors surfaced by `esctl` commands.
///
/// Every variant is fatal for the invocation: the binary prints the message
/// to stderr and exits non-zero without printing a partial table.
#[derive(Debug, Error)]
pub enum CliError {
    /// The requested entity kind is not one of the supported tokens.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Cluster connection or transport failure.
    #[error("connection error: {0}")]
    Connection(String),

    /// The cluster answered with a non-success HTTP status.
    #[error("request to {url} failed with status {status}: {body}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Response body as returned by the cluster.
        body: String,
    },

    /// The response payload could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// A shard record carries a shard number that is not an integer.
    #[error("failed to parse shard number '{value}' of index '{index}'")]
    InvalidShardNumber {
        /// Index the shard belongs to.
        index: String,
        /// Raw shard field.
        value: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for CliError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Connection(err.to_string())
        }
    }
}
