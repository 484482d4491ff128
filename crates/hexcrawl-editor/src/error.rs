//! Error types for the editor client.
//!
//! Uses `thiserror` for typed errors that surface through the whole
//! action pipeline: config loading, backend calls, snapshot decoding and
//! command parsing.
//!
//! No variant carries an HTTP status. Status codes are logged but never
//! turned into errors, so a refused mutation looks like a successful one
//! followed by an unchanged snapshot.

/// Errors that can occur while running the editor.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The request never produced a response (connection refused, reset,
    /// DNS failure, ...).
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body was not the JSON the caller expected.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration is invalid or missing.
    #[error("config error: {0}")]
    Config(String),

    /// An operator command could not be parsed.
    #[error("command error: {0}")]
    Command(String),

    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure while building a request body.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
