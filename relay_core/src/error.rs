use thiserror::Error;

/// Errors produced while preparing or opening a synthesis relay.
///
/// Conditions that occur after the caller response has started are not
/// errors here; they end the stream as a [`crate::StreamOutcome`] instead.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Upstream connection failed: {0}")]
    Connection(String),

    #[error("Corrupt audio payload: {0}")]
    PayloadDecode(#[from] base64::DecodeError),

    #[error("Upstream error {code}: {message}")]
    UpstreamReported { code: i64, message: String },
}
