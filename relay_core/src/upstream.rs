//! Upstream session client: one outbound streaming POST per inbound request.

use async_stream::try_stream;
use futures::{Stream, StreamExt};

use crate::error::RelayError;
use crate::normalize::UpstreamPayload;

/// The provider's unidirectional streaming synthesis endpoint.
pub const SYNTH_ENDPOINT: &str =
    "https://voice.ap-southeast-1.bytepluses.com/api/v3/tts/unidirectional";

/// Fixed application key from the provider docs; not caller-controlled.
const APP_KEY: &str = "aGjiRDfUWi";

/// Upper bound on buffered bytes while waiting for a newline. A healthy
/// upstream sends a line every few KiB; anything past this is not NDJSON.
const MAX_LINE_BUFFER: usize = 1024 * 1024;

/// Provider credentials, either caller-supplied or deployment defaults.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub app_id: String,
    pub access_token: String,
    pub resource_id: String,
}

/// Shared HTTP client for opening synthesis sessions.
pub struct UpstreamClient {
    http: reqwest::Client,
    endpoint: String,
}

impl UpstreamClient {
    pub fn new() -> Self {
        Self::with_endpoint(SYNTH_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Opens the streaming synthesis call.
    ///
    /// Everything that can fail here fails before any caller bytes exist, so
    /// it surfaces as a connection error rather than a truncated stream.
    pub async fn open(
        &self,
        payload: &UpstreamPayload,
        creds: &Credentials,
    ) -> Result<UpstreamSession, RelayError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Api-App-Id", creds.app_id.as_str())
            .header("X-Api-Access-Key", creds.access_token.as_str())
            .header("X-Api-Resource-Id", creds.resource_id.as_str())
            .header("X-Api-App-Key", APP_KEY)
            .header("Content-Type", "application/json")
            .header("Connection", "keep-alive")
            .json(payload)
            .send()
            .await
            .map_err(|e| RelayError::Connection(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::Connection(format!(
                "upstream returned {status}: {body}"
            )));
        }

        Ok(UpstreamSession { response })
    }
}

impl Default for UpstreamClient {
    fn default() -> Self {
        Self::new()
    }
}

/// An open synthesis session. The session owns the connection; dropping the
/// line stream closes it, which is the single release point on every path.
#[derive(Debug)]
pub struct UpstreamSession {
    response: reqwest::Response,
}

impl UpstreamSession {
    /// Splits the response body into NDJSON lines as they arrive.
    pub fn into_lines(self) -> impl Stream<Item = Result<String, RelayError>> {
        try_stream! {
            let mut body = self.response.bytes_stream();
            let mut buffer: Vec<u8> = Vec::new();

            while let Some(chunk) = body.next().await {
                let bytes = chunk
                    .map_err(|e| RelayError::Connection(format!("upstream read failed: {e}")))?;
                buffer.extend_from_slice(&bytes);

                if buffer.len() > MAX_LINE_BUFFER {
                    Err::<(), _>(RelayError::Connection(format!(
                        "upstream sent {} bytes without a line break",
                        buffer.len()
                    )))?;
                }

                while let Some(pos) = buffer.iter().position(|&b| b == b'\n') {
                    let raw: Vec<u8> = buffer.drain(..=pos).collect();
                    let line = String::from_utf8_lossy(&raw);
                    yield line.trim_end_matches(['\r', '\n']).to_string();
                }
            }

            // Trailing partial line at EOF.
            if !buffer.is_empty() {
                yield String::from_utf8_lossy(&buffer).to_string();
            }
        }
    }
}
