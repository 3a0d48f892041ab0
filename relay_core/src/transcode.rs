//! The streaming transcoder: upstream NDJSON events in, ordered audio out.
//!
//! One relay drives one session. Lines are classified into a tagged event,
//! audio payloads are base64-decoded and forwarded over a bounded channel,
//! and exactly one terminal transition ends the stream.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::RelayError;

/// Terminator the provider sends after the final audio line.
pub const SUCCESS_CODE: i64 = 20_000_000;

/// Capacity of the chunk channel between the relay and the responder. One
/// line in flight keeps caller backpressure coupled to the upstream read.
pub const CHUNK_CHANNEL_CAPACITY: usize = 1;

/// One parsed line of the upstream event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamEvent {
    AudioPayload { data: String },
    StreamComplete { code: i64 },
    StreamError { code: i64, message: String },
    Unparsable { raw: String },
}

#[derive(Deserialize)]
struct RawLine {
    code: Option<i64>,
    data: Option<String>,
    message: Option<String>,
}

/// Classifies one non-blank line.
///
/// Exhaustive over the status code so an unexpected provider code lands in a
/// named branch instead of being silently relayed as audio.
pub fn classify(line: &str) -> UpstreamEvent {
    let raw: RawLine = match serde_json::from_str(line) {
        Ok(raw) => raw,
        Err(_) => {
            return UpstreamEvent::Unparsable {
                raw: line.to_string(),
            }
        }
    };

    let Some(code) = raw.code else {
        return UpstreamEvent::Unparsable {
            raw: line.to_string(),
        };
    };

    match code {
        0 => match raw.data {
            Some(data) if !data.is_empty() => UpstreamEvent::AudioPayload { data },
            // code 0 without audio carries nothing to relay.
            _ => UpstreamEvent::Unparsable {
                raw: line.to_string(),
            },
        },
        SUCCESS_CODE => UpstreamEvent::StreamComplete { code },
        code if code > 0 => UpstreamEvent::StreamError {
            code,
            message: raw.message.unwrap_or_default(),
        },
        _ => UpstreamEvent::Unparsable {
            raw: line.to_string(),
        },
    }
}

/// How a relay ended. Mid-stream conditions are outcomes, not errors: the
/// caller response has already started and only a clean end is possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamOutcome {
    /// Upstream sent the success terminator.
    Done,
    /// Upstream reported an error mid-stream; the caller sees a truncated
    /// but well-framed stream. Never retried.
    Failed { code: i64, message: String },
    /// Transport failure, premature close, or corrupt payload.
    Aborted { reason: String },
    /// The caller went away. A cancellation signal, not an error.
    Disconnected,
}

/// Drives one session to its terminal state.
///
/// Chunks are emitted in arrival order, one line in flight. The line stream
/// (and with it the upstream connection) is owned here and dropped on every
/// return path, so the session closes exactly once.
pub async fn relay<S>(lines: S, tx: mpsc::Sender<Bytes>) -> StreamOutcome
where
    S: Stream<Item = Result<String, RelayError>>,
{
    tokio::pin!(lines);

    while let Some(next) = lines.next().await {
        let line = match next {
            Ok(line) => line,
            Err(e) => {
                return StreamOutcome::Aborted {
                    reason: e.to_string(),
                }
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match classify(&line) {
            UpstreamEvent::AudioPayload { data } => match BASE64.decode(data.as_bytes()) {
                Ok(audio) => {
                    if tx.send(Bytes::from(audio)).await.is_err() {
                        return StreamOutcome::Disconnected;
                    }
                }
                // Corruption, not noise: stop rather than relay garbage audio.
                Err(e) => {
                    let err = RelayError::from(e);
                    return StreamOutcome::Aborted {
                        reason: err.to_string(),
                    };
                }
            },
            UpstreamEvent::StreamComplete { .. } => return StreamOutcome::Done,
            UpstreamEvent::StreamError { code, message } => {
                return StreamOutcome::Failed { code, message }
            }
            UpstreamEvent::Unparsable { raw } => {
                debug!(line = %raw, "ignoring unparsable upstream line");
            }
        }
    }

    StreamOutcome::Aborted {
        reason: "upstream closed before completion".to_string(),
    }
}
