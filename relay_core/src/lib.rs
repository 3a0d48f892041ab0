//! Core of the streaming text-to-speech relay.
//!
//! The pipeline per inbound request: [`normalize`] maps the caller request
//! onto the provider schema, [`UpstreamClient::open`] starts the streaming
//! synthesis call, and [`relay`] transcodes the provider's NDJSON event
//! stream into ordered audio chunks. No state is shared between requests.

mod error;
mod normalize;
mod transcode;
mod upstream;
pub mod voices;

pub use error::RelayError;
pub use normalize::{normalize, SynthesisRequest, UpstreamPayload, DEFAULT_VOICE};
pub use transcode::{
    classify, relay, StreamOutcome, UpstreamEvent, CHUNK_CHANNEL_CAPACITY, SUCCESS_CODE,
};
pub use upstream::{Credentials, UpstreamClient, UpstreamSession, SYNTH_ENDPOINT};
