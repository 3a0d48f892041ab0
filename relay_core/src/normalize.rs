//! Caller-facing request model and its mapping onto the provider schema.

use serde::{Deserialize, Serialize, Serializer};

use crate::error::RelayError;

/// Voice used when the caller does not pick one.
pub const DEFAULT_VOICE: &str = "zh_female_cancan_mars_bigtts";

/// Synthesis model requested from the provider.
const MODEL: &str = "seed-tts-1.1";

/// The provider ignores this but requires it to be present.
const UID: &str = "12345";

/// A text-to-speech request as callers send it.
///
/// Numeric controls are caller-range values, nominally 0.5-2.0 with 1.0 as
/// the neutral point. Credentials may be supplied per request; otherwise the
/// deployment defaults apply.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice_id: String,
    pub speed: f64,
    pub pitch: f64,
    pub loudness: f64,
    pub emotion: Option<String>,
    pub emotion_intensity: f64,
    pub language: String,
    pub app_id: Option<String>,
    pub access_token: Option<String>,
    pub resource_id: Option<String>,
}

impl Default for SynthesisRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice_id: DEFAULT_VOICE.to_string(),
            speed: 1.0,
            pitch: 1.0,
            loudness: 1.0,
            emotion: None,
            emotion_intensity: 4.0,
            language: "zh".to_string(),
            app_id: None,
            access_token: None,
            resource_id: None,
        }
    }
}

/// Request body for the provider's unidirectional synthesis endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UpstreamPayload {
    user: User,
    req_params: ReqParams,
}

#[derive(Debug, Clone, Serialize)]
struct User {
    uid: &'static str,
}

#[derive(Debug, Clone, Serialize)]
struct ReqParams {
    text: String,
    speaker: String,
    model: &'static str,
    // The provider expects `additions` double-encoded as a JSON string.
    #[serde(serialize_with = "as_json_string")]
    additions: Additions,
    audio_params: AudioParams,
}

#[derive(Debug, Clone, Serialize)]
struct AudioParams {
    format: &'static str,
    sample_rate: u32,
    speech_rate: i32,
    loudness_rate: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    emotion_scale: Option<f64>,
}

/// Provider tuning flags sent verbatim on every request.
#[derive(Debug, Clone, Serialize)]
struct Additions {
    disable_markdown_filter: bool,
    enable_language_detector: bool,
    explicit_language: &'static str,
    enable_latex_tn: bool,
    disable_default_bit_rate: bool,
    max_length_to_filter_parenthesis: u32,
    cache_config: CacheConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    post_process: Option<PostProcess>,
}

#[derive(Debug, Clone, Serialize)]
struct CacheConfig {
    text_type: u32,
    use_cache: bool,
}

#[derive(Debug, Clone, Serialize)]
struct PostProcess {
    pitch: i32,
}

fn as_json_string<S>(additions: &Additions, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let encoded = serde_json::to_string(additions).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&encoded)
}

/// Maps a caller request onto the provider schema.
///
/// Pure: no I/O, no hidden state, and deterministic output for a given
/// request. Fails only on missing required caller input.
pub fn normalize(req: &SynthesisRequest) -> Result<UpstreamPayload, RelayError> {
    if req.text.is_empty() {
        return Err(RelayError::Validation("Text cannot be empty".to_string()));
    }

    let pitch = pitch_shift(req.pitch);
    let additions = Additions {
        disable_markdown_filter: true,
        enable_language_detector: true,
        explicit_language: explicit_language(&req.language),
        enable_latex_tn: true,
        disable_default_bit_rate: true,
        max_length_to_filter_parenthesis: 0,
        cache_config: CacheConfig {
            text_type: 1,
            use_cache: true,
        },
        // Absence means "no adjustment"; zero is never sent as a value.
        post_process: (pitch != 0).then_some(PostProcess { pitch }),
    };

    // "neutral" is the provider default and must not be sent explicitly.
    let emotion = req
        .emotion
        .as_deref()
        .filter(|e| *e != "neutral")
        .map(str::to_string);
    let emotion_scale = emotion.as_ref().map(|_| req.emotion_intensity);

    Ok(UpstreamPayload {
        user: User { uid: UID },
        req_params: ReqParams {
            text: req.text.clone(),
            speaker: req.voice_id.clone(),
            model: MODEL,
            additions,
            audio_params: AudioParams {
                format: "mp3",
                sample_rate: 24000,
                speech_rate: rate(req.speed),
                loudness_rate: rate(req.loudness),
                emotion,
                emotion_scale,
            },
        },
    })
}

fn explicit_language(language: &str) -> &'static str {
    match language {
        "zh" => "zh",
        "en" => "en",
        "ja" => "ja",
        "es" => "es-mx",
        _ => "zh",
    }
}

/// Caller range 0.5-2.0 onto the provider's -50..100 integer scale.
/// Deliberately unclamped; only pitch carries a clamp.
fn rate(value: f64) -> i32 {
    ((value - 1.0) * 100.0).round() as i32
}

/// Two-piece mapping onto the provider's semitone scale: steeper below the
/// neutral 1.0 so that 0.5 reaches the floor, then clamped to [-12, 12].
fn pitch_shift(value: f64) -> i32 {
    let raw = if value < 1.0 {
        (value - 1.0) * 24.0
    } else {
        (value - 1.0) * 12.0
    };
    (raw.round() as i32).clamp(-12, 12)
}
