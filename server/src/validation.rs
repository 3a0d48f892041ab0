use relay_core::SynthesisRequest;

use crate::error::ApiError;

/// Maximum text length for synthesis requests
const MAX_TEXT_LENGTH: usize = 5000;

/// Validate a synthesis request before anything is sent upstream.
///
/// Range checks stop at "is this a usable number": the caller scale is
/// nominal, and the normalizer deliberately does not clamp speed/loudness.
pub fn validate_synthesis_request(req: &SynthesisRequest) -> Result<(), ApiError> {
    if req.text.is_empty() {
        return Err(ApiError::InvalidInput("Text cannot be empty".to_string()));
    }
    if req.text.len() > MAX_TEXT_LENGTH {
        return Err(ApiError::InvalidInput(format!(
            "Text too long (max {} characters)",
            MAX_TEXT_LENGTH
        )));
    }

    if req.voice_id.is_empty() {
        return Err(ApiError::InvalidInput(
            "Voice id cannot be empty".to_string(),
        ));
    }

    for (name, value) in [
        ("speed", req.speed),
        ("pitch", req.pitch),
        ("loudness", req.loudness),
        ("emotion_intensity", req.emotion_intensity),
    ] {
        if !value.is_finite() {
            return Err(ApiError::InvalidInput(format!(
                "Field '{}' must be a finite number",
                name
            )));
        }
    }

    Ok(())
}
