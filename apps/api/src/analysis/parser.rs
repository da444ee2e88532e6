//! Extracts the model's JSON verdict from a free-form completion.
//!
//! Models are instructed to reply with bare JSON, but they still wrap it in
//! prose or code fences often enough that the parser tolerates both: it takes
//! the slice from the leftmost `{` through the last `}` and parses that.

use crate::analysis::models::ModelVerdict;
use crate::errors::AppError;

/// Returns the first top-level JSON object region of `text`, greedily
/// spanning to the last closing brace. `None` if no braced region exists.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parses a raw completion into a typed verdict.
/// A completion with no JSON object, or whose JSON does not match the
/// documented schema, is an upstream contract violation.
pub fn parse_verdict(completion: &str) -> Result<ModelVerdict, AppError> {
    let json = extract_json_object(completion).ok_or_else(|| {
        AppError::MalformedAiResponse("no JSON object found in completion".to_string())
    })?;

    serde_json::from_str(json).map_err(|e| AppError::MalformedAiResponse(e.to_string()))
}
