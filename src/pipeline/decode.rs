//! Decode and validate the model's answer.
//!
//! The provider already enforced the schema, so the answer is treated as JSON
//! that only needs decoding into [`AnalysisResult`]. Anything that does not fit
//! (bad JSON, a missing or mistyped field, an empty value, the wrong number of
//! titles) is one error: [`ProviderError::MalformedResponse`]. Nothing is
//! defaulted or repaired, and valid values come back byte-for-byte.

use crate::error::ProviderError;
use crate::output::AnalysisResult;
use crate::prompts::TITLE_COUNT;

/// Decode `text` (surrounding whitespace ignored) and validate its shape.
pub fn decode_response(text: &str) -> Result<AnalysisResult, ProviderError> {
    let result: AnalysisResult = serde_json::from_str(text.trim())
        .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;
    validate(&result)?;
    Ok(result)
}

fn validate(result: &AnalysisResult) -> Result<(), ProviderError> {
    let blank = |field: &str| ProviderError::MalformedResponse(format!("{field} is empty"));

    if result.suggested_category.trim().is_empty() {
        return Err(blank("suggested_category"));
    }
    if result.suggested_condition.trim().is_empty() {
        return Err(blank("suggested_condition"));
    }
    if result.suggested_description.trim().is_empty() {
        return Err(blank("suggested_description"));
    }
    if result.suggested_titles.len() != TITLE_COUNT {
        return Err(ProviderError::MalformedResponse(format!(
            "expected {TITLE_COUNT} suggested_titles, got {}",
            result.suggested_titles.len()
        )));
    }
    if let Some(i) = result.suggested_titles.iter().position(|t| t.trim().is_empty()) {
        return Err(ProviderError::MalformedResponse(format!(
            "suggested_titles[{i}] is empty"
        )));
    }
    Ok(())
}
