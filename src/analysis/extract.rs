use super::types::AnalysisResult;
use crate::{Error, Result};

/// Removes a leading ``` fence (with or without a language tag, whether
/// or not a newline follows the tag) and a trailing ``` fence, then
/// trims. Text without fences passes through trimmed.
pub fn strip_code_fences(text: &str) -> &str {
    let mut cleaned = text.trim();

    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = match rest.find('\n') {
            // A pure tag line ("json", possibly padded) is dropped whole;
            // otherwise the payload starts on the fence line and only the
            // glued-on tag is stripped.
            Some(newline)
                if rest[..newline]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c.is_ascii_whitespace()) =>
            {
                &rest[newline + 1..]
            }
            _ => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }

    if let Some(rest) = cleaned.trim_end().strip_suffix("```") {
        cleaned = rest;
    }

    cleaned.trim()
}

/// Parses the model's reply into the analysis schema. A reply that is
/// not valid JSON for the schema after fence-stripping is an
/// output-format error carrying the cleaned text for diagnosis.
pub fn parse_analysis(reply: &str) -> Result<AnalysisResult> {
    let cleaned = strip_code_fences(reply);

    serde_json::from_str(cleaned).map_err(|_| Error::OutputFormat {
        raw: cleaned.to_string(),
    })
}
