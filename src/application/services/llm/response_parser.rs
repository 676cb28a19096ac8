//! LLM response parser
//!
//! Model compliance with "JSON only" is probabilistic, so the payload is
//! located with a lenient brace-span search instead of a strict grammar.

/// Span from the first `{` to the last `}` of the response, if any.
///
/// Not nesting-aware: text between two separate objects is included, and the
/// subsequent JSON parse decides whether the span is usable.
pub fn extract_json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if start >= end {
        return None;
    }
    Some(&raw[start..=end])
}

/// Locate and parse the JSON payload of a model response.
///
/// Returns `None` when there is no brace span or the span is not valid JSON;
/// callers fall back to the default block.
pub fn extract(raw: &str) -> Option<serde_json::Value> {
    let span = extract_json_span(raw)?;
    match serde_json::from_str::<serde_json::Value>(span) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Brace span is not valid JSON: {}", e);
            None
        }
    }
}

/// First non-empty line of a free-text reply, with wrapping quotes removed
pub fn first_line(raw: &str) -> Option<String> {
    raw.lines()
        .map(|line| line.trim().trim_matches(|c| c == '"' || c == '\'' || c == '`').trim())
        .find(|line| !line.is_empty())
        .map(String::from)
}
