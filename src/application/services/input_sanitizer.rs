//! Input sanitizer - strips instruction-injection fragments from user text
//!
//! Free text from the request body is embedded verbatim into a generation
//! instruction, so anything that looks like code, structured payloads or an
//! attempt to re-address the model is blanked out first.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::domain::value_objects::GenerationRequest;

/// Longest input kept, in characters
pub const MAX_INPUT_CHARS: usize = 500;

// Applied in this order; each match becomes a single space
static INJECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?s)```.*?```",
        r"`[^`]*`",
        r"\{[^}]*\}",
        r"\[[^\]]*\]",
        r"(?i)output:",
        r"(?i)return:",
        r"(?i)print:",
        r"(?i)ignore\s",
        r"(?i)forget\s",
        r"(?i)instead\s",
        r"(?i)system:",
        r"(?i)assistant:",
        r"(?i)prompt:",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("valid regex"))
    .collect()
});

/// Sanitize one free-text field.
///
/// Substitution passes repeat until nothing matches, so fragments that only
/// appear once an inner fragment is removed (`ignoreforget x`) are caught too
/// and the result is a fixed point: `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(text: &str) -> String {
    let mut current: String = text
        .chars()
        .take(MAX_INPUT_CHARS)
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    loop {
        let next = INJECTION_PATTERNS
            .iter()
            .fold(current.clone(), |acc, pattern| {
                pattern.replace_all(&acc, " ").into_owned()
            });
        if next == current {
            break;
        }
        current = next;
    }

    current.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The free-text fields of a request after sanitization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedInput {
    pub name: String,
    pub description: String,
}

impl SanitizedInput {
    pub fn from_request(request: &GenerationRequest) -> Self {
        Self {
            name: sanitize(&request.name),
            description: sanitize(&request.description),
        }
    }
}
