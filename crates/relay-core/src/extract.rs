//! Locate the JSON object inside a free-form assistant reply.
//!
//! This is a best-effort heuristic, not a parser. Order of preference:
//!
//! 1. the object inside a fenced code block (```` ```json ```` or bare ```` ``` ````),
//! 2. the widest span from the first `{` to the last `}`,
//! 3. the whole trimmed reply.
//!
//! Replies containing more than one JSON object are out of contract: the
//! fenced block wins, then the outermost brace span.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("reply is empty")]
    Empty,
}

static FENCED_RE: OnceLock<Regex> = OnceLock::new();
static BRACES_RE: OnceLock<Regex> = OnceLock::new();

fn fenced_re() -> &'static Regex {
    FENCED_RE.get_or_init(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*\})\s*```").unwrap())
}

fn braces_re() -> &'static Regex {
    BRACES_RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").unwrap())
}

/// Narrow `text` down to the substring most likely to be the JSON object.
///
/// Syntax is not checked here; see [`crate::validate`].
pub fn extract_candidate(text: &str) -> Result<&str, ExtractError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ExtractError::Empty);
    }
    if let Some(m) = fenced_re().captures(trimmed).and_then(|c| c.get(1)) {
        return Ok(m.as_str());
    }
    if let Some(m) = braces_re().find(trimmed) {
        return Ok(m.as_str());
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object_is_returned_as_is() {
        let text = r#"{"action":"delete","name":"X"}"#;
        assert_eq!(extract_candidate(text).unwrap(), text);
    }

    #[test]
    fn json_tagged_fence_is_unwrapped() {
        let text = "Here you go:\n```json\n{\"a\":1}\n```\nEnjoy!";
        assert_eq!(extract_candidate(text).unwrap(), "{\"a\":1}");
    }

    #[test]
    fn untagged_fence_is_unwrapped() {
        let text = "```\n{\"a\":{\"b\":2}}\n```";
        assert_eq!(extract_candidate(text).unwrap(), "{\"a\":{\"b\":2}}");
    }

    #[test]
    fn prose_around_object_is_stripped() {
        let text = "Sure! {\"a\":{\"b\":[1,2]}} Let me know if you need more.";
        assert_eq!(extract_candidate(text).unwrap(), "{\"a\":{\"b\":[1,2]}}");
    }

    #[test]
    fn fenced_block_wins_over_prose_object() {
        let text = "Example {\"x\":0} then\n```json\n{\"y\":1}\n```";
        assert_eq!(extract_candidate(text).unwrap(), "{\"y\":1}");
    }

    #[test]
    fn lua_braces_inside_source_stay_in_span() {
        let text = r#"{"source":"local t = {}\nreturn t"}"#;
        assert_eq!(extract_candidate(text).unwrap(), text);
    }

    #[test]
    fn text_without_braces_falls_back_to_trimmed_text() {
        assert_eq!(extract_candidate("  not json at all \n").unwrap(), "not json at all");
    }

    #[test]
    fn empty_and_whitespace_fail() {
        assert_eq!(extract_candidate(""), Err(ExtractError::Empty));
        assert_eq!(extract_candidate(" \n\t "), Err(ExtractError::Empty));
    }
}
