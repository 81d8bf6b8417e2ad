//! Cleanup of raw model output before it is parsed as JSON.
//!
//! Models are told to answer with bare JSON but routinely wrap the answer in
//! a fenced block, often tagged with a language name, and sometimes drop the
//! fence but keep the `json` tag. All of these are stripped here; text that is
//! already clean passes through unchanged.

use serde_json::Value;

const FENCE: &str = "```";

/// Strip surrounding whitespace, a fenced code block wrapper, a leading
/// language tag inside the fence and a bare leading `json` tag.
pub fn normalize_response(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix(FENCE) else {
        return strip_bare_json_tag(trimmed);
    };

    // An unterminated fence (e.g. output cut off at the token ceiling) keeps everything after it
    let inner = match rest.rfind(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    };

    strip_language_tag(inner).trim()
}

fn strip_language_tag(inner: &str) -> &str {
    let candidate = inner.trim_start();
    let tag_len = candidate
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '.')))
        .unwrap_or(candidate.len());
    let tag = &candidate[..tag_len];

    let is_tag = tag.starts_with(|c: char| c.is_ascii_alphabetic()) &&
        !matches!(tag, "true" | "false" | "null");
    if is_tag {
        &candidate[tag_len..]
    } else {
        inner
    }
}

fn strip_bare_json_tag(text: &str) -> &str {
    let Some(tag) = text.get(..4) else {
        return text;
    };
    let rest = &text[4..];
    let ends_word = !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_');
    if tag.eq_ignore_ascii_case("json") && ends_word {
        rest.trim_start()
    } else {
        text
    }
}

/// Normalize a model response and parse it into a generic JSON tree
pub fn parse_model_json(text: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(normalize_response(text))
}
