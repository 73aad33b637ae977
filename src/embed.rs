//! Embedded content representation: base64 data URIs and their inverse.
//!
//! The builder inlines file contents into the document as self-contained
//! `data:` URIs; the inspector reverses them. Both directions must agree
//! bit-for-bit on the format.

use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;

use crate::error::AppError;

/// Encode text as a self-contained data URI.
///
/// Pure and total: any string round-trips exactly through
/// [`decode_source`].
pub fn embed(text: &str) -> String {
    let payload = STANDARD.encode(text.as_bytes());
    format!("data:text/plain;charset=utf-8;base64,{payload}")
}

/// Heuristic check for template directive syntax.
///
/// True iff the text contains a substitution (`{{ ... }}`) or control
/// (`{% ... %}`) directive opened and closed on a single line. This is not
/// a parser; content it misses passes through the build untouched, and that
/// pass-through is fixed behavior.
pub fn looks_like_template(text: &str) -> bool {
    static SUBSTITUTION: OnceLock<Regex> = OnceLock::new();
    static CONTROL: OnceLock<Regex> = OnceLock::new();
    let substitution = SUBSTITUTION.get_or_init(|| Regex::new(r"\{\{.+\}\}").unwrap());
    let control = CONTROL.get_or_init(|| Regex::new(r"\{%.+%\}").unwrap());
    substitution.is_match(text) || control.is_match(text)
}

/// Decode a file entry source back to readable text.
///
/// Base64 data URIs are decoded as UTF-8; any other comma-delimited
/// reference yields the text after the first comma; anything else is
/// returned unchanged, so plain URLs pass through without failing.
pub fn decode_source(source: &str) -> Result<String, AppError> {
    if source.contains("base64") {
        let encoded = source
            .split_once("base64,")
            .map(|(_, rest)| rest)
            .unwrap_or("");
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| AppError::InvalidEmbeddedContent(e.to_string()))?;
        return String::from_utf8(bytes).map_err(|e| AppError::InvalidEmbeddedContent(e.to_string()));
    }
    Ok(match source.split_once(',') {
        Some((_, rest)) => rest.to_string(),
        None => source.to_string(),
    })
}
