//! Compatibility shim for free-text model responses.
//!
//! Some models wrap plain answers in markdown code fences or prepend a
//! literal "json" marker. This is not core logic; each rule here corresponds
//! to an observed model quirk.

/// Strip surrounding whitespace and backtick fencing, then a literal leading
/// "json" marker, from a raw model response.
pub fn normalize_response(raw: &str) -> String {
    let stripped = raw.trim_matches(|c: char| c == '`' || c.is_whitespace());
    let stripped = match stripped.strip_prefix("json") {
        Some(rest) => rest.trim_start(),
        None => stripped,
    };
    stripped.to_string()
}
