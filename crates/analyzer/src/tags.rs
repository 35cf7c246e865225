use regex::Regex;

/// Sentinel returned for every miss: absent narrative, empty narrative, or
/// a tag that does not occur in it.
pub const MISSING: &str = "N/A";

/// Pulls a named field's value out of a loosely-formatted bridge narrative.
///
/// Grammar, and nothing more: the tag name (case-insensitive), an optional
/// `:`, optional whitespace, then everything up to the next line break,
/// returned trimmed. Absence of a match is not an error.
pub fn extract(text: Option<&str>, tag: &str) -> String {
    let Some(text) = text else {
        return MISSING.to_string();
    };
    if text.trim().is_empty() {
        return MISSING.to_string();
    }

    let pattern = format!(r"(?i){}\s*:?\s*([^\r\n]*)", regex::escape(tag));
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        // The tag is escaped above, so this only trips on pathological
        // inputs (e.g. a tag long enough to blow the compile size limit).
        Err(_) => return MISSING.to_string(),
    };

    match re.captures(text).and_then(|c| c.get(1)) {
        Some(m) => {
            let value = m.as_str().trim();
            if value.is_empty() {
                MISSING.to_string()
            } else {
                value.to_string()
            }
        }
        None => {
            tracing::debug!(tag, "tag not found in narrative");
            MISSING.to_string()
        }
    }
}
