use serde_json::Value;

/// Parse a JSON reply, tolerating a surrounding Markdown code fence.
pub(crate) fn parse_json_payload(text: &str) -> Result<Value, String> {
    let body = strip_code_fence(text.trim());
    serde_json::from_str(body).map_err(|err| format!("response is not valid JSON: {}", err))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => strip_json_tag(rest),
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// One-line fences carry the info string directly before the payload.
fn strip_json_tag(text: &str) -> &str {
    match text.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => text[4..].trim_start(),
        _ => text,
    }
}
