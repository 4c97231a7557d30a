//! Log sanitization utilities
//!
//! Every authenticated call carries the API key and either the API password
//! or a live session id as plain arguments. Nothing of those may reach a log
//! line in full, and response bodies are truncated.

use crate::traits::SoapParam;

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Argument names whose values are never logged.
const SENSITIVE_PARAMS: &[&str] = &["apikey", "apipassword", "apisessionid"];

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

pub fn is_sensitive(name: &str) -> bool {
    SENSITIVE_PARAMS
        .iter()
        .any(|p| p.eq_ignore_ascii_case(name))
}

/// Mask a secret, keeping at most its first two characters.
pub fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(2).collect();
    if secret.chars().count() <= 4 {
        "***".to_string()
    } else {
        format!("{visible}***")
    }
}

/// Render an argument list as `name=value, ...` with secrets masked.
pub fn describe_params(params: &[SoapParam]) -> String {
    params
        .iter()
        .map(|p| {
            let value = match p.value.as_str() {
                Some(s) if is_sensitive(&p.name) => mask_secret(s),
                _ if is_sensitive(&p.name) => "***".to_string(),
                Some(s) => truncate_for_log(s),
                None => truncate_for_log(&p.value.to_string()),
            };
            format!("{}={value}", p.name)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Replace the text content of sensitive elements in an XML payload.
///
/// Only used on debug output of encoded requests; the element names are the
/// plain (unprefixed) argument names the codec writes.
pub fn redact_xml(xml: &str) -> String {
    let mut out = xml.to_string();
    for name in SENSITIVE_PARAMS {
        let open = format!("<{name}>");
        let close = format!("</{name}>");
        let mut cursor = 0;
        while let Some(start) = out[cursor..].find(&open) {
            let value_start = cursor + start + open.len();
            let Some(len) = out[value_start..].find(&close) else {
                break;
            };
            out.replace_range(value_start..value_start + len, "***");
            cursor = value_start + 3 + close.len();
        }
    }
    out
}
