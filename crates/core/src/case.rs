//! camelCase / snake_case conversion for JSON object keys.
//!
//! The web client speaks camelCase while the API's DTOs are snake_case.
//! [`convert_keys`] renames every object key in a JSON tree; values
//! (including string values that look like identifiers) are never touched.

use serde_json::{Map, Value};

/// Target key style for [`convert_keys`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCase {
    Snake,
    Camel,
}

/// Convert an identifier to snake_case.
///
/// Acronym runs are kept together (`imageURL` -> `image_url`,
/// `HTMLLink` -> `html_link`). Input that is already snake_case is returned
/// unchanged.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|j| chars[j]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                None | Some('_') => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(|n| n.is_lowercase()),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert an identifier to camelCase.
///
/// Leading underscores are preserved; interior runs of underscores collapse.
pub fn to_camel_case(s: &str) -> String {
    let trimmed = s.trim_start_matches('_');
    let mut out = String::with_capacity(s.len());
    out.push_str(&s[..s.len() - trimmed.len()]);

    let mut upper_next = false;
    for c in trimmed.chars() {
        if c == '_' {
            upper_next = !out.is_empty() && !out.ends_with('_');
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Recursively rename the keys of every object in `value`.
pub fn convert_keys(value: Value, case: KeyCase) -> Value {
    match value {
        Value::Object(map) => {
            let converted: Map<String, Value> = map
                .into_iter()
                .map(|(k, v)| {
                    let key = match case {
                        KeyCase::Snake => to_snake_case(&k),
                        KeyCase::Camel => to_camel_case(&k),
                    };
                    (key, convert_keys(v, case))
                })
                .collect();
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| convert_keys(v, case))
                .collect(),
        ),
        other => other,
    }
}
