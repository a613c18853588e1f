//! Entity decoding and whitespace normalization.

use std::sync::LazyLock;

use regex::Regex;

/// Matches a markup tag or comment.
///
/// A quote opens a quoted value only right after `=`, and only a quoted value
/// may contain `>`. Quotes anywhere else are plain characters.
pub(crate) static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!--(?s:.*?)-->|<[!?/]?[A-Za-z](?:[^>"'=]|=\s*"[^"]*"|=\s*'[^']*'|[="'])*>"#)
        .expect("tag pattern is valid")
});

static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9A-Fa-f]+|[A-Za-z]+);").expect("entity pattern is valid")
});

/// Decodes the character references that appear in game pages.
///
/// Unknown named references are left untouched.
#[must_use]
pub fn decode_entities(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    ENTITY_PATTERN
        .replace_all(input, |caps: &regex::Captures<'_>| {
            let body = &caps[1];
            let decoded = match body {
                "nbsp" => Some(' '),
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                _ => numeric_reference(body),
            };
            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn numeric_reference(body: &str) -> Option<char> {
    let digits = body.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse().ok()?,
    };
    char::from_u32(code)
}

/// Collapses every whitespace run to a single space and trims both ends.
#[must_use]
pub fn normalize_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}
