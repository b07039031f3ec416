//! HTML character reference decoding.
//!
//! Covers the XML predefined entities, numeric references and the handful of
//! named HTML entities that show up in generated tables of contents.

/// Decode a single entity name (without `&` and `;`).
pub(crate) fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        "nbsp" => Some('\u{00a0}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "hellip" => Some('\u{2026}'),
        "copy" => Some('\u{00a9}'),
        "reg" => Some('\u{00ae}'),
        "trade" => Some('\u{2122}'),
        s if s.starts_with("#x") || s.starts_with("#X") => {
            u32::from_str_radix(&s[2..], 16).ok().and_then(char::from_u32)
        }
        s if s.starts_with('#') => s[1..].parse::<u32>().ok().and_then(char::from_u32),
        _ => None,
    }
}

/// Decode every character reference in `text`; unknown ones are kept as-is.
pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_owned();
    }

    let mut result = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find('&') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        // Entity names handled here are at most 11 bytes
        let decoded = after
            .bytes()
            .take(12)
            .position(|b| b == b';')
            .and_then(|end| decode_entity(&after[..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                result.push(c);
                rest = &after[end + 1..];
            }
            None => {
                result.push('&');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}
