use markup5ever::data::NAMED_ENTITIES;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static CHARACTER_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]*);")
        .expect("Character reference pattern should be valid")
});

/// Decodes character references in text or attribute values.
///
/// Numeric references and every named reference of the HTML5 table are
/// decoded when terminated by `;`. Anything else is left exactly as written.
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    CHARACTER_REFERENCE.replace_all(text, |caps: &Captures| match resolve(&caps[1]) {
        Some(decoded) => decoded,
        None => caps[0].to_string(),
    })
}

fn resolve(reference: &str) -> Option<String> {
    if let Some(number) = reference.strip_prefix('#') {
        let code = match number.strip_prefix(|c: char| c == 'x' || c == 'X') {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        // NUL, surrogates and out-of-range code points all become U+FFFD
        let c = char::from_u32(code)
            .filter(|&c| c != '\0')
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        return Some(c.to_string());
    }

    // The table also holds every prefix of every name, mapped to (0, 0)
    let &(first, second) = NAMED_ENTITIES.get(format!("{};", reference).as_str())?;
    if first == 0 {
        return None;
    }
    let mut decoded = String::new();
    decoded.push(char::from_u32(first)?);
    if second != 0 {
        decoded.push(char::from_u32(second)?);
    }
    Some(decoded)
}
