//! git::quote
//!
//! Decoding of git's quoted path syntax.
//!
//! Git wraps paths containing unusual characters in double quotes and
//! escapes them C-style. Octal escapes name single bytes; a UTF-8 path
//! therefore arrives as a run of octal escapes, one per byte. Each is
//! decoded to the char whose scalar value equals the byte, so multi-byte
//! sequences come out as Latin-1 mojibake rather than the original
//! character. Diff output is requested with `core.quotePath=false`, which
//! keeps non-ASCII paths out of this code path.

/// Decode a path as printed by git.
///
/// Text wrapped in double quotes (at least two chars) is unquoted and
/// unescaped. Anything else is returned unchanged.
///
/// # Example
///
/// ```
/// use ci_refs::git::quote::decode;
///
/// assert_eq!(decode(r#""a\tb""#), "a\tb");
/// assert_eq!(decode(r#""\101""#), "A");
/// assert_eq!(decode("plain/path.rs"), "plain/path.rs");
/// ```
pub fn decode(text: &str) -> String {
    let Some(inner) = text.strip_prefix('"').and_then(|t| t.strip_suffix('"')) else {
        return text.to_string();
    };

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some(e) if simple_escape(e).is_some() => {
                chars.next();
                out.extend(simple_escape(e));
            }
            Some(d) if d.is_digit(8) => {
                let mut value = 0u32;
                for _ in 0..3 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                // At most 0o777, always a valid scalar.
                out.push(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            // Unknown escape: keep the backslash, the next char is read normally.
            _ => out.push('\\'),
        }
    }
    out
}

fn simple_escape(c: char) -> Option<char> {
    Some(match c {
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'v' => '\u{0B}',
        '\\' => '\\',
        '"' => '"',
        _ => return None,
    })
}
