//! Percent-encoding codec per the RFC 3986 character classification.
//!
//! Both directions run off `const` 256-entry tables built at compile time,
//! so the hot decode path never touches a mutable cache and is safe to hit
//! from any number of concurrent workers.
//!
//! The codec is byte-oriented: header and URI text must be representable
//! as single bytes (Latin-1), so [`encode`] drops anything at or above
//! U+0100 rather than guessing a multi-byte encoding for it.

use crate::error::Error;

const HEX_UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// `true` for the RFC 3986 unreserved set: `A-Z a-z 0-9 - . _ ~`.
const UNRESERVED: [bool; 256] = build_unreserved();

/// Precomputed `%XX` escape triplet for every byte value.
const ESCAPES: [[u8; 3]; 256] = build_escapes();

/// Hex digit value per byte, `0xFF` for non-hex bytes.
const HEX_VALUES: [u8; 256] = build_hex_values();

const fn build_unreserved() -> [bool; 256] {
    let mut table = [false; 256];
    let mut b = 0usize;
    while b < 256 {
        let c = b as u8;
        table[b] = c.is_ascii_alphanumeric() || matches!(c, b'-' | b'.' | b'_' | b'~');
        b += 1;
    }
    table
}

const fn build_escapes() -> [[u8; 3]; 256] {
    let mut table = [[0u8; 3]; 256];
    let mut b = 0usize;
    while b < 256 {
        table[b] = [b'%', HEX_UPPER[b >> 4], HEX_UPPER[b & 0x0F]];
        b += 1;
    }
    table
}

const fn build_hex_values() -> [u8; 256] {
    let mut table = [0xFFu8; 256];
    let mut b = 0usize;
    while b < 256 {
        let c = b as u8;
        table[b] = match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => 0xFF,
        };
        b += 1;
    }
    table
}

fn hex_value(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match HEX_VALUES[c as usize] {
        0xFF => None,
        v => Some(v),
    }
}

/// Replaces each `%XX` triplet with the character at that code point.
///
/// `plus_as_space` selects the query-string convention (`+` → space);
/// the path parser leaves `+` alone.
///
/// Malformed escapes — a truncated triplet or non-hex digits — fail with
/// [`Error::Escape`].
pub fn decode(text: &str, plus_as_space: bool) -> Result<String, Error> {
    // Fast path: nothing to rewrite.
    if !text.contains('%') && !(plus_as_space && text.contains('+')) {
        return Ok(text.to_owned());
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => {
                let hi = chars
                    .next()
                    .ok_or_else(|| Error::Escape("truncated escape: %".to_owned()))?;
                let lo = chars
                    .next()
                    .ok_or_else(|| Error::Escape(format!("truncated escape: %{hi}")))?;
                match (hex_value(hi), hex_value(lo)) {
                    (Some(h), Some(l)) => out.push(char::from((h << 4) | l)),
                    _ => return Err(Error::Escape(format!("%{hi}{lo}"))),
                }
            }
            '+' if plus_as_space => out.push(' '),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Escapes every character outside the unreserved set as `%XX`.
///
/// Byte-wise: characters at or above U+0100 are not representable in a
/// single byte and are dropped. Idempotent on unreserved-only input.
pub fn encode(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let cp = c as u32;
        if cp >= 256 {
            continue;
        }
        let b = cp as usize;
        if UNRESERVED[b] {
            out.push(c);
        } else {
            for &e in &ESCAPES[b] {
                out.push(char::from(e));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreserved_passes_through() {
        let s = "AZaz09-._~";
        assert_eq!(encode(s), s);
        assert_eq!(decode(s, false).unwrap(), s);
        assert_eq!(decode(s, true).unwrap(), s);
    }

    #[test]
    fn encode_escapes_reserved() {
        assert_eq!(encode("a b"), "a%20b");
        assert_eq!(encode("a/b?c"), "a%2Fb%3Fc");
        assert_eq!(encode("100%"), "100%25");
    }

    #[test]
    fn encode_is_byte_wise_latin1() {
        // U+00E9 is Latin-1 representable; U+4E2D is not and is dropped.
        assert_eq!(encode("é"), "%E9");
        assert_eq!(encode("a中b"), "ab");
    }

    #[test]
    fn encode_idempotent_on_unreserved() {
        let s = "already-safe_text~1.0";
        assert_eq!(encode(&encode(s)), encode(s));
    }

    #[test]
    fn decode_inverts_encode() {
        for s in ["hello world", "a/b?c=d&e", "100% sure", "caf\u{e9} au lait"] {
            assert_eq!(decode(&encode(s), false).unwrap(), s);
        }
    }

    #[test]
    fn decode_hex_case_insensitive() {
        assert_eq!(decode("%2f%2F", false).unwrap(), "//");
    }

    #[test]
    fn plus_only_in_query_context() {
        assert_eq!(decode("a+b", true).unwrap(), "a b");
        assert_eq!(decode("a+b", false).unwrap(), "a+b");
    }

    #[test]
    fn malformed_escape_fails() {
        assert!(matches!(decode("%zz", false), Err(Error::Escape(_))));
        assert!(matches!(decode("%4", false), Err(Error::Escape(_))));
        assert!(matches!(decode("trailing%", false), Err(Error::Escape(_))));
    }
}
