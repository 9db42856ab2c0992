//! Structural parsers for the URL-shaped parts of a request: the path,
//! the query string, and the `Host` header. All three sit on top of the
//! percent codec in [`crate::percent`].

use std::collections::HashMap;

use crate::error::Error;
use crate::percent;

/// Decoded query parameters. Insertion order is irrelevant; a repeated
/// key keeps the last value seen.
pub type QueryMap = HashMap<String, String>;

/// A parsed `host[:port]` value. `port` is `None` when the input carried
/// no explicit digit group — the request façade fills in the scheme
/// default (443 for https, else 80).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPort {
    pub host: String,
    pub port: Option<u16>,
}

/// Splits a raw request path into decoded segments.
///
/// One leading `/` is stripped, the remainder is percent-decoded (no
/// `+` → space here), then split on `/`. Empty segments between
/// consecutive slashes are preserved; an empty raw path yields a single
/// empty segment.
pub fn parse_path(raw: &str) -> Result<Vec<String>, Error> {
    let raw = raw.strip_prefix('/').unwrap_or(raw);
    let decoded = percent::decode(raw, false)?;
    Ok(decoded.split('/').map(str::to_owned).collect())
}

/// Parses a raw query string into a [`QueryMap`].
///
/// Fields are split on `&`, each field on `=`. A field with no `=` is
/// silently dropped; a field with more than one `=` fails with
/// [`Error::Query`]. Both sides are trimmed, then decoded with the
/// query convention (`+` → space).
pub fn parse_query(raw: &str) -> Result<QueryMap, Error> {
    let mut map = QueryMap::new();
    for field in raw.split('&') {
        let parts: Vec<&str> = field.split('=').collect();
        match parts.as_slice() {
            [_] => continue,
            [key, value] => {
                map.insert(
                    percent::decode(key.trim(), true)?,
                    percent::decode(value.trim(), true)?,
                );
            }
            _ => return Err(Error::Query(field.to_owned())),
        }
    }
    Ok(map)
}

/// Parses a `host[:port]` string.
///
/// The port is the digit group after the last `:` — so `a:1:2` gives
/// host `a:1`, port `2`. An empty or absent digit group means no
/// explicit port. Bracketed IPv6 literals are recognized: `[::1]:8080`
/// gives host `[::1]`, port `8080`. A digit group that does not fit a
/// port number is treated as part of the host.
pub fn parse_host(raw: &str) -> HostPort {
    if raw.starts_with('[') {
        return parse_bracketed_host(raw);
    }
    split_port(raw, raw.rfind(':'))
}

fn parse_bracketed_host(raw: &str) -> HostPort {
    match raw.find(']') {
        Some(close) => {
            let tail = &raw[close + 1..];
            if tail.is_empty() {
                HostPort { host: raw.to_owned(), port: None }
            } else {
                split_port(raw, tail.starts_with(':').then_some(close + 1))
            }
        }
        // Unterminated bracket: fall back to the plain host rule.
        None => split_port(raw, raw.rfind(':')),
    }
}

fn split_port(raw: &str, colon: Option<usize>) -> HostPort {
    let whole = || HostPort { host: raw.to_owned(), port: None };
    let Some(colon) = colon else {
        return whole();
    };
    let digits = &raw[colon + 1..];
    if digits.is_empty() {
        return HostPort { host: raw[..colon].to_owned(), port: None };
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return whole();
    }
    match digits.parse::<u16>() {
        Ok(port) => HostPort { host: raw[..colon].to_owned(), port: Some(port) },
        Err(_) => whole(),
    }
}
