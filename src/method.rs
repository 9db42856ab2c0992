//! HTTP method as a typed enum.
//!
//! Covers RFC 9110 standard methods plus the WebDAV set (RFC 4918 / 4791 /
//! 3253 / 5323). Two classifications matter to this crate: the handler
//! method name each verb dispatches to (`do_get`, `do_post`, …) and
//! whether the verb is read-only — read-only requests are defined to have
//! no content type regardless of what the header says.

use std::fmt;
use std::str::FromStr;

/// A known HTTP method.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Method {
    // RFC 9110 ─────────────────────────────────────────────────────────────────
    Connect,
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
    Trace,
    // WebDAV RFC 4918 ──────────────────────────────────────────────────────────
    Copy,
    Lock,
    Mkcol,
    Move,
    Propfind,
    Proppatch,
    Unlock,
    // WebDAV extensions ────────────────────────────────────────────────────────
    Mkcalendar, // RFC 4791 — CalDAV
    Report,     // RFC 3253
    Search,     // RFC 5323
}

impl Method {
    /// Returns the uppercase wire representation (e.g. `"GET"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connect    => "CONNECT",
            Self::Copy       => "COPY",
            Self::Delete     => "DELETE",
            Self::Get        => "GET",
            Self::Head       => "HEAD",
            Self::Lock       => "LOCK",
            Self::Mkcalendar => "MKCALENDAR",
            Self::Mkcol      => "MKCOL",
            Self::Move       => "MOVE",
            Self::Options    => "OPTIONS",
            Self::Patch      => "PATCH",
            Self::Post       => "POST",
            Self::Propfind   => "PROPFIND",
            Self::Proppatch  => "PROPPATCH",
            Self::Put        => "PUT",
            Self::Report     => "REPORT",
            Self::Search     => "SEARCH",
            Self::Trace      => "TRACE",
            Self::Unlock     => "UNLOCK",
        }
    }

    /// Handler method name under the `do_<verb>` dispatch convention.
    ///
    /// The router looks this name up on the resolved endpoint — a node
    /// that answers GET exposes `do_get`, and so on.
    pub fn handler_name(self) -> &'static str {
        match self {
            Self::Connect    => "do_connect",
            Self::Copy       => "do_copy",
            Self::Delete     => "do_delete",
            Self::Get        => "do_get",
            Self::Head       => "do_head",
            Self::Lock       => "do_lock",
            Self::Mkcalendar => "do_mkcalendar",
            Self::Mkcol      => "do_mkcol",
            Self::Move       => "do_move",
            Self::Options    => "do_options",
            Self::Patch      => "do_patch",
            Self::Post       => "do_post",
            Self::Propfind   => "do_propfind",
            Self::Proppatch  => "do_proppatch",
            Self::Put        => "do_put",
            Self::Report     => "do_report",
            Self::Search     => "do_search",
            Self::Trace      => "do_trace",
            Self::Unlock     => "do_unlock",
        }
    }

    /// Whether this verb is read-only: no body is expected on the request,
    /// so the façade reports the empty content type for it.
    pub fn is_read_only(self) -> bool {
        matches!(
            self,
            Self::Get
                | Self::Head
                | Self::Options
                | Self::Trace
                | Self::Propfind
                | Self::Report
                | Self::Search
        )
    }
}

/// Parses an uppercase method string (e.g. `"GET"`). Case-sensitive per RFC 9110 §9.1.
impl FromStr for Method {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONNECT"    => Ok(Self::Connect),
            "COPY"       => Ok(Self::Copy),
            "DELETE"     => Ok(Self::Delete),
            "GET"        => Ok(Self::Get),
            "HEAD"       => Ok(Self::Head),
            "LOCK"       => Ok(Self::Lock),
            "MKCALENDAR" => Ok(Self::Mkcalendar),
            "MKCOL"      => Ok(Self::Mkcol),
            "MOVE"       => Ok(Self::Move),
            "OPTIONS"    => Ok(Self::Options),
            "PATCH"      => Ok(Self::Patch),
            "POST"       => Ok(Self::Post),
            "PROPFIND"   => Ok(Self::Propfind),
            "PROPPATCH"  => Ok(Self::Proppatch),
            "PUT"        => Ok(Self::Put),
            "REPORT"     => Ok(Self::Report),
            "SEARCH"     => Ok(Self::Search),
            "TRACE"      => Ok(Self::Trace),
            "UNLOCK"     => Ok(Self::Unlock),
            _            => Err(()),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        for m in [Method::Get, Method::Post, Method::Propfind, Method::Mkcalendar] {
            assert_eq!(m.as_str().parse::<Method>(), Ok(m));
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("get".parse::<Method>().is_err());
        assert!("Get".parse::<Method>().is_err());
    }

    #[test]
    fn handler_names_follow_convention() {
        assert_eq!(Method::Get.handler_name(), "do_get");
        assert_eq!(Method::Post.handler_name(), "do_post");
        assert_eq!(Method::Mkcalendar.handler_name(), "do_mkcalendar");
    }

    #[test]
    fn read_only_classification() {
        assert!(Method::Get.is_read_only());
        assert!(Method::Head.is_read_only());
        assert!(!Method::Post.is_read_only());
        assert!(!Method::Delete.is_read_only());
    }
}
