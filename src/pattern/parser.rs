/// Pattern string parsing
///
/// Pure functional parsing of pattern strings into [`Pattern`] values.
/// Parsing has no side effects: it either returns a complete pattern or a
/// [`ParseError`] describing the first problem found.
use std::collections::HashSet;

use thiserror::Error;

use crate::{Pattern, Segment};

/// The HTTP methods a pattern may name.
pub(crate) const METHODS: [&str; 8] = [
    "GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS", "TRACE",
];

/// A structural problem in a pattern string.
///
/// Each variant corresponds to one way a pattern can be malformed; the
/// message identifies the problem without echoing the whole input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty pattern")]
    Empty,
    #[error("bad method {0:?}; need one of GET, HEAD, POST, PUT, PATCH, DELETE, OPTIONS, TRACE")]
    BadMethod(String),
    #[error("host/path missing '/'")]
    MissingSlash,
    #[error("host contains '{{' (missing initial '/'?)")]
    HostContainsBrace,
    #[error("empty path segment")]
    EmptySegment,
    #[error("bad wildcard segment (must start with '{{')")]
    WildcardNotAtStart,
    #[error("bad wildcard segment (must end with '}}')")]
    WildcardUnclosed,
    #[error("empty wildcard")]
    EmptyWildcardName,
    #[error("bad wildcard name {0:?}")]
    BadWildcardName(String),
    #[error("duplicate wildcard name {0:?}")]
    DuplicateWildcardName(String),
    #[error("{{$}} not at end")]
    ExactEndNotLast,
    #[error("{{...}} wildcard not at end")]
    CatchAllNotLast,
}

/// Parses a pattern string into its method, host, and path segments.
///
/// The syntax is `[METHOD ' '][HOST]/PATH`. The first space, if any,
/// separates the method from the remainder; the host runs up to the first
/// `/`; everything from that `/` onward is the path. Path pieces are either
/// literals or wildcards spanning the whole piece: `{name}`, `{name...}`
/// (last piece only), or `{$}` (last piece only). A trailing `/` is
/// shorthand for a final anonymous `{...}` wildcard.
pub(crate) fn parse(s: &str) -> Result<Pattern, ParseError> {
    if s.is_empty() {
        return Err(ParseError::Empty);
    }
    let (method, rest) = match s.split_once(' ') {
        Some((method, rest)) => (method, rest),
        None => ("", s),
    };
    if !method.is_empty() && !METHODS.contains(&method) {
        return Err(ParseError::BadMethod(method.to_string()));
    }

    let slash = rest.find('/').ok_or(ParseError::MissingSlash)?;
    let (host, path) = rest.split_at(slash);
    if host.contains('{') {
        return Err(ParseError::HostContainsBrace);
    }

    let mut segments = Vec::new();
    let mut seen_names: HashSet<&str> = HashSet::new();
    let mut rest = path;
    while !rest.is_empty() {
        // Invariant: rest starts with '/'.
        rest = &rest[1..];
        if rest.is_empty() {
            // Trailing slash.
            segments.push(Segment::CatchAll(String::new()));
            break;
        }
        let end = rest.find('/').unwrap_or(rest.len());
        if end == 0 {
            return Err(ParseError::EmptySegment);
        }
        let (piece, tail) = rest.split_at(end);
        rest = tail;

        let Some(brace) = piece.find('{') else {
            segments.push(Segment::Literal(piece.to_string()));
            continue;
        };
        if brace != 0 {
            return Err(ParseError::WildcardNotAtStart);
        }
        if !piece.ends_with('}') {
            return Err(ParseError::WildcardUnclosed);
        }
        let name = &piece[1..piece.len() - 1];
        if name == "$" {
            if !rest.is_empty() {
                return Err(ParseError::ExactEndNotLast);
            }
            segments.push(Segment::ExactEnd);
            break;
        }
        let (name, multi) = match name.strip_suffix("...") {
            Some(base) => (base, true),
            None => (name, false),
        };
        if multi && !rest.is_empty() {
            return Err(ParseError::CatchAllNotLast);
        }
        if name.is_empty() {
            return Err(ParseError::EmptyWildcardName);
        }
        if !is_valid_wildcard_name(name) {
            return Err(ParseError::BadWildcardName(name.to_string()));
        }
        if !seen_names.insert(name) {
            return Err(ParseError::DuplicateWildcardName(name.to_string()));
        }
        segments.push(if multi {
            Segment::CatchAll(name.to_string())
        } else {
            Segment::Param(name.to_string())
        });
    }

    Ok(Pattern {
        method: method.to_string(),
        host: host.to_string(),
        segments,
    })
}

/// Validates a wildcard name: a letter or `_` first, then letters, digits,
/// or `_`.
fn is_valid_wildcard_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_method_host_and_param() {
        let p = parse("GET example.com/items/{id}").unwrap();
        assert_eq!(p.method(), "GET");
        assert_eq!(p.host(), "example.com");
        assert_eq!(
            p.segments(),
            &[
                Segment::Literal("items".to_string()),
                Segment::Param("id".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_method_without_host() {
        let p = parse("GET /items/{id}").unwrap();
        assert_eq!(p.method(), "GET");
        assert_eq!(p.host(), "");
        assert_eq!(
            p.segments(),
            &[
                Segment::Literal("items".to_string()),
                Segment::Param("id".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_trailing_slash() {
        let p = parse("/items/").unwrap();
        assert_eq!(
            p.segments(),
            &[
                Segment::Literal("items".to_string()),
                Segment::CatchAll(String::new()),
            ]
        );
    }

    #[test]
    fn test_parse_root() {
        let p = parse("/").unwrap();
        assert_eq!(p.segments(), &[Segment::CatchAll(String::new())]);
    }

    #[test]
    fn test_parse_exact_end() {
        let p = parse("/a/{$}").unwrap();
        assert_eq!(
            p.segments(),
            &[Segment::Literal("a".to_string()), Segment::ExactEnd]
        );
    }

    #[test]
    fn test_parse_catch_all() {
        let p = parse("POST /items/{rest...}").unwrap();
        assert_eq!(p.method(), "POST");
        assert_eq!(
            p.segments(),
            &[
                Segment::Literal("items".to_string()),
                Segment::CatchAll("rest".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_underscore_and_digit_names() {
        let p = parse("/{_x}/{x1}").unwrap();
        assert_eq!(
            p.segments(),
            &[
                Segment::Param("_x".to_string()),
                Segment::Param("x1".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_empty_pattern() {
        assert_eq!(parse(""), Err(ParseError::Empty));
    }

    #[test]
    fn test_parse_bad_method() {
        assert_eq!(
            parse("get /items"),
            Err(ParseError::BadMethod("get".to_string()))
        );
        assert_eq!(
            parse("FETCH /items"),
            Err(ParseError::BadMethod("FETCH".to_string()))
        );
    }

    #[test]
    fn test_parse_missing_slash() {
        assert_eq!(parse("example.com"), Err(ParseError::MissingSlash));
        assert_eq!(parse("GET example.com"), Err(ParseError::MissingSlash));
    }

    #[test]
    fn test_parse_host_with_brace() {
        assert_eq!(parse("{id}/items"), Err(ParseError::HostContainsBrace));
    }

    #[test]
    fn test_parse_empty_segment() {
        assert_eq!(parse("/a//b"), Err(ParseError::EmptySegment));
        assert_eq!(parse("//a"), Err(ParseError::EmptySegment));
    }

    #[test]
    fn test_parse_wildcard_must_span_piece() {
        assert_eq!(parse("/a{id}"), Err(ParseError::WildcardNotAtStart));
        assert_eq!(parse("/{id}b"), Err(ParseError::WildcardUnclosed));
        assert_eq!(parse("/{id"), Err(ParseError::WildcardUnclosed));
    }

    #[test]
    fn test_parse_empty_wildcard_name() {
        assert_eq!(parse("/{}"), Err(ParseError::EmptyWildcardName));
        assert_eq!(parse("/{...}"), Err(ParseError::EmptyWildcardName));
    }

    #[test]
    fn test_parse_bad_wildcard_name() {
        assert_eq!(
            parse("/{1x}"),
            Err(ParseError::BadWildcardName("1x".to_string()))
        );
        assert_eq!(
            parse("/{a-b}"),
            Err(ParseError::BadWildcardName("a-b".to_string()))
        );
    }

    #[test]
    fn test_parse_duplicate_wildcard_name() {
        assert_eq!(
            parse("/{x}/{x}"),
            Err(ParseError::DuplicateWildcardName("x".to_string()))
        );
        assert_eq!(
            parse("/{x}/{x...}"),
            Err(ParseError::DuplicateWildcardName("x".to_string()))
        );
    }

    #[test]
    fn test_parse_exact_end_not_last() {
        assert_eq!(parse("/{$}/b"), Err(ParseError::ExactEndNotLast));
    }

    #[test]
    fn test_parse_catch_all_not_last() {
        assert_eq!(parse("/{rest...}/b"), Err(ParseError::CatchAllNotLast));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ParseError::Empty.to_string(), "empty pattern");
        assert_eq!(
            ParseError::BadWildcardName("a-b".to_string()).to_string(),
            "bad wildcard name \"a-b\""
        );
        assert_eq!(ParseError::ExactEndNotLast.to_string(), "{$} not at end");
        assert_eq!(
            ParseError::CatchAllNotLast.to_string(),
            "{...} wildcard not at end"
        );
    }
}
