/// Segment types for route patterns
///
/// A parsed pattern's path is a sequence of segments. The comparison
/// primitives here are the building blocks for the relationship analyzer
/// and the matching trie; they are all pure functions on the segment shape.
use std::fmt;

/// One element of a pattern's path.
///
/// The internal representation differs from the surface syntax in two ways
/// that make the matching and comparison algorithms simpler:
/// - a path ending in `/` is stored with a final anonymous [`Segment::CatchAll`];
/// - a path ending in `{$}` is stored with a final [`Segment::ExactEnd`].
///
/// # Examples
///
/// ```
/// use rhtmx_mux::{Pattern, Segment};
///
/// let p = Pattern::parse("/items/{id}/{rest...}").unwrap();
/// assert_eq!(
///     p.segments(),
///     &[
///         Segment::Literal("items".to_string()),
///         Segment::Param("id".to_string()),
///         Segment::CatchAll("rest".to_string()),
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text: matches exactly one path piece equal to it.
    Literal(String),
    /// Single-segment wildcard `{name}`: matches exactly one path piece and
    /// binds it to `name`.
    Param(String),
    /// Multi-segment wildcard `{name...}`: matches all remaining path pieces
    /// joined by `/`, possibly none. An empty name is the internal form of a
    /// trailing slash; it matches the rest of the path without binding.
    CatchAll(String),
    /// The `{$}` marker: matches only the empty tail after a trailing slash,
    /// anchoring an exact-path pattern.
    ExactEnd,
}

impl Segment {
    /// Whether this segment matches path content it does not spell out.
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Param(_) | Segment::CatchAll(_))
    }

    /// Whether this segment consumes all remaining path pieces.
    pub fn is_catch_all(&self) -> bool {
        matches!(self, Segment::CatchAll(_))
    }

    /// The name this segment binds matched content to, if any.
    ///
    /// Anonymous catch-alls (the trailing-slash form) match without binding.
    pub fn wildcard_name(&self) -> Option<&str> {
        match self {
            Segment::Param(name) => Some(name),
            Segment::CatchAll(name) if !name.is_empty() => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    /// Writes the segment back in surface syntax, leading `/` included.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(s) => write!(f, "/{}", s),
            Segment::Param(name) => write!(f, "/{{{}}}", name),
            Segment::CatchAll(name) if name.is_empty() => f.write_str("/"),
            Segment::CatchAll(name) => write!(f, "/{{{}...}}", name),
            Segment::ExactEnd => f.write_str("/{$}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_literal() {
        assert_eq!(Segment::Literal("items".to_string()).to_string(), "/items");
    }

    #[test]
    fn test_display_param() {
        assert_eq!(Segment::Param("id".to_string()).to_string(), "/{id}");
    }

    #[test]
    fn test_display_catch_all() {
        assert_eq!(
            Segment::CatchAll("rest".to_string()).to_string(),
            "/{rest...}"
        );
        assert_eq!(Segment::CatchAll(String::new()).to_string(), "/");
    }

    #[test]
    fn test_display_exact_end() {
        assert_eq!(Segment::ExactEnd.to_string(), "/{$}");
    }

    #[test]
    fn test_is_wildcard() {
        assert!(Segment::Param("id".to_string()).is_wildcard());
        assert!(Segment::CatchAll(String::new()).is_wildcard());
        assert!(!Segment::Literal("items".to_string()).is_wildcard());
        assert!(!Segment::ExactEnd.is_wildcard());
    }

    #[test]
    fn test_wildcard_name() {
        assert_eq!(
            Segment::Param("id".to_string()).wildcard_name(),
            Some("id")
        );
        assert_eq!(
            Segment::CatchAll("rest".to_string()).wildcard_name(),
            Some("rest")
        );
        // Trailing-slash catch-all matches without binding.
        assert_eq!(Segment::CatchAll(String::new()).wildcard_name(), None);
        assert_eq!(Segment::Literal("x".to_string()).wildcard_name(), None);
        assert_eq!(Segment::ExactEnd.wildcard_name(), None);
    }
}
