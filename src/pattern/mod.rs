/// Route patterns: parsing, display, precedence, and conflict checks
///
/// A [`Pattern`] is the parsed form of a `[METHOD ' '][HOST]/PATH` template.
/// Patterns are immutable after parsing; every question about them
/// (precedence, conflicts, relationship) is answered by pure comparison of
/// their segment lists.
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::{Relationship, Segment};

pub mod parser;

pub use parser::ParseError;

/// A parsed routing pattern: an optional method, an optional host, and a
/// non-empty list of path segments.
///
/// # Examples
///
/// ```
/// use rhtmx_mux::Pattern;
///
/// let p = Pattern::parse("GET example.com/items/{id}").unwrap();
/// assert_eq!(p.method(), "GET");
/// assert_eq!(p.host(), "example.com");
///
/// // Patterns round-trip through their display form.
/// let again = Pattern::parse(&p.to_string()).unwrap();
/// assert_eq!(p, again);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub(crate) method: String,
    pub(crate) host: String,
    pub(crate) segments: Vec<Segment>,
}

impl Pattern {
    /// Parses a pattern string.
    ///
    /// The syntax is `[METHOD ' '][HOST]/PATH`:
    /// - `METHOD` is one of the eight standard HTTP method names, exact case;
    /// - `HOST` is any string without `{`, up to the first `/`;
    /// - `PATH` is `/`-separated pieces, each a literal or one of the
    ///   wildcards `{name}`, `{name...}` (last piece only), `{$}` (last piece
    ///   only). A trailing `/` matches any suffix.
    ///
    /// Wildcard names must be valid identifiers and unique within the
    /// pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_mux::Pattern;
    ///
    /// assert!(Pattern::parse("/items/{id}").is_ok());
    /// assert!(Pattern::parse("POST /items/{rest...}").is_ok());
    /// assert!(Pattern::parse("/a/{$}").is_ok());
    ///
    /// assert!(Pattern::parse("").is_err());
    /// assert!(Pattern::parse("FETCH /items").is_err());
    /// assert!(Pattern::parse("/{x}/{x}").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Pattern, ParseError> {
        parser::parse(s)
    }

    /// The pattern's method, or `""` when it matches any method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The pattern's host, or `""` when it matches any host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The pattern's path segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Reports whether this pattern wins over `other` when both match a
    /// request.
    ///
    /// Precedence is purely structural, decided in order:
    /// 1. a pattern with a host wins over one without;
    /// 2. a pattern with a method wins over one without;
    /// 3. the pattern whose path is more specific wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_mux::Pattern;
    ///
    /// let literal = Pattern::parse("/a/b").unwrap();
    /// let wild = Pattern::parse("/a/{x}").unwrap();
    /// assert!(literal.higher_precedence(&wild));
    /// assert!(!wild.higher_precedence(&literal));
    /// ```
    pub fn higher_precedence(&self, other: &Pattern) -> bool {
        if self.host.is_empty() != other.host.is_empty() {
            return !self.host.is_empty();
        }
        if self.method.is_empty() != other.method.is_empty() {
            return !self.method.is_empty();
        }
        self.relation(other) == Relationship::MoreSpecific
    }

    /// Reports whether some request matches both patterns with neither
    /// taking precedence over the other.
    ///
    /// Patterns with different hosts or different methods never conflict:
    /// either they are disjoint on that axis, or one dominates by precedence
    /// rules 1–2. Otherwise the patterns conflict exactly when their paths
    /// are equivalent or overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_mux::Pattern;
    ///
    /// let p1 = Pattern::parse("/a/{x}/c").unwrap();
    /// let p2 = Pattern::parse("/a/b/{y}").unwrap();
    /// assert!(p1.conflicts_with(&p2));
    ///
    /// let narrower = Pattern::parse("/a/b").unwrap();
    /// assert!(!narrower.conflicts_with(&p2));
    /// ```
    pub fn conflicts_with(&self, other: &Pattern) -> bool {
        if self.host != other.host || self.method != other.method {
            return false;
        }
        matches!(
            self.relation(other),
            Relationship::Equivalent | Relationship::Overlaps
        )
    }

    /// Builds the wildcard bindings for a successful match.
    ///
    /// `matches` holds the matched substrings in the order binding wildcards
    /// appear in the pattern, as accumulated by the trie walk.
    pub(crate) fn bind(&self, matches: &[String]) -> HashMap<String, String> {
        let mut bindings = HashMap::with_capacity(matches.len());
        let mut next = 0;
        for seg in &self.segments {
            if let Some(name) = seg.wildcard_name() {
                bindings.insert(name.to_string(), matches[next].clone());
                next += 1;
            }
        }
        bindings
    }
}

impl fmt::Display for Pattern {
    /// Writes the pattern in surface syntax; the output reparses to an
    /// equal pattern.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.method.is_empty() {
            write!(f, "{} ", self.method)?;
        }
        f.write_str(&self.host)?;
        for seg in &self.segments {
            write!(f, "{}", seg)?;
        }
        Ok(())
    }
}

impl FromStr for Pattern {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::parse(s)
    }
}
