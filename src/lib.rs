//! # RHTMX Mux
//!
//! A routing-pattern library for HTTP-style request dispatch with support
//! for:
//! - Method and host constraints (`GET example.com/items`)
//! - Single-segment wildcards (`/items/{id}`)
//! - Multi-segment wildcards (`/docs/{rest...}`, trailing `/`)
//! - Exact-path anchors (`/items/{$}`)
//!
//! The interesting part is not matching one pattern but managing a set of
//! them: two registered patterns must never leave a request ambiguous.
//! [`PatternSet::register`] therefore analyzes the relationship between the
//! new pattern and every registered one, rejects equivalent or overlapping
//! patterns, and explains the rejection with concrete witness paths.
//! Matching itself runs over a trie keyed host → method → path pieces,
//! where the per-node preference (literal, then single wildcard, then
//! multi wildcard) reproduces the structural precedence order.
//!
//! ## Precedence
//!
//! When several patterns match a request, the winner is decided purely
//! structurally: a pattern with a host beats one without, then a pattern
//! with a method beats one without, then the more specific path wins.
//! Registration order plays no part.
//!
//! ## Example
//!
//! ```
//! use rhtmx_mux::{Pattern, PatternSet};
//!
//! let set = PatternSet::new();
//! set.register("/items/{id}".parse().unwrap()).unwrap();
//! set.register("GET /items/new".parse().unwrap()).unwrap();
//!
//! let hit = set.match_request("GET", "", "/items/42").unwrap();
//! assert_eq!(hit.pattern.to_string(), "/items/{id}");
//! assert_eq!(hit.bindings["id"], "42");
//!
//! // The literal pattern wins over the wildcard for its own path.
//! let hit = set.match_request("GET", "", "/items/new").unwrap();
//! assert_eq!(hit.pattern.to_string(), "GET /items/new");
//!
//! // Overlapping patterns are rejected with an explanation.
//! let err = set.register("/{section}/new".parse().unwrap()).unwrap_err();
//! assert!(err.to_string().contains("conflicts"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, trace, warn};

// ============================================================================
// Module Declarations
// ============================================================================

mod pattern;
mod relation;
mod segment;
mod trie;
mod witness;

pub use pattern::{ParseError, Pattern};
pub use relation::Relationship;
pub use segment::Segment;
pub use witness::describe_relationship;

use trie::Node;

// ============================================================================
// Core Types
// ============================================================================

/// A set of non-conflicting patterns with trie-based lookup.
///
/// Registration takes the write lock and lookups take the read lock, so
/// any number of lookups run concurrently while registrations serialize.
/// Patterns are owned by the set once registered; trie leaves share them.
#[derive(Debug, Default)]
pub struct PatternSet {
    inner: RwLock<SetInner>,
}

#[derive(Debug, Default)]
struct SetInner {
    patterns: Vec<RegisteredPattern>,
    tree: Node,
}

#[derive(Debug)]
struct RegisteredPattern {
    pattern: Arc<Pattern>,
    location: &'static Location<'static>,
}

/// A successful lookup: the winning pattern and its wildcard bindings.
#[derive(Debug, Clone)]
pub struct PatternMatch {
    /// The highest-precedence pattern matching the request.
    pub pattern: Arc<Pattern>,
    /// Wildcard name → matched path content. Single wildcards bind one
    /// piece; multi wildcards bind the joined remainder, possibly empty.
    pub bindings: HashMap<String, String>,
}

/// A rejected registration: the new pattern conflicts with a registered
/// one.
///
/// The message names both patterns, where each was registered, and the
/// witness-backed description of how their paths collide. The set is
/// unchanged.
#[derive(Error, Debug, Clone)]
#[error(
    "pattern \"{pattern}\" (registered at {location}) conflicts with \
     pattern \"{existing}\" (registered at {existing_location}):\n{description}"
)]
pub struct ConflictError {
    pattern: String,
    location: String,
    existing: String,
    existing_location: String,
    description: String,
}

impl ConflictError {
    /// The pattern whose registration was rejected.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The previously registered pattern it collides with.
    pub fn existing(&self) -> &str {
        &self.existing
    }

    /// The witness-backed explanation of the collision.
    pub fn description(&self) -> &str {
        &self.description
    }
}

// ============================================================================
// PatternSet Implementation
// ============================================================================

impl PatternSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pattern, rejecting it if it conflicts with any pattern
    /// already in the set.
    ///
    /// Two patterns conflict when some request matches both and neither
    /// has higher precedence; registering both would make dispatch
    /// ambiguous. On rejection the set is unchanged and the error carries
    /// a full explanation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_mux::PatternSet;
    ///
    /// let set = PatternSet::new();
    /// set.register("/x/{a}".parse().unwrap()).unwrap();
    ///
    /// let err = set.register("/x/{b}".parse().unwrap()).unwrap_err();
    /// assert_eq!(err.pattern(), "/x/{b}");
    /// assert_eq!(err.existing(), "/x/{a}");
    /// ```
    #[track_caller]
    pub fn register(&self, pattern: Pattern) -> Result<(), ConflictError> {
        let location = Location::caller();
        let mut inner = self.inner.write();
        for existing in &inner.patterns {
            if pattern.conflicts_with(&existing.pattern) {
                let err = ConflictError {
                    pattern: pattern.to_string(),
                    location: format!("{}:{}", location.file(), location.line()),
                    existing: existing.pattern.to_string(),
                    existing_location: format!(
                        "{}:{}",
                        existing.location.file(),
                        existing.location.line()
                    ),
                    description: witness::describe(&pattern, &existing.pattern),
                };
                warn!(
                    pattern = %pattern,
                    existing = %existing.pattern,
                    "rejected conflicting pattern"
                );
                return Err(err);
            }
        }
        let pattern = Arc::new(pattern);
        inner.tree.add_pattern(&pattern);
        debug!(pattern = %pattern, "registered pattern");
        inner.patterns.push(RegisteredPattern { pattern, location });
        Ok(())
    }

    /// Matches a request's method, host, and path against the set.
    ///
    /// Returns the highest-precedence matching pattern together with its
    /// wildcard bindings, or `None` when nothing matches. An empty method
    /// or host matches only the patterns that leave that axis
    /// unconstrained.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_mux::PatternSet;
    ///
    /// let set = PatternSet::new();
    /// set.register("POST /items/{rest...}".parse().unwrap()).unwrap();
    ///
    /// let hit = set.match_request("POST", "", "/items/a/b").unwrap();
    /// assert_eq!(hit.bindings["rest"], "a/b");
    ///
    /// assert!(set.match_request("GET", "", "/items/a/b").is_none());
    /// ```
    pub fn match_request(&self, method: &str, host: &str, path: &str) -> Option<PatternMatch> {
        let inner = self.inner.read();
        let (pattern, matches) = inner.tree.lookup(method, host, path)?;
        trace!(method, host, path, pattern = %pattern, "matched pattern");
        Some(PatternMatch {
            bindings: pattern.bind(&matches),
            pattern: Arc::clone(pattern),
        })
    }

    /// The number of registered patterns.
    pub fn len(&self) -> usize {
        self.inner.read().patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for PatternSet {
    /// Lists the registered patterns in registration order, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.inner.read().patterns {
            writeln!(f, "{}", entry.pattern)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pat(s: &str) -> Pattern {
        Pattern::parse(s).unwrap()
    }

    #[test]
    fn test_register_and_match() {
        let set = PatternSet::new();
        set.register(pat("/items/{id}")).unwrap();
        set.register(pat("/items/new")).unwrap();
        assert_eq!(set.len(), 2);

        let hit = set.match_request("", "", "/items/42").unwrap();
        assert_eq!(hit.pattern.to_string(), "/items/{id}");
        assert_eq!(hit.bindings["id"], "42");

        let hit = set.match_request("", "", "/items/new").unwrap();
        assert_eq!(hit.pattern.to_string(), "/items/new");
        assert!(hit.bindings.is_empty());
    }

    #[test]
    fn test_match_empty_set() {
        let set = PatternSet::new();
        assert!(set.is_empty());
        assert!(set.match_request("GET", "", "/items").is_none());
    }

    #[test]
    fn test_register_equivalent_conflict() {
        let set = PatternSet::new();
        set.register(pat("/x/{a}")).unwrap();
        let err = set.register(pat("/x/{b}")).unwrap_err();

        assert_eq!(err.pattern(), "/x/{b}");
        assert_eq!(err.existing(), "/x/{a}");
        assert!(err.description().contains("matches the same paths"));
        let message = err.to_string();
        assert!(message.contains("/x/{a}"));
        assert!(message.contains("/x/{b}"));

        // The set is unchanged by the failed registration.
        assert_eq!(set.len(), 1);
        let hit = set.match_request("", "", "/x/1").unwrap();
        assert_eq!(hit.pattern.to_string(), "/x/{a}");
    }

    #[test]
    fn test_register_overlap_conflict_describes_both_directions() {
        let set = PatternSet::new();
        set.register(pat("/a/{x}/c")).unwrap();
        let err = set.register(pat("/a/b/{y}")).unwrap_err();
        assert!(err.description().contains("/a/b/c"));
        assert!(err.description().contains("doesn't"));
    }

    #[test]
    fn test_register_dominated_patterns_coexist() {
        // One pattern strictly containing another is dominance, not a
        // conflict: the more specific one wins the paths they share.
        let set = PatternSet::new();
        set.register(pat("/a/{x...}")).unwrap();
        set.register(pat("/a/b/{y}")).unwrap();

        let hit = set.match_request("", "", "/a/b/c").unwrap();
        assert_eq!(hit.pattern.to_string(), "/a/b/{y}");
        assert_eq!(hit.bindings["y"], "c");

        let hit = set.match_request("", "", "/a/z").unwrap();
        assert_eq!(hit.pattern.to_string(), "/a/{x...}");
        assert_eq!(hit.bindings["x"], "z");
    }

    #[test]
    fn test_conflict_error_locations() {
        let set = PatternSet::new();
        set.register(pat("/x/{a}")).unwrap();
        let err = set.register(pat("/x/{b}")).unwrap_err();
        // Both registration sites are in this file.
        assert!(err.to_string().contains("lib.rs"));
    }

    #[test]
    fn test_display_lists_patterns() {
        let set = PatternSet::new();
        set.register(pat("/a")).unwrap();
        set.register(pat("GET /b")).unwrap();
        assert_eq!(set.to_string(), "/a\nGET /b\n");
    }
}
