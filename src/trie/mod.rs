/// Matching trie over host, method, and path segments
///
/// The first two levels of the tree are keyed by host and method; the
/// levels below walk the path one piece at a time. Three child slots carry
/// special keys: `""` holds the single-wildcard child (also the "no host" /
/// "no method" child on the first two levels), `"*"` holds the
/// multi-wildcard child, and `"/"` holds the exact-end child produced by
/// `{$}`. Lookup prefers literal children, then the single wildcard, then
/// the multi wildcard, which is exactly the structural precedence order
/// along any one branch.
use std::sync::Arc;

use crate::{Pattern, Segment};

mod mapping;

use mapping::Mapping;

#[derive(Debug, Default)]
pub(crate) struct Node {
    /// Interior children, including the `"*"` and `"/"` specials.
    children: Mapping<String, Node>,
    /// Child keyed by the empty string: the single-wildcard child, or the
    /// any-host / any-method child on the first two levels.
    empty_child: Option<Box<Node>>,
    /// The pattern terminating at this node, if any. Leaves share ownership
    /// with the registry that the set keeps.
    pattern: Option<Arc<Pattern>>,
}

/// Splits the leading piece off a `/`-prefixed path.
///
/// A bare `"/"` yields the exact-end marker; otherwise the piece between
/// the leading slash and the next one is returned together with the rest
/// of the path (still `/`-prefixed, or empty).
fn next_segment(path: &str) -> (&str, &str) {
    if path == "/" {
        return ("/", "");
    }
    let path = path.strip_prefix('/').unwrap_or(path);
    match path.find('/') {
        Some(slash) => path.split_at(slash),
        None => (path, ""),
    }
}

impl Node {
    /// Inserts a pattern, descending host, then method, then the path
    /// segments. The caller has already rejected conflicting patterns, so
    /// the leaf this walk reaches is free.
    pub(crate) fn add_pattern(&mut self, pat: &Arc<Pattern>) {
        let node = self.add_child(pat.host()).add_child(pat.method());
        node.add_segments(pat.segments(), pat);
    }

    fn add_segments(&mut self, segs: &[Segment], pat: &Arc<Pattern>) {
        let Some((seg, rest)) = segs.split_first() else {
            debug_assert!(self.pattern.is_none(), "terminal already occupied");
            self.pattern = Some(Arc::clone(pat));
            return;
        };
        match seg {
            Segment::CatchAll(_) => {
                debug_assert!(rest.is_empty(), "catch-all not in last position");
                let child = self.add_child("*");
                debug_assert!(child.pattern.is_none(), "terminal already occupied");
                child.pattern = Some(Arc::clone(pat));
            }
            Segment::Param(_) => self.add_child("").add_segments(rest, pat),
            Segment::Literal(s) => self.add_child(s).add_segments(rest, pat),
            Segment::ExactEnd => self.add_child("/").add_segments(rest, pat),
        }
    }

    fn add_child(&mut self, key: &str) -> &mut Node {
        if key.is_empty() {
            let child = self.empty_child.get_or_insert_with(Box::default);
            return &mut **child;
        }
        self.children.get_or_insert_with(key.to_string(), Node::default)
    }

    /// Finds the highest-precedence pattern matching the request, along
    /// with the wildcard matches accumulated on the way to it.
    pub(crate) fn lookup(
        &self,
        method: &str,
        host: &str,
        path: &str,
    ) -> Option<(&Arc<Pattern>, Vec<String>)> {
        if !host.is_empty() {
            if let Some(child) = self.children.get(host) {
                if let Some(hit) = child.lookup_method_and_path(method, path) {
                    return Some(hit);
                }
            }
        }
        self.empty_child
            .as_ref()?
            .lookup_method_and_path(method, path)
    }

    fn lookup_method_and_path(
        &self,
        method: &str,
        path: &str,
    ) -> Option<(&Arc<Pattern>, Vec<String>)> {
        if !method.is_empty() {
            if let Some(child) = self.children.get(method) {
                let mut matches = Vec::new();
                if let Some(pat) = child.lookup_path(path, &mut matches) {
                    return Some((pat, matches));
                }
            }
        }
        let child = self.empty_child.as_ref()?;
        let mut matches = Vec::new();
        let pat = child.lookup_path(path, &mut matches)?;
        Some((pat, matches))
    }

    fn lookup_path<'n>(&'n self, path: &str, matches: &mut Vec<String>) -> Option<&'n Arc<Pattern>> {
        if path.is_empty() {
            // End of the path: this node's terminal, if it has one.
            return self.pattern.as_ref();
        }
        let (seg, rest) = next_segment(path);
        if let Some(child) = self.children.get(seg) {
            if let Some(pat) = child.lookup_path(rest, matches) {
                return Some(pat);
            }
        }
        // Single wildcard consumes this piece.
        if let Some(child) = &self.empty_child {
            matches.push(seg.to_string());
            if let Some(pat) = child.lookup_path(rest, matches) {
                return Some(pat);
            }
            matches.pop();
        }
        // Multi wildcard consumes everything left.
        if let Some(child) = self.children.get("*") {
            if let Some(pat) = child.pattern.as_ref() {
                matches.push(path.strip_prefix('/').unwrap_or(path).to_string());
                return Some(pat);
            }
        }
        None
    }
}
