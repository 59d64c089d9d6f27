/// Relationship analysis between pattern paths
///
/// Classifies the path-sets of two patterns by a single lockstep walk over
/// their segment lists. The walk is a pure function of the two shapes; it
/// decides containment over the infinite space of paths with one finite
/// pass and two booleans.
use std::fmt;

use crate::{Pattern, Segment};

use self::Relationship::*;

/// How the sets of paths matched by two patterns relate.
///
/// For patterns `p1.relation(&p2)`:
/// - [`MoreGeneral`](Relationship::MoreGeneral): `p1` matches every path
///   `p2` matches, and more;
/// - [`MoreSpecific`](Relationship::MoreSpecific): `p2` matches every path
///   `p1` matches, and more;
/// - [`Overlaps`](Relationship::Overlaps): some path matches both, but
///   neither contains the other;
/// - [`Equivalent`](Relationship::Equivalent): they match exactly the same
///   paths;
/// - [`Disjoint`](Relationship::Disjoint): no path matches both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    Disjoint,
    Equivalent,
    MoreSpecific,
    MoreGeneral,
    Overlaps,
}

impl Relationship {
    /// The same relationship seen from the other pattern's side.
    pub fn inverse(self) -> Relationship {
        match self {
            MoreSpecific => MoreGeneral,
            MoreGeneral => MoreSpecific,
            other => other,
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Disjoint => "disjoint",
            Equivalent => "equivalent",
            MoreSpecific => "moreSpecific",
            MoreGeneral => "moreGeneral",
            Overlaps => "overlaps",
        })
    }
}

impl Pattern {
    /// Classifies the relationship between this pattern's path-set and
    /// `other`'s.
    ///
    /// Host and method are not consulted here; callers compare those axes
    /// separately (see [`Pattern::higher_precedence`] and
    /// [`Pattern::conflicts_with`]).
    ///
    /// The walk tracks whether a single wildcard on either side ever faced
    /// a literal on the other: such a position is the one way a pattern can
    /// match strictly more than its counterpart while still matching
    /// everything the counterpart does.
    ///
    /// # Examples
    ///
    /// ```
    /// use rhtmx_mux::{Pattern, Relationship};
    ///
    /// let wild = Pattern::parse("/a/{x}").unwrap();
    /// let lit = Pattern::parse("/a/b").unwrap();
    /// assert_eq!(wild.relation(&lit), Relationship::MoreGeneral);
    /// assert_eq!(lit.relation(&wild), Relationship::MoreSpecific);
    /// ```
    pub fn relation(&self, other: &Pattern) -> Relationship {
        // A single wildcard in one pattern facing a literal in the other
        // means the wildcard side cannot be more specific.
        let mut wild1_over_lit2 = false;
        let mut wild2_over_lit1 = false;

        let mut segs1: &[Segment] = &self.segments;
        let mut segs2: &[Segment] = &other.segments;
        while let (Some(s1), Some(s2)) = (segs1.first(), segs2.first()) {
            match (s1, s2) {
                // Two catch-alls consume each other's remainders.
                (Segment::CatchAll(_), Segment::CatchAll(_)) => {}
                // p1's catch-all absorbs the rest of p2. p1 is more general
                // unless p2 already matched a p1 literal with a wildcard.
                (Segment::CatchAll(_), _) => {
                    return if wild2_over_lit1 { Overlaps } else { MoreGeneral };
                }
                (_, Segment::CatchAll(_)) => {
                    return if wild1_over_lit2 { Overlaps } else { MoreSpecific };
                }
                // Both end exactly here.
                (Segment::ExactEnd, Segment::ExactEnd) => {}
                // One ends exactly here and the other expects a path piece.
                (Segment::ExactEnd, _) | (_, Segment::ExactEnd) => return Disjoint,
                (Segment::Param(_), Segment::Param(_)) => {}
                (Segment::Param(_), Segment::Literal(_)) => wild1_over_lit2 = true,
                (Segment::Literal(_), Segment::Param(_)) => wild2_over_lit1 = true,
                (Segment::Literal(a), Segment::Literal(b)) => {
                    if a != b {
                        return Disjoint;
                    }
                }
            }
            segs1 = &segs1[1..];
            segs2 = &segs2[1..];
        }

        if segs1.is_empty() && segs2.is_empty() {
            return match (wild1_over_lit2, wild2_over_lit1) {
                (false, false) => Equivalent,
                (true, false) => MoreGeneral,
                (false, true) => MoreSpecific,
                (true, true) => Overlaps,
            };
        }
        // One pattern ran out of segments with the other still expecting
        // path pieces. Only a catch-all could absorb the leftover tail, and
        // those were handled in the loop.
        Disjoint
    }
}
