/// Witness paths and relationship descriptions
///
/// Relationship claims are abstract ("these two patterns overlap"); the
/// functions here make them concrete by producing example paths that
/// demonstrate the claim. The registration conflict error and
/// [`describe_relationship`] are built from these witnesses.
use crate::{ParseError, Pattern, Relationship, Segment};

/// Parses both pattern strings and describes how their paths relate, in
/// prose backed by witness paths.
///
/// # Examples
///
/// ```
/// use rhtmx_mux::describe_relationship;
///
/// let d = describe_relationship("/a/{x}", "/a/b").unwrap();
/// assert!(d.contains("more general"));
/// ```
pub fn describe_relationship(pat1: &str, pat2: &str) -> Result<String, ParseError> {
    let p1 = Pattern::parse(pat1)?;
    let p2 = Pattern::parse(pat2)?;
    Ok(describe(&p1, &p2))
}

/// Renders the relationship between two parsed patterns, including witness
/// paths for every non-trivial case.
pub(crate) fn describe(p1: &Pattern, p2: &Pattern) -> String {
    match p1.relation(p2) {
        Relationship::Disjoint => {
            format!("{} has no paths in common with {}.", p1, p2)
        }
        Relationship::Equivalent => {
            format!("{} matches the same paths as {}.", p1, p2)
        }
        Relationship::MoreSpecific => {
            let over = matching_path(p1);
            let diff = difference_path(p2, p1);
            format!(
                "{} is more specific than {}.\nBoth match {:?}.\nOnly {} matches {:?}.",
                p1, p2, over, p2, diff
            )
        }
        Relationship::MoreGeneral => {
            let over = matching_path(p2);
            let diff = difference_path(p1, p2);
            format!(
                "{} is more general than {}.\nBoth match {:?}.\nOnly {} matches {:?}.",
                p1, p2, over, p1, diff
            )
        }
        Relationship::Overlaps => {
            format!(
                "{} and {} both match some paths, like {:?}.\n\
                 But neither is more specific than the other.\n\
                 {} matches {:?}, but {} doesn't.\n\
                 {} matches {:?}, but {} doesn't.",
                p1,
                p2,
                overlap_path(p1, p2),
                p1,
                difference_path(p1, p2),
                p2,
                p2,
                difference_path(p2, p1),
                p1
            )
        }
    }
}

/// Returns a concrete path matched by `p`.
///
/// Literals stand for themselves; a single wildcard's position is filled
/// with its own name (any piece would do); catch-alls and the `{$}` marker
/// contribute only their slash.
pub(crate) fn matching_path(p: &Pattern) -> String {
    let mut out = String::new();
    write_matching_path(&mut out, p.segments());
    out
}

fn write_matching_path(out: &mut String, segs: &[Segment]) {
    for seg in segs {
        write_segment(out, seg);
    }
}

fn write_segment(out: &mut String, seg: &Segment) {
    out.push('/');
    match seg {
        Segment::Literal(s) | Segment::Param(s) => out.push_str(s),
        Segment::CatchAll(_) | Segment::ExactEnd => {}
    }
}

/// Returns a path that both patterns match.
///
/// Assumes the patterns are not disjoint: at each position a wildcard on
/// one side defers to the other side's segment, and any leftover tail is
/// filled in with content of its own.
pub(crate) fn overlap_path(p1: &Pattern, p2: &Pattern) -> String {
    let mut out = String::new();
    let mut segs1 = p1.segments();
    let mut segs2 = p2.segments();
    while let (Some(s1), Some(s2)) = (segs1.first(), segs2.first()) {
        if s1.is_wildcard() {
            write_segment(&mut out, s2);
        } else {
            write_segment(&mut out, s1);
        }
        segs1 = &segs1[1..];
        segs2 = &segs2[1..];
    }
    if !segs1.is_empty() {
        write_matching_path(&mut out, segs1);
    } else if !segs2.is_empty() {
        write_matching_path(&mut out, segs2);
    }
    out
}

/// Returns a path that `p1` matches and `p2` does not.
///
/// Assumes such a path exists, i.e. `p1.relation(p2)` is `MoreGeneral` or
/// `Overlaps`.
pub(crate) fn difference_path(p1: &Pattern, p2: &Pattern) -> String {
    let mut out = String::new();
    let mut segs1 = p1.segments();
    let mut segs2 = p2.segments();
    while let (Some(s1), Some(s2)) = (segs1.first(), segs2.first()) {
        match (s1, s2) {
            (Segment::CatchAll(_), Segment::CatchAll(_)) => {
                // From here on the patterns match the same paths, so the
                // difference was found earlier.
                out.push('/');
                return out;
            }
            (Segment::CatchAll(name), other) => {
                // p1 ends in a catch-all and p2 does not. A trailing slash
                // distinguishes them, unless p2 ends in "{$}", in which
                // case any piece will do; prefer the catch-all's name.
                out.push('/');
                if matches!(other, Segment::ExactEnd) {
                    if name.is_empty() {
                        out.push('x');
                    } else {
                        out.push_str(name);
                    }
                }
                return out;
            }
            (other, Segment::CatchAll(_)) => write_segment(&mut out, other),
            (Segment::Param(_), Segment::Param(_)) => {
                // Both sides match whatever goes here; use p1's name.
                write_segment(&mut out, s1);
            }
            (Segment::Param(name), Segment::Literal(lit)) => {
                // Any piece other than the literal works. Prefer the
                // wildcard's name, tweaking it when it collides.
                if name != lit {
                    write_segment(&mut out, s1);
                } else {
                    out.push('/');
                    out.push_str(lit);
                    out.push('x');
                }
            }
            (Segment::Literal(_), Segment::Param(_)) => write_segment(&mut out, s1),
            (Segment::Literal(a), Segment::Literal(b)) => {
                // Overlapping patterns can only agree on equal literals.
                debug_assert_eq!(a, b, "difference requested for disjoint patterns");
                write_segment(&mut out, s1);
            }
            (Segment::ExactEnd, Segment::ExactEnd) => write_segment(&mut out, s1),
            (Segment::ExactEnd, _) | (_, Segment::ExactEnd) => {
                debug_assert!(false, "difference requested for disjoint patterns");
                write_segment(&mut out, s1);
            }
        }
        segs1 = &segs1[1..];
        segs2 = &segs2[1..];
    }
    if !segs1.is_empty() {
        // p1 is longer than p2 and p2 does not end in a catch-all, so
        // anything matching the rest of p1 will do.
        write_matching_path(&mut out, segs1);
    } else if !segs2.is_empty() {
        write_matching_path(&mut out, segs2);
    }
    out
}
