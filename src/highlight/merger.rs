// WHY: collapse matches from all annotations into disjoint, sorted segments in O(M log M)

use super::{PhraseMatch, Segment};

/// Merge touching or overlapping matches into the minimal set of disjoint segments
///
/// Matches are sorted by `(start, annotation_index)`, so among matches that start
/// together the earliest-arriving annotation opens the segment. A segment keeps
/// the technique of the match that opened it; later contributors only extend `end`.
pub fn merge_matches(mut matches: Vec<PhraseMatch<'_>>) -> Vec<Segment<'_>> {
    matches.sort_by_key(|m| (m.start, m.annotation_index));

    let mut iter = matches.into_iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut segments = Vec::new();
    let mut current = Segment {
        start: first.start,
        end: first.end,
        technique: first.technique,
    };

    for m in iter {
        // Half-open ranges: a match starting exactly at `current.end` still touches
        if m.start <= current.end {
            current.end = current.end.max(m.end);
        } else {
            segments.push(current);
            current = Segment {
                start: m.start,
                end: m.end,
                technique: m.technique,
            };
        }
    }
    segments.push(current);

    segments
}
