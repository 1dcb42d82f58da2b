// WHY: boundaries come straight from segment offsets; nothing is re-searched here
// Concatenating the emitted slices reproduces the input text exactly

use super::{RenderNode, Segment};

/// Partition `text` into alternating plain and annotated runs
///
/// `segments` must be disjoint and sorted by `start`, as produced by
/// [`merge_matches`](super::merge_matches).
pub fn render_segments<'a>(text: &'a str, segments: &[Segment<'a>]) -> Vec<RenderNode<'a>> {
    let mut nodes = Vec::with_capacity(segments.len() * 2 + 1);
    let mut last_end = 0;

    for segment in segments {
        debug_assert!(segment.start >= last_end, "segments must be disjoint and sorted");
        if segment.start > last_end {
            nodes.push(RenderNode::Plain {
                text: &text[last_end..segment.start],
            });
        }
        nodes.push(RenderNode::Annotated {
            text: &text[segment.start..segment.end],
            technique: segment.technique,
        });
        last_end = segment.end;
    }

    if last_end < text.len() {
        nodes.push(RenderNode::Plain {
            text: &text[last_end..],
        });
    }

    nodes
}
