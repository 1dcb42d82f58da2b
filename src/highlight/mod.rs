// WHY: Highlight segmentation engine - phrase annotations in, ordered plain/annotated runs out
// One pass per call: match every annotation, merge overlaps, render against the original text

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub mod classifier;
pub mod matcher;
pub mod merger;
pub mod renderer;

// Re-export core operations
pub use classifier::{classify, Category};
pub use matcher::{find_phrase_matches, MatchError};
pub use merger::merge_matches;
pub use renderer::render_segments;

/// Flagged phrase returned by the detection service
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Literal phrase to locate (wire name `text`)
    #[serde(rename = "text")]
    pub phrase: String,
    /// Free-form technique label, e.g. "Urgency / Time Pressure"
    pub technique: String,
    /// Explanation shown alongside the highlight; never used for matching
    pub reason: String,
}

impl Annotation {
    pub fn new(
        phrase: impl Into<String>,
        technique: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            phrase: phrase.into(),
            technique: technique.into(),
            reason: reason.into(),
        }
    }
}

/// One occurrence of one annotation's phrase, as byte offsets into the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch<'a> {
    pub start: usize,
    pub end: usize,
    pub technique: &'a str,
    /// Arrival position of the source annotation, used as the secondary sort key
    pub annotation_index: usize,
}

/// Maximal disjoint range covered by one or more touching/overlapping matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub start: usize,
    pub end: usize,
    pub technique: &'a str,
}

/// Displayable run of the input text, borrowed from the text and annotations
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderNode<'a> {
    Plain { text: &'a str },
    Annotated { text: &'a str, technique: &'a str },
}

impl<'a> RenderNode<'a> {
    /// Text slice covered by this node
    pub fn text(&self) -> &'a str {
        match *self {
            RenderNode::Plain { text } => text,
            RenderNode::Annotated { text, .. } => text,
        }
    }

    pub fn technique(&self) -> Option<&'a str> {
        match *self {
            RenderNode::Plain { .. } => None,
            RenderNode::Annotated { technique, .. } => Some(technique),
        }
    }

    /// Display category for annotated nodes
    pub fn category(&self) -> Option<Category> {
        self.technique().map(classify)
    }

    pub fn is_annotated(&self) -> bool {
        matches!(self, RenderNode::Annotated { .. })
    }
}

/// Result of a single render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendering<'a> {
    pub nodes: Vec<RenderNode<'a>>,
    pub annotations_total: usize,
    pub annotations_skipped: usize,
    pub matches_found: usize,
    pub segments_merged: usize,
}

impl<'a> Rendering<'a> {
    /// Concatenate node text; equals the input text for every render
    pub fn to_text(&self) -> String {
        self.nodes.iter().map(|node| node.text()).collect()
    }

    pub fn annotated_nodes(&self) -> impl Iterator<Item = &RenderNode<'a>> + '_ {
        self.nodes.iter().filter(|node| node.is_annotated())
    }
}

/// Stateless engine running match -> merge -> render over one text
#[derive(Debug, Default, Clone, Copy)]
pub struct HighlightEngine;

impl HighlightEngine {
    pub fn new() -> Self {
        Self
    }

    /// Render `text` with every annotation's occurrences highlighted
    /// WHY: a bad annotation is skipped so the remaining highlights still display
    pub fn render<'a>(&self, text: &'a str, annotations: &'a [Annotation]) -> Rendering<'a> {
        let mut matches = Vec::new();
        let mut skipped = 0;

        for (index, annotation) in annotations.iter().enumerate() {
            match find_phrase_matches(text, annotation, index) {
                Ok(found) => {
                    debug!(
                        phrase = %annotation.phrase,
                        technique = %annotation.technique,
                        occurrences = found.len(),
                        "Matched annotation"
                    );
                    matches.extend(found);
                }
                Err(e) => {
                    warn!(index, technique = %annotation.technique, "Skipping annotation: {}", e);
                    skipped += 1;
                }
            }
        }

        let matches_found = matches.len();
        let segments = merge_matches(matches);
        let segments_merged = segments.len();
        let nodes = render_segments(text, &segments);

        debug!(
            matches_found,
            segments_merged,
            nodes = nodes.len(),
            "Render pass complete"
        );

        Rendering {
            nodes,
            annotations_total: annotations.len(),
            annotations_skipped: skipped,
            matches_found,
            segments_merged,
        }
    }
}

/// Convenience wrapper returning only the node sequence
pub fn render_highlights<'a>(text: &'a str, annotations: &'a [Annotation]) -> Vec<RenderNode<'a>> {
    HighlightEngine::new().render(text, annotations).nodes
}
