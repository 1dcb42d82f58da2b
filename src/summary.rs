// WHY: the summary panel shown next to highlighted text
// Headlines, per-highlight rows, and "why these cues matter" notes keyed by category

use serde::Serialize;

use crate::client::AnalysisResponse;
use crate::highlight::{classify, Category};

/// Explanatory note for one category present in the detected techniques
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WhyItMatters {
    pub category: Category,
    pub title: &'static str,
    pub text: &'static str,
}

const WHY_IT_MATTERS: [WhyItMatters; 3] = [
    WhyItMatters {
        category: Category::Urgency,
        title: "Why urgency can reduce reflection",
        text: "Time pressure cues like \"act now\" or \"limited time\" can trigger immediate \
               responses, bypassing careful consideration. This urgency can make readers feel \
               they must decide quickly, potentially reducing their ability to fully evaluate \
               information or consider alternatives.",
    },
    WhyItMatters {
        category: Category::Emotional,
        title: "Why emotional framing can heighten reactions",
        text: "Language that appeals to emotions, whether fear, excitement, or outrage, can \
               amplify readers' responses. Emotional framing can make content feel more \
               compelling or urgent than it might be, potentially overriding logical analysis \
               and leading to more reactive decision-making.",
    },
    WhyItMatters {
        category: Category::Absolute,
        title: "Why absolute language can limit nuance",
        text: "Words like \"always,\" \"never,\" or \"all\" present ideas as definitive and \
               unchanging. This can oversimplify complex topics, making nuanced discussions \
               difficult. Absolute language can create false dichotomies and discourage readers \
               from considering middle ground or alternative perspectives.",
    },
];

/// One row of the highlights list
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HighlightRow<'a> {
    pub phrase: &'a str,
    pub technique: &'a str,
    pub reason: &'a str,
    pub category: Category,
}

/// Technique with its display category
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TechniqueTag<'a> {
    pub technique: &'a str,
    pub category: Category,
}

/// Summary derived from an analysis response
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TechniqueSummary<'a> {
    pub techniques_headline: String,
    pub techniques: Vec<TechniqueTag<'a>>,
    pub highlights_headline: String,
    pub highlights: Vec<HighlightRow<'a>>,
    pub why_it_matters: Vec<WhyItMatters>,
    pub perception_explanation: &'a str,
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Notes for every category present among `techniques`, in fixed category order
pub fn why_it_matters<S: AsRef<str>>(techniques: &[S]) -> Vec<WhyItMatters> {
    WHY_IT_MATTERS
        .iter()
        .filter(|note| techniques.iter().any(|t| classify(t.as_ref()) == note.category))
        .cloned()
        .collect()
}

/// Build the summary panel for a response
pub fn summarize(analysis: &AnalysisResponse) -> TechniqueSummary<'_> {
    let technique_count = analysis.detected_techniques.len();
    let techniques_headline = if technique_count > 0 {
        format!("Detected {}", plural(technique_count, "technique"))
    } else {
        "Detected techniques".to_string()
    };

    let highlight_count = analysis.highlights.len();
    let highlights_headline = if highlight_count > 0 {
        format!("Detected {}", plural(highlight_count, "instance"))
    } else {
        "Highlights".to_string()
    };

    TechniqueSummary {
        techniques_headline,
        techniques: analysis
            .detected_techniques
            .iter()
            .map(|t| TechniqueTag {
                technique: t,
                category: classify(t),
            })
            .collect(),
        highlights_headline,
        highlights: analysis
            .highlights
            .iter()
            .map(|h| HighlightRow {
                phrase: &h.phrase,
                technique: &h.technique,
                reason: &h.reason,
                category: classify(&h.technique),
            })
            .collect(),
        why_it_matters: why_it_matters(analysis.detected_techniques.as_slice()),
        perception_explanation: &analysis.perception_explanation,
    }
}
