#![allow(dead_code)]

// Test fixtures with known articles, detection responses, and expected renditions
// WHY: Golden-file testing requires deterministic input/output pairs for validation

/// Short promotional text with urgency, emotional, and absolute cues
pub const PROMO_TEXT: &str = "Act now before it's too late! This shocking offer is the best deal ever, and it will never come back. Act NOW.";

/// Detection response for PROMO_TEXT, in the service wire format
pub const PROMO_ANALYSIS: &str = r#"{
  "highlights": [
    {"text": "act now", "technique": "Urgency", "reason": "Creates time pressure that may reduce reflection"},
    {"text": "before it's too late", "technique": "Urgency", "reason": "Creates time pressure that may reduce reflection"},
    {"text": "shocking", "technique": "Emotional Framing", "reason": "Uses emotionally charged language to amplify emotional response"},
    {"text": "best", "technique": "Absolute Language", "reason": "Presents statements as universal or unquestionable"},
    {"text": "never", "technique": "Absolute Language", "reason": "Presents statements as universal or unquestionable"}
  ],
  "detected_techniques": ["Urgency", "Emotional Framing", "Absolute Language"],
  "perception_explanation": "The content uses specific language patterns that may influence how it is perceived."
}"#;

/// Expected text rendition of PROMO_TEXT (node line only)
pub const PROMO_MARKED: &str = "[[Act now|Urgency]] [[before it's too late|Urgency]]! This [[shocking|Emotional Framing]] offer is the [[best|Absolute Language]] deal ever, and it will [[never|Absolute Language]] come back. [[Act NOW|Urgency]].";

/// Neutral text with nothing flagged
pub const NEUTRAL_TEXT: &str = "The committee met on Tuesday to review the quarterly budget.";

/// Detection response with no highlights
pub const EMPTY_ANALYSIS: &str = r#"{
  "highlights": [],
  "detected_techniques": [],
  "perception_explanation": "No strong emotional or framing language patterns were detected."
}"#;

/// Text whose flagged phrases contain pattern metacharacters
pub const PUNCTUATION_TEXT: &str = "Only today: 50% off (limited)! Prices [*] may vary... 50% off limited.";

pub const PUNCTUATION_ANALYSIS: &str = r#"{
  "highlights": [
    {"text": "50% off (limited)", "technique": "Urgency", "reason": "Scarcity framing"},
    {"text": "[*]", "technique": "Other", "reason": "Footnote marker"},
    {"text": "...", "technique": "Other", "reason": "Trailing ellipsis"}
  ],
  "detected_techniques": ["Urgency"],
  "perception_explanation": ""
}"#;
