use serde::Serialize;

/// Fixed display grouping for free-form technique labels
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Urgency,
    Emotional,
    Absolute,
    Neutral,
}

/// Keywords checked in order; first containment wins
const CATEGORY_KEYWORDS: [(&str, Category); 3] = [
    ("urgency", Category::Urgency),
    ("emotional", Category::Emotional),
    ("absolute", Category::Absolute),
];

impl Category {
    /// Class name used when marking up annotated text (empty for neutral)
    pub fn css_class(&self) -> &'static str {
        match self {
            Category::Urgency => "urgency",
            Category::Emotional => "emotional",
            Category::Absolute => "absolute",
            Category::Neutral => "",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Urgency => "Urgency & Time Pressure",
            Category::Emotional => "Emotional Framing",
            Category::Absolute => "Absolute Language",
            Category::Neutral => "Other",
        }
    }
}

/// Map a technique label to its display category by case-insensitive keyword containment
pub fn classify(technique: &str) -> Category {
    let lowered = technique.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(keyword, _)| lowered.contains(keyword))
        .map(|&(_, category)| category)
        .unwrap_or(Category::Neutral)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containment_and_case() {
        for label in ["Urgency Appeal", "urgency", "URGENCY!!", "Urgency / Time Pressure"] {
            assert_eq!(classify(label), Category::Urgency, "label: {label}");
        }
        assert_eq!(classify("Emotional Framing"), Category::Emotional);
        assert_eq!(classify("ABSOLUTE language"), Category::Absolute);
    }

    #[test]
    fn test_unrecognized_falls_back_to_neutral() {
        assert_eq!(classify("Authority Appeal"), Category::Neutral);
        assert_eq!(classify(""), Category::Neutral);
        assert_eq!(Category::Neutral.css_class(), "");
    }

    #[test]
    fn test_keyword_order_decides_ties() {
        assert_eq!(classify("Emotional urgency"), Category::Urgency);
        assert_eq!(classify("Absolute emotional claims"), Category::Emotional);
    }
}
