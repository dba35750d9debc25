use serde::{Deserialize, Serialize};

/// The emotion a narrative is meant to be read with.
///
/// This is a closed set. Scoring accepts arbitrary label strings, but a
/// catalog entry always carries one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Excitement,
    Sorrow,
    Anger,
    Fear,
    Joy,
    Mixed,
}

impl Emotion {
    pub const ALL: [Emotion; 6] = [
        Self::Excitement,
        Self::Sorrow,
        Self::Anger,
        Self::Fear,
        Self::Joy,
        Self::Mixed,
    ];

    /// Returns the label string for this emotion (e.g., "sorrow").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Excitement => "excitement",
            Self::Sorrow => "sorrow",
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Joy => "joy",
            Self::Mixed => "mixed",
        }
    }

    /// Parse a label. Matching is exact: labels are lowercase on the wire.
    pub fn parse(label: &str) -> Option<Emotion> {
        Self::ALL.into_iter().find(|e| e.label() == label)
    }

    /// Color family the practice UI uses for this emotion's badge.
    pub fn badge_color(&self) -> &'static str {
        match self {
            Self::Excitement => "orange",
            Self::Sorrow => "blue",
            Self::Anger => "red",
            Self::Fear => "purple",
            Self::Joy => "yellow",
            Self::Mixed => "primary",
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
