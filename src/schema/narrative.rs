use serde::{Deserialize, Serialize};

use super::emotion::Emotion;

/// Newtype wrapper for narrative IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NarrativeId(pub u64);

impl std::fmt::Display for NarrativeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scripted prompt the user reads aloud with a target emotion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeEntry {
    pub id: NarrativeId,
    pub text: String,
    pub emotion: Emotion,
    pub description: String,
}
