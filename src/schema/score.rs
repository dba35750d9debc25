use serde::{Deserialize, Serialize};

/// Lowest value a perturbed metric can take.
pub const SCORE_FLOOR: f64 = 20.0;
/// Highest value a perturbed metric can take.
pub const SCORE_CEILING: f64 = 100.0;

/// One of the six measured speech metrics, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    TonalVariation,
    VocalRange,
    Confidence,
    Energy,
    Clarity,
    EmotionalExpression,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Self::TonalVariation,
        Self::VocalRange,
        Self::Confidence,
        Self::Energy,
        Self::Clarity,
        Self::EmotionalExpression,
    ];

    /// Field name used on the wire (e.g., "tonalVariation").
    pub fn key(&self) -> &'static str {
        match self {
            Self::TonalVariation => "tonalVariation",
            Self::VocalRange => "vocalRange",
            Self::Confidence => "confidence",
            Self::Energy => "energy",
            Self::Clarity => "clarity",
            Self::EmotionalExpression => "emotionalExpression",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::TonalVariation => "Tonal Variation",
            Self::VocalRange => "Vocal Range",
            Self::Confidence => "Confidence",
            Self::Energy => "Energy Level",
            Self::Clarity => "Clarity",
            Self::EmotionalExpression => "Emotional Expression",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::TonalVariation => "How well you vary your pitch and tone",
            Self::VocalRange => "The breadth of your vocal expression",
            Self::Confidence => "How assured and steady your delivery sounds",
            Self::Energy => "The vitality and enthusiasm in your voice",
            Self::Clarity => "How clear and understandable your speech is",
            Self::EmotionalExpression => "How well you convey the intended emotion",
        }
    }
}

/// Qualitative band for a single metric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rating {
    NeedsWork,
    Fair,
    Good,
    Excellent,
}

impl Rating {
    pub fn for_score(score: f64) -> Rating {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 65.0 {
            Self::Good
        } else if score >= 50.0 {
            Self::Fair
        } else {
            Self::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NeedsWork => "Needs Work",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

/// The six metric values of one analysis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreVector {
    pub tonal_variation: f64,
    pub vocal_range: f64,
    pub confidence: f64,
    pub energy: f64,
    pub clarity: f64,
    pub emotional_expression: f64,
}

impl ScoreVector {
    pub fn get(&self, metric: Metric) -> f64 {
        match metric {
            Metric::TonalVariation => self.tonal_variation,
            Metric::VocalRange => self.vocal_range,
            Metric::Confidence => self.confidence,
            Metric::Energy => self.energy,
            Metric::Clarity => self.clarity,
            Metric::EmotionalExpression => self.emotional_expression,
        }
    }

    /// Metrics paired with their values, in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    /// Unrounded arithmetic mean of all six metrics.
    pub fn mean(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum::<f64>() / Metric::ALL.len() as f64
    }

    /// Metrics scoring below 70, the point where practice is suggested.
    pub fn needs_practice(&self) -> Vec<Metric> {
        self.iter()
            .filter(|(_, v)| *v < 70.0)
            .map(|(m, _)| m)
            .collect()
    }
}

/// Speaker proficiency tier, ordered lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Core,
    Clear,
    Fluid,
    Bold,
    Pro,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Self::Core,
        Self::Clear,
        Self::Fluid,
        Self::Bold,
        Self::Pro,
    ];

    /// Tier for an unrounded aggregate mean. Lower bounds are inclusive.
    pub fn from_mean(mean: f64) -> Level {
        if mean >= 85.0 {
            Self::Pro
        } else if mean >= 75.0 {
            Self::Bold
        } else if mean >= 65.0 {
            Self::Fluid
        } else if mean >= 50.0 {
            Self::Clear
        } else {
            Self::Core
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Clear => "clear",
            Self::Fluid => "fluid",
            Self::Bold => "bold",
            Self::Pro => "pro",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Core => "Core Speaker",
            Self::Clear => "Clear Speaker",
            Self::Fluid => "Fluid Speaker",
            Self::Bold => "Bold Speaker",
            Self::Pro => "Pro Speaker",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Core => "Building foundation skills",
            Self::Clear => "Developing clarity and confidence",
            Self::Fluid => "Smooth and expressive delivery",
            Self::Bold => "Confident and engaging",
            Self::Pro => "Masterful speech delivery",
        }
    }

    /// The three feedback lines given at this tier.
    pub fn feedback(&self) -> [&'static str; 3] {
        match self {
            Self::Pro => [
                "Exceptional vocal control",
                "Masterful emotional delivery",
                "Outstanding audience engagement",
            ],
            Self::Bold => [
                "Strong confidence in delivery",
                "Good tonal variation",
                "Work on maintaining consistency",
            ],
            Self::Fluid => [
                "Smooth delivery overall",
                "Practice emotional expression",
                "Increase vocal range",
            ],
            Self::Clear => [
                "Basic proficiency achieved",
                "Focus on confidence building",
                "Practice tonal variation",
            ],
            Self::Core => [
                "Great start! Keep practicing",
                "Work on clarity and pace",
                "Focus on reducing hesitations",
            ],
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The outcome of one simulated speech analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechResult {
    pub level: Level,
    pub scores: ScoreVector,
    pub emotion: String,
    pub feedback: Vec<String>,
}

impl SpeechResult {
    /// Unrounded mean of the scores; this is what decides the level.
    pub fn mean(&self) -> f64 {
        self.scores.mean()
    }

    /// Mean rounded to the nearest integer, for display.
    pub fn overall(&self) -> u32 {
        self.mean().round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(value: f64) -> ScoreVector {
        ScoreVector {
            tonal_variation: value,
            vocal_range: value,
            confidence: value,
            energy: value,
            clarity: value,
            emotional_expression: value,
        }
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(Level::from_mean(85.0), Level::Pro);
        assert_eq!(Level::from_mean(84.999), Level::Bold);
        assert_eq!(Level::from_mean(75.0), Level::Bold);
        assert_eq!(Level::from_mean(74.999), Level::Fluid);
        assert_eq!(Level::from_mean(65.0), Level::Fluid);
        assert_eq!(Level::from_mean(64.999), Level::Clear);
        assert_eq!(Level::from_mean(50.0), Level::Clear);
        assert_eq!(Level::from_mean(49.999), Level::Core);
        assert_eq!(Level::from_mean(100.0), Level::Pro);
        assert_eq!(Level::from_mean(20.0), Level::Core);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(Level::Core < Level::Clear);
        assert!(Level::Clear < Level::Fluid);
        assert!(Level::Fluid < Level::Bold);
        assert!(Level::Bold < Level::Pro);
    }

    #[test]
    fn feedback_rows() {
        assert_eq!(
            Level::Bold.feedback(),
            [
                "Strong confidence in delivery",
                "Good tonal variation",
                "Work on maintaining consistency",
            ]
        );
        assert_eq!(Level::Core.feedback()[0], "Great start! Keep practicing");
        assert_eq!(Level::Pro.feedback()[2], "Outstanding audience engagement");
    }

    #[test]
    fn level_titles() {
        assert_eq!(Level::Fluid.title(), "Fluid Speaker");
        assert_eq!(Level::Pro.description(), "Masterful speech delivery");
        assert_eq!(Level::Clear.to_string(), "clear");
    }

    #[test]
    fn vector_mean_and_lookup() {
        let scores = ScoreVector {
            tonal_variation: 75.0,
            vocal_range: 70.0,
            confidence: 82.0,
            energy: 88.0,
            clarity: 80.0,
            emotional_expression: 85.0,
        };
        assert!((scores.mean() - 80.0).abs() < 1e-9);
        assert_eq!(scores.get(Metric::Energy), 88.0);
        let keys: Vec<&str> = scores.iter().map(|(m, _)| m.key()).collect();
        assert_eq!(
            keys,
            vec![
                "tonalVariation",
                "vocalRange",
                "confidence",
                "energy",
                "clarity",
                "emotionalExpression",
            ]
        );
    }

    #[test]
    fn needs_practice_below_seventy() {
        let mut scores = flat(75.0);
        scores.vocal_range = 69.9;
        scores.energy = 45.0;
        assert_eq!(
            scores.needs_practice(),
            vec![Metric::VocalRange, Metric::Energy]
        );
        assert!(flat(70.0).needs_practice().is_empty());
    }

    #[test]
    fn ratings() {
        assert_eq!(Rating::for_score(80.0), Rating::Excellent);
        assert_eq!(Rating::for_score(79.9), Rating::Good);
        assert_eq!(Rating::for_score(65.0), Rating::Good);
        assert_eq!(Rating::for_score(50.0), Rating::Fair);
        assert_eq!(Rating::for_score(49.9), Rating::NeedsWork);
        assert_eq!(Rating::NeedsWork.label(), "Needs Work");
    }

    #[test]
    fn overall_rounds_mean() {
        let mut scores = flat(80.0);
        scores.energy = 83.0; // mean 80.5
        let result = SpeechResult {
            level: Level::from_mean(scores.mean()),
            scores,
            emotion: "joy".to_string(),
            feedback: Vec::new(),
        };
        assert_eq!(result.overall(), 81);
        assert_eq!(result.level, Level::Bold);
    }

    #[test]
    fn metric_labels() {
        assert_eq!(Metric::Energy.label(), "Energy Level");
        assert_eq!(
            Metric::Clarity.description(),
            "How clear and understandable your speech is"
        );
    }
}
