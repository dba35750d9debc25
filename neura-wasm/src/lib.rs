//! WASM bindings for neura-speech — powers the browser practice page.
//!
//! Microphone capture and playback stay in the page. The page hands the
//! finished recording's bytes to `stop_recording` and renders the JSON
//! returned by `analyze`.

use wasm_bindgen::prelude::*;

use neura_speech::core::catalog::NarrativeCatalog;
use neura_speech::core::scorer::{SeededScorer, SpeechScorer};
use neura_speech::core::session::{format_elapsed, PracticeSession};
use neura_speech::schema::emotion::Emotion;
use neura_speech::schema::narrative::NarrativeEntry;
use neura_speech::schema::score::{Level, Metric, Rating, SpeechResult};

// ---------------------------------------------------------------------------
// Embedded narrative data — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const NARRATIVES: &str = include_str!("../../data/narratives.ron");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct NarrativeInfo<'a> {
    id: u64,
    text: &'a str,
    emotion: &'static str,
    description: &'a str,
    badge_color: &'static str,
}

impl<'a> From<&'a NarrativeEntry> for NarrativeInfo<'a> {
    fn from(entry: &'a NarrativeEntry) -> Self {
        NarrativeInfo {
            id: entry.id.0,
            text: &entry.text,
            emotion: entry.emotion.label(),
            description: &entry.description,
            badge_color: entry.emotion.badge_color(),
        }
    }
}

#[derive(serde::Serialize)]
struct MetricInfo {
    key: &'static str,
    label: &'static str,
    description: &'static str,
}

#[derive(serde::Serialize)]
struct LevelInfo {
    name: &'static str,
    title: &'static str,
    description: &'static str,
}

#[derive(serde::Serialize)]
struct MetricRating {
    key: &'static str,
    score: u32,
    rating: &'static str,
}

/// The result plus everything the page shows alongside it.
#[derive(serde::Serialize)]
struct AnalysisReport<'a> {
    #[serde(flatten)]
    result: &'a SpeechResult,
    overall: u32,
    level_title: &'static str,
    level_description: &'static str,
    ratings: Vec<MetricRating>,
    needs_practice: Vec<&'static str>,
}

impl<'a> From<&'a SpeechResult> for AnalysisReport<'a> {
    fn from(result: &'a SpeechResult) -> Self {
        AnalysisReport {
            result,
            overall: result.overall(),
            level_title: result.level.title(),
            level_description: result.level.description(),
            ratings: result
                .scores
                .iter()
                .map(|(metric, value)| MetricRating {
                    key: metric.key(),
                    score: value.round() as u32,
                    rating: Rating::for_score(value).label(),
                })
                .collect(),
            needs_practice: result
                .scores
                .needs_practice()
                .into_iter()
                .map(|m| m.key())
                .collect(),
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsError> {
    serde_json::to_string(value).map_err(|e| JsError::new(&format!("Serialization error: {e}")))
}

// ---------------------------------------------------------------------------
// SpeechCoach — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct SpeechCoach {
    session: PracticeSession,
    scorer: SeededScorer,
    seed: u64,
}

#[wasm_bindgen]
impl SpeechCoach {
    /// Create a coach over the built-in narratives.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<SpeechCoach, JsError> {
        let catalog = NarrativeCatalog::parse_ron(data::NARRATIVES)
            .map_err(|e| JsError::new(&format!("Catalog parse error: {e}")))?;
        Self::build(catalog, seed)
    }

    /// Create a coach over a caller-supplied RON narrative list.
    pub fn with_catalog(catalog_ron: &str, seed: u64) -> Result<SpeechCoach, JsError> {
        let catalog = NarrativeCatalog::parse_ron(catalog_ron)
            .map_err(|e| JsError::new(&format!("Catalog parse error: {e}")))?;
        Self::build(catalog, seed)
    }

    /// Pick a new narrative (never the current one). Returns it as JSON.
    pub fn next_narrative(&mut self) -> Result<String, JsError> {
        let entry = self.session.next_narrative();
        to_json(&NarrativeInfo::from(entry))
    }

    /// The current narrative as JSON, or `null`.
    pub fn current_narrative(&self) -> Result<String, JsError> {
        to_json(&self.session.narrative().map(NarrativeInfo::from))
    }

    pub fn start_recording(&mut self) -> Result<(), JsError> {
        self.session
            .start_recording()
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Advance the recording clock by one second; returns `m:ss`, or an
    /// empty string when not recording.
    pub fn tick(&mut self) -> String {
        self.session.tick().map(format_elapsed).unwrap_or_default()
    }

    /// Hand over the finished recording.
    pub fn stop_recording(&mut self, bytes: Vec<u8>) -> Result<u32, JsError> {
        self.session
            .stop_recording(bytes)
            .map(|sample| sample.duration_secs)
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Score the recorded reading of the current narrative. Returns the
    /// analysis report as JSON.
    pub fn analyze(&mut self) -> Result<String, JsError> {
        let result = self
            .session
            .analyze()
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_json(&AnalysisReport::from(result))
    }

    /// Score an emotion label directly, outside the session cycle.
    pub fn score(&mut self, emotion: &str) -> Result<String, JsError> {
        let result = self.scorer.score(emotion);
        to_json(&AnalysisReport::from(&result))
    }

    /// Discard the recording and the last result.
    pub fn reset(&mut self) {
        self.session.reset();
    }

    /// Start over with a new seed (same narratives).
    pub fn reseed(&mut self, seed: u64) -> Result<(), JsError> {
        let catalog = self.session.catalog().clone();
        *self = Self::build(catalog, seed)?;
        Ok(())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Return JSON array of level descriptors, lowest first.
    pub fn levels() -> String {
        let levels: Vec<LevelInfo> = Level::ALL
            .iter()
            .map(|l| LevelInfo {
                name: l.name(),
                title: l.title(),
                description: l.description(),
            })
            .collect();
        serde_json::to_string(&levels).unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON array of metric descriptors in display order.
    pub fn metrics() -> String {
        let metrics: Vec<MetricInfo> = Metric::ALL
            .iter()
            .map(|m| MetricInfo {
                key: m.key(),
                label: m.label(),
                description: m.description(),
            })
            .collect();
        serde_json::to_string(&metrics).unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON array of emotion labels.
    pub fn emotions() -> String {
        let labels: Vec<&str> = Emotion::ALL.iter().map(|e| e.label()).collect();
        serde_json::to_string(&labels).unwrap_or_else(|_| "[]".to_string())
    }
}

// Private helpers
impl SpeechCoach {
    fn build(catalog: NarrativeCatalog, seed: u64) -> Result<SpeechCoach, JsError> {
        let session = PracticeSession::builder()
            .seed(seed)
            .with_catalog(catalog)
            .build()
            .map_err(|e| JsError::new(&format!("Session build error: {e}")))?;
        Ok(SpeechCoach {
            session,
            scorer: SpeechScorer::seeded(seed.wrapping_add(2)),
            seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_matches_builtin() {
        let catalog = NarrativeCatalog::parse_ron(data::NARRATIVES).unwrap();
        assert_eq!(catalog.entries(), NarrativeCatalog::builtin().entries());
    }

    #[test]
    fn report_shape() {
        let result = SpeechScorer::new(neura_speech::core::scorer::FixedNoise(0.0)).score("joy");
        let json = serde_json::to_value(AnalysisReport::from(&result)).unwrap();
        assert_eq!(json["level"], "bold");
        assert_eq!(json["emotion"], "joy");
        assert_eq!(json["overall"], 80);
        assert_eq!(json["scores"]["tonalVariation"], 75.0);
        assert_eq!(json["scores"]["emotionalExpression"], 85.0);
        assert_eq!(json["feedback"].as_array().unwrap().len(), 3);
        assert_eq!(json["level_title"], "Bold Speaker");
        assert_eq!(json["ratings"][0]["rating"], "Good");
        assert_eq!(json["ratings"][4]["rating"], "Excellent");
        assert_eq!(json["needs_practice"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn narrative_info_shape() {
        let catalog = NarrativeCatalog::builtin();
        let json = serde_json::to_value(NarrativeInfo::from(&catalog.entries()[2])).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["emotion"], "anger");
        assert_eq!(json["badge_color"], "red");
    }

    #[test]
    fn static_listings() {
        assert!(SpeechCoach::levels().contains("Pro Speaker"));
        assert!(SpeechCoach::metrics().contains("tonalVariation"));
        assert!(SpeechCoach::emotions().contains("mixed"));
    }
}
