/// The practice session: narrative → recording → analysis orchestration.
///
/// Wires the narrative catalog and the speech scorer together and tracks
/// where the user is in the record-then-analyze cycle.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use thiserror::Error;

use crate::core::catalog::{CatalogError, NarrativeCatalog};
use crate::core::scorer::{Noise, SpeechScorer, UniformNoise};
use crate::schema::narrative::{NarrativeEntry, NarrativeId};
use crate::schema::score::SpeechResult;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("no narrative selected")]
    NoNarrative,
    #[error("no recorded sample to analyze")]
    NoSample,
    #[error("a recording is already in progress")]
    AlreadyRecording,
    #[error("no recording in progress")]
    NotRecording,
}

/// A finished recording handed over by the capture layer. The bytes are
/// opaque; nothing here decodes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioSample {
    pub bytes: Vec<u8>,
    pub duration_secs: u32,
}

/// Where the session is in the capture cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording { elapsed_secs: u32 },
    Recorded(AudioSample),
}

/// A single user's practice session. Built via `PracticeSession::builder()`.
pub struct PracticeSession<N = UniformNoise<StdRng>> {
    catalog: NarrativeCatalog,
    scorer: SpeechScorer<N>,
    rng: StdRng,
    narrative: Option<NarrativeId>,
    recording: RecordingState,
    result: Option<SpeechResult>,
}

/// Builder for constructing a `PracticeSession`.
pub struct PracticeSessionBuilder {
    seed: u64,
    catalog_paths: Vec<String>,
    /// Directly provided catalog (for testing without files).
    catalog: Option<NarrativeCatalog>,
}

impl PracticeSession {
    pub fn builder() -> PracticeSessionBuilder {
        PracticeSessionBuilder {
            seed: 0,
            catalog_paths: Vec::new(),
            catalog: None,
        }
    }
}

impl<N: Noise> PracticeSession<N> {
    /// Assemble a session from parts; the seed drives narrative selection.
    pub fn from_parts(catalog: NarrativeCatalog, scorer: SpeechScorer<N>, seed: u64) -> Self {
        Self {
            catalog,
            scorer,
            rng: StdRng::seed_from_u64(seed),
            narrative: None,
            recording: RecordingState::Idle,
            result: None,
        }
    }

    pub fn catalog(&self) -> &NarrativeCatalog {
        &self.catalog
    }

    pub fn narrative(&self) -> Option<&NarrativeEntry> {
        self.narrative.and_then(|id| self.catalog.get(id))
    }

    pub fn recording(&self) -> &RecordingState {
        &self.recording
    }

    pub fn result(&self) -> Option<&SpeechResult> {
        self.result.as_ref()
    }

    /// Show a new narrative, never the one currently shown.
    pub fn next_narrative(&mut self) -> &NarrativeEntry {
        let previous = self.narrative.and_then(|id| self.catalog.get(id));
        let picked = self.catalog.pick(previous, &mut self.rng);
        self.narrative = Some(picked.id);
        picked
    }

    /// Begin capturing. A previously recorded sample is discarded.
    pub fn start_recording(&mut self) -> Result<(), SessionError> {
        if matches!(self.recording, RecordingState::Recording { .. }) {
            return Err(SessionError::AlreadyRecording);
        }
        self.recording = RecordingState::Recording { elapsed_secs: 0 };
        tracing::debug!("recording started");
        Ok(())
    }

    /// Advance the recording clock by one second. Returns the elapsed time,
    /// or `None` when nothing is being recorded.
    pub fn tick(&mut self) -> Option<u32> {
        match &mut self.recording {
            RecordingState::Recording { elapsed_secs } => {
                *elapsed_secs += 1;
                Some(*elapsed_secs)
            }
            _ => None,
        }
    }

    /// Finish capturing with the bytes the recorder produced.
    pub fn stop_recording(&mut self, bytes: Vec<u8>) -> Result<&AudioSample, SessionError> {
        let elapsed = match self.recording {
            RecordingState::Recording { elapsed_secs } => elapsed_secs,
            _ => return Err(SessionError::NotRecording),
        };
        tracing::debug!(elapsed, size = bytes.len(), "recording complete");
        self.recording = RecordingState::Recorded(AudioSample {
            bytes,
            duration_secs: elapsed,
        });
        match &self.recording {
            RecordingState::Recorded(sample) => Ok(sample),
            _ => Err(SessionError::NotRecording),
        }
    }

    /// Score the current narrative's emotion against the recorded sample.
    pub fn analyze(&mut self) -> Result<&SpeechResult, SessionError> {
        match self.recording {
            RecordingState::Recorded(_) => {}
            RecordingState::Recording { .. } => return Err(SessionError::AlreadyRecording),
            RecordingState::Idle => return Err(SessionError::NoSample),
        }
        let narrative = self
            .narrative
            .and_then(|id| self.catalog.get(id))
            .ok_or(SessionError::NoNarrative)?;

        let result = self.scorer.score(narrative.emotion.label());
        tracing::info!(
            narrative = %narrative.id,
            level = %result.level,
            overall = result.overall(),
            "analysis complete"
        );
        Ok(self.result.insert(result))
    }

    /// Drop the sample and any result; the narrative stays.
    pub fn reset(&mut self) {
        self.recording = RecordingState::Idle;
        self.result = None;
        tracing::debug!("session reset");
    }
}

impl PracticeSessionBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Merge a RON catalog file over the catalog. May be called repeatedly;
    /// later files override earlier ones.
    pub fn catalog_path(mut self, path: &str) -> Self {
        self.catalog_paths.push(path.to_string());
        self
    }

    /// Provide the base catalog directly (for testing without files).
    pub fn with_catalog(mut self, catalog: NarrativeCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Build with uniform noise seeded from the session seed.
    pub fn build(self) -> Result<PracticeSession, SessionError> {
        let noise = UniformNoise::seeded(self.seed.wrapping_add(1));
        self.build_with_noise(noise)
    }

    /// Build with a caller-supplied noise source.
    pub fn build_with_noise<N: Noise>(self, noise: N) -> Result<PracticeSession<N>, SessionError> {
        let mut catalog = self.catalog.unwrap_or_default();
        for path in &self.catalog_paths {
            let loaded = NarrativeCatalog::load_from_ron(Path::new(path))?;
            tracing::debug!(path = %path, entries = loaded.len(), "loaded narrative catalog");
            catalog.merge(loaded);
        }
        Ok(PracticeSession::from_parts(
            catalog,
            SpeechScorer::new(noise),
            self.seed,
        ))
    }
}

/// Format a recording duration as `m:ss`.
pub fn format_elapsed(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
