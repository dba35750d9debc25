/// Simulated speech scoring — emotion baselines, noise, clamping, and tiering.
///
/// No audio is inspected. Each metric is an emotion-dependent baseline plus
/// independent noise, clamped to the score range. The unrounded mean of the
/// clamped metrics picks the level.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::schema::emotion::Emotion;
use crate::schema::score::{Level, ScoreVector, SpeechResult, SCORE_CEILING, SCORE_FLOOR};

/// Half-width of the uniform noise applied to every metric.
pub const NOISE_HALF_WIDTH: f64 = 10.0;

const TONAL_VARIATION_BASE: f64 = 75.0;
const VOCAL_RANGE_BASE: f64 = 70.0;
const CLARITY_BASE: f64 = 80.0;

/// The emotion-dependent part of the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub energy: f64,
    pub confidence: f64,
    pub emotional_expression: f64,
}

impl Baseline {
    /// Used for `mixed` and for any label outside the known set.
    pub const DEFAULT: Baseline = Baseline {
        energy: 70.0,
        confidence: 70.0,
        emotional_expression: 70.0,
    };

    pub fn for_emotion(emotion: Option<Emotion>) -> Baseline {
        let (energy, confidence, emotional_expression) = match emotion {
            Some(Emotion::Excitement) => (85.0, 78.0, 82.0),
            Some(Emotion::Sorrow) => (45.0, 65.0, 75.0),
            Some(Emotion::Anger) => (90.0, 85.0, 88.0),
            Some(Emotion::Fear) => (60.0, 55.0, 70.0),
            Some(Emotion::Joy) => (88.0, 82.0, 85.0),
            Some(Emotion::Mixed) | None => return Self::DEFAULT,
        };
        Baseline {
            energy,
            confidence,
            emotional_expression,
        }
    }

    pub fn for_label(label: &str) -> Baseline {
        Self::for_emotion(Emotion::parse(label))
    }

    /// The full six-metric baseline before noise.
    pub fn vector(&self) -> ScoreVector {
        ScoreVector {
            tonal_variation: TONAL_VARIATION_BASE,
            vocal_range: VOCAL_RANGE_BASE,
            confidence: self.confidence,
            energy: self.energy,
            clarity: CLARITY_BASE,
            emotional_expression: self.emotional_expression,
        }
    }
}

/// A source of per-metric perturbation.
pub trait Noise {
    fn sample(&mut self) -> f64;
}

/// Uniform noise in `[-NOISE_HALF_WIDTH, NOISE_HALF_WIDTH)` from any RNG.
#[derive(Debug, Clone)]
pub struct UniformNoise<R> {
    rng: R,
}

impl<R: Rng> UniformNoise<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl UniformNoise<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Noise for UniformNoise<R> {
    fn sample(&mut self) -> f64 {
        self.rng.gen_range(-NOISE_HALF_WIDTH..NOISE_HALF_WIDTH)
    }
}

/// The same offset for every draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedNoise(pub f64);

impl Noise for FixedNoise {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed list of offsets, wrapping around at the end.
#[derive(Debug, Clone)]
pub struct SequenceNoise {
    values: Vec<f64>,
    next: usize,
}

impl SequenceNoise {
    /// An empty list replays zero forever.
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, next: 0 }
    }
}

impl Noise for SequenceNoise {
    fn sample(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        value
    }
}

impl<N: Noise + ?Sized> Noise for &mut N {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

impl<N: Noise + ?Sized> Noise for Box<N> {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

/// Produces a `SpeechResult` for an emotion label.
#[derive(Debug, Clone)]
pub struct SpeechScorer<N> {
    noise: N,
}

/// The scorer used outside tests: uniform noise from a seeded `StdRng`.
pub type SeededScorer = SpeechScorer<UniformNoise<StdRng>>;

impl SeededScorer {
    /// A scorer with uniform noise from a seeded `StdRng`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(UniformNoise::seeded(seed))
    }
}

impl<N: Noise> SpeechScorer<N> {
    pub fn new(noise: N) -> Self {
        Self { noise }
    }

    /// Score a reading of a narrative tagged with `emotion`.
    ///
    /// Any label is accepted; unknown labels use `Baseline::DEFAULT`.
    /// Metrics are drawn in display order, each clamped before the mean
    /// is taken.
    pub fn score(&mut self, emotion: &str) -> SpeechResult {
        let base = Baseline::for_label(emotion).vector();
        let scores = ScoreVector {
            tonal_variation: self.perturb(base.tonal_variation),
            vocal_range: self.perturb(base.vocal_range),
            confidence: self.perturb(base.confidence),
            energy: self.perturb(base.energy),
            clarity: self.perturb(base.clarity),
            emotional_expression: self.perturb(base.emotional_expression),
        };

        let mean = scores.mean();
        let level = Level::from_mean(mean);
        tracing::debug!(emotion, mean, %level, "scored speech sample");

        SpeechResult {
            level,
            scores,
            emotion: emotion.to_string(),
            feedback: level.feedback().iter().map(|s| s.to_string()).collect(),
        }
    }

    fn perturb(&mut self, baseline: f64) -> f64 {
        (baseline + self.noise.sample()).clamp(SCORE_FLOOR, SCORE_CEILING)
    }
}
