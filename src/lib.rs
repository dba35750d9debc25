//! NEURA speech practice — narrative prompts and simulated speech analysis.
//!
//! Picks an emotional narrative for the user to read aloud, then scores the
//! reading with emotion-dependent baselines and random perturbation. No
//! audio signal is analyzed; the score is a function of the narrative's
//! emotion and an injectable noise source.

pub mod core;
pub mod schema;
