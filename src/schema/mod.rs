pub mod emotion;
pub mod narrative;
pub mod score;
