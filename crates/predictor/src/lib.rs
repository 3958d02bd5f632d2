//! Cycle-accurate reference model of a TAGE branch predictor.
//!
//! Models the prediction-and-learning engine of a hardware TAGE (TAgged
//! GEometric history length) predictor: geometric-history hashing,
//! tagged-entry tables, longest-match provider selection, allocation on
//! misprediction with counter hysteresis, approximate-LRU replacement,
//! periodic aging of useful bits, and per-context history registers for
//! Spectre-v2-style isolation between hardware domains.
//!
//! The host pipeline drives the model with three calls per branch:
//! [`TagePredictor::predict`], then either [`TagePredictor::update`] when
//! the prediction was right or [`TagePredictor::on_mispredict`] when it
//! was wrong. Operations are strictly serialised and infallible;
//! out-of-range inputs are clamped the way the hardware masks its wires.

pub mod common;
pub mod core;
pub mod stats;

pub use crate::common::{Confidence, Prediction};
pub use crate::core::TagePredictor;
pub use crate::stats::{PredictorStats, TableStats};
