//! Prediction market module
//!
//! Time-boxed closed-choice questions per match: one submission per user
//! during the open window, resolved exactly once by the creator or an
//! administrator, fixed-point rewards to correct submitters.

mod engine;
mod types;

pub use engine::{PredictionMarket, DEFAULT_EXPIRY_SECS, WINNER_POINTS};
pub use types::{
    Awarded, MarketError, NewPrediction, Prediction, PredictionId, PredictionSnapshot, Resolution,
    Submission,
};
