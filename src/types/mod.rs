//! Core types for cyclecast

mod category;
mod hypothesis;
mod observation;
mod prediction;
mod reliability;

pub use category::Category;
pub use hypothesis::{cycle_day_of, Hypothesis, Posterior};
pub use observation::{parse_calendar_day, Observation, ObservationSet, ParsedObservations};
pub use prediction::{CategoryScores, Prediction, ScoreReason};
pub use reliability::{Reliability, ReliabilityBand};
