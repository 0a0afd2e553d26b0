//! Core modules for cyclecast

pub mod api;
pub mod cluster;
pub mod curve;
pub mod likelihood;
pub mod posterior;
pub mod priors;
pub mod reliability;
pub mod scorer;

pub use api::{create_router, run_server};
pub use cluster::{apply_cluster_fill, suggest_fill_dates};
pub use curve::{curve_for_cycle_len, DesireCurve};
pub use likelihood::{day_offsets, observation_likelihood};
pub use posterior::build_posterior;
pub use priors::{EngineConfig, PriorTables};
pub use scorer::{CycleEngine, ScoreOptions};
