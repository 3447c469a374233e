pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod services;

pub use config::AppConfig;
pub use engine::{MatchPrediction, Predictor};
pub use error::{BetBrainError, Result};
