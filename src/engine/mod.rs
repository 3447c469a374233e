//! Probability engine
//!
//! - `form`: team history → [`TeamSnapshot`](crate::domain::TeamSnapshot)
//! - `expected_goals`: snapshots/standings → Poisson rates
//! - `poisson`: rates → outcome distribution and goal markets
//! - `value`: model probability vs. odds → value / high-probability signals
//! - `matching`: team-name similarity for correlating providers
//! - `predictor`: ties the above together for one fixture

pub mod expected_goals;
pub mod form;
pub mod matching;
pub mod poisson;
pub mod predictor;
pub mod value;

pub use expected_goals::{derive_expected_goals, SideInputs};
pub use form::{FormAggregator, GoalDerivedHeuristics, MatchHeuristics};
pub use matching::{best_match, name_similarity, names_match, normalize_team_name};
pub use poisson::{poisson_pmf, ProbabilityEngine};
pub use predictor::{MatchPrediction, Predictor};
pub use value::{implied_probability, ValueDetector};

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// `count` out of `total` as a percentage with one decimal, 0 when `total` is 0
pub(crate) fn percent(count: u32, total: u32) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(count as f64 / total as f64 * 100.0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333, 1), 33.3);
        assert_eq!(round_to(2.456, 2), 2.46);
    }

    #[test]
    fn test_percent_guards_zero_total() {
        assert_eq!(percent(3, 0), 0.0);
        assert_eq!(percent(1, 3), 33.3);
        assert_eq!(percent(4, 4), 100.0);
    }
}
