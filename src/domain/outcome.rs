use serde::{Deserialize, Serialize};

/// Home/draw/away probabilities in percent, summing to 100
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDistribution {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

impl OutcomeDistribution {
    /// Reported when the model has nothing to go on
    pub const NEUTRAL: OutcomeDistribution = OutcomeDistribution {
        home_win: 33.3,
        draw: 33.4,
        away_win: 33.3,
    };

    pub fn total(&self) -> f64 {
        self.home_win + self.draw + self.away_win
    }
}

/// Goal-count markets derived from the same score grid, in percent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GoalMarkets {
    pub over_1_5: f64,
    pub over_2_5: f64,
    pub over_3_5: f64,
    pub under_2_5: f64,
    pub btts: f64,
}

/// Full output of the score-grid model for one fixture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchProbabilities {
    pub outcome: OutcomeDistribution,
    pub goals: GoalMarkets,
}

impl MatchProbabilities {
    pub fn neutral() -> Self {
        Self {
            outcome: OutcomeDistribution::NEUTRAL,
            goals: GoalMarkets::default(),
        }
    }
}

/// Poisson rates fed to the model for each side
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}

impl ExpectedGoals {
    pub fn new(home: f64, away: f64) -> Self {
        Self { home, away }
    }

    pub fn total(&self) -> f64 {
        self.home + self.away
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_distribution_sums_to_100() {
        assert!((OutcomeDistribution::NEUTRAL.total() - 100.0).abs() < 1e-9);
    }
}
