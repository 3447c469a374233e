use super::round_to;
use crate::config::ModelConfig;
use crate::domain::{ExpectedGoals, StandingRow, TeamSnapshot};

/// What is known about one side of a fixture
#[derive(Debug, Clone, Copy, Default)]
pub struct SideInputs<'a> {
    pub snapshot: Option<&'a TeamSnapshot>,
    pub standing: Option<&'a StandingRow>,
}

impl<'a> SideInputs<'a> {
    pub fn new(snapshot: Option<&'a TeamSnapshot>, standing: Option<&'a StandingRow>) -> Self {
        Self { snapshot, standing }
    }

    /// Scoring figure: form-based xG, else goals-for per game from the table
    fn attack(&self) -> Option<f64> {
        match self.snapshot {
            Some(s) if s.has_history() => Some(s.expected_goals),
            _ => self.standing.and_then(StandingRow::scoring_rate),
        }
    }

    /// Conceding figure: form-based average, else goals-against per game
    fn defence(&self) -> Option<f64> {
        match self.snapshot {
            Some(s) if s.has_history() => Some(s.avg_goals_conceded),
            _ => self.standing.and_then(StandingRow::conceding_rate),
        }
    }
}

/// Blend each side's attack with the opponent's defence, then apply the
/// home-advantage and away multipliers. Missing figures drop out of the
/// blend; a side with nothing known gets a rate of zero.
pub fn derive_expected_goals(
    home: SideInputs<'_>,
    away: SideInputs<'_>,
    config: &ModelConfig,
) -> ExpectedGoals {
    let home_rate = blend(home.attack(), away.defence()) * config.home_advantage;
    let away_rate = blend(away.attack(), home.defence()) * config.away_factor;
    ExpectedGoals::new(round_to(home_rate, 2), round_to(away_rate, 2))
}

fn blend(attack: Option<f64>, opponent_defence: Option<f64>) -> f64 {
    match (attack, opponent_defence) {
        (Some(a), Some(d)) => (a + d) / 2.0,
        (Some(a), None) => a,
        // Without an attacking figure the opponent's record alone is too thin
        (None, _) => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TeamRef;

    fn snapshot(xg: f64, conceded: f64) -> TeamSnapshot {
        let mut s = TeamSnapshot::empty(1);
        s.matches_analyzed = 10;
        s.expected_goals = xg;
        s.avg_goals_conceded = conceded;
        s
    }

    fn row(played: u32, goals_for: u32, goals_against: u32) -> StandingRow {
        StandingRow {
            position: 1,
            team: TeamRef::new(1, "Team"),
            played_games: played,
            won: 0,
            draw: 0,
            lost: 0,
            points: 0,
            goals_for,
            goals_against,
            goal_difference: goals_for as i32 - goals_against as i32,
        }
    }

    #[test]
    fn test_blends_attack_with_opponent_defence() {
        let config = ModelConfig::default();
        let home = snapshot(2.0, 1.0);
        let away = snapshot(1.0, 1.2);
        let xg = derive_expected_goals(
            SideInputs::new(Some(&home), None),
            SideInputs::new(Some(&away), None),
            &config,
        );
        // home: (2.0 + 1.2) / 2 * 1.1, away: (1.0 + 1.0) / 2 * 0.9
        assert_eq!(xg.home, 1.76);
        assert_eq!(xg.away, 0.9);
    }

    #[test]
    fn test_falls_back_to_standings() {
        let config = ModelConfig::default();
        let empty = TeamSnapshot::empty(1);
        let home_row = row(10, 20, 10);
        let away_row = row(10, 10, 10);
        let xg = derive_expected_goals(
            SideInputs::new(Some(&empty), Some(&home_row)),
            SideInputs::new(Some(&empty), Some(&away_row)),
            &config,
        );
        assert_eq!(xg.home, 1.65);
        assert_eq!(xg.away, 0.9);
    }

    #[test]
    fn test_nothing_known_is_zero() {
        let xg = derive_expected_goals(
            SideInputs::default(),
            SideInputs::default(),
            &ModelConfig::default(),
        );
        assert_eq!(xg, ExpectedGoals::new(0.0, 0.0));
    }
}
