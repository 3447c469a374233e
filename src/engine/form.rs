//! Team form aggregation
//!
//! Reduces a team's recent finished fixtures into a [`TeamSnapshot`]:
//! goal rates, form string, clean sheets, BTTS and over-line frequencies,
//! plus heuristic corner/card estimates (no real telemetry feed exists).

use std::sync::Arc;

use tracing::debug;

use super::{percent, round_to};
use crate::config::ModelConfig;
use crate::domain::{Fixture, FormResult, TeamSnapshot};

/// Per-match estimates for statistics the fixture feed does not carry
pub trait MatchHeuristics: Send + Sync {
    /// Estimated corners in a match with `total_goals` goals
    fn corners(&self, total_goals: u32) -> f64;

    /// Estimated cards in a match decided by `goal_margin` goals
    fn cards(&self, goal_margin: u32) -> f64;
}

/// Corners grow linearly with goals; tight games draw extra cards
#[derive(Debug, Clone)]
pub struct GoalDerivedHeuristics {
    pub base_corners: f64,
    pub corners_per_goal: f64,
    pub base_cards: f64,
    pub tight_game_cards: f64,
}

impl Default for GoalDerivedHeuristics {
    fn default() -> Self {
        Self {
            base_corners: 8.0,
            corners_per_goal: 0.75,
            base_cards: 3.5,
            tight_game_cards: 0.75,
        }
    }
}

impl MatchHeuristics for GoalDerivedHeuristics {
    fn corners(&self, total_goals: u32) -> f64 {
        self.base_corners + self.corners_per_goal * total_goals as f64
    }

    fn cards(&self, goal_margin: u32) -> f64 {
        if goal_margin <= 1 {
            self.base_cards + self.tight_game_cards
        } else {
            self.base_cards
        }
    }
}

/// Builds team snapshots from fixture history
#[derive(Clone)]
pub struct FormAggregator {
    heuristics: Arc<dyn MatchHeuristics>,
    xg_inflation: f64,
    form_length: usize,
}

impl FormAggregator {
    pub fn new(config: &ModelConfig) -> Self {
        Self::with_heuristics(config, Arc::new(GoalDerivedHeuristics::default()))
    }

    pub fn with_heuristics(config: &ModelConfig, heuristics: Arc<dyn MatchHeuristics>) -> Self {
        Self {
            heuristics,
            xg_inflation: config.xg_inflation,
            form_length: config.form_length,
        }
    }

    /// Summarise `matches` for `team_id`.
    ///
    /// Unfinished fixtures and fixtures the team did not play are ignored.
    /// Fixtures are ordered most-recent-first by kickoff; input order breaks ties.
    pub fn aggregate(&self, team_id: u64, matches: &[Fixture]) -> TeamSnapshot {
        let mut finished: Vec<&Fixture> = matches.iter().filter(|m| m.is_finished()).collect();
        finished.sort_by(|a, b| b.kickoff.cmp(&a.kickoff));

        let mut snapshot = TeamSnapshot::empty(team_id);
        let mut corners = 0.0;
        let mut cards = 0.0;

        for fixture in finished {
            let Some((scored, conceded)) = fixture.goals_for_team(team_id) else {
                continue;
            };
            let total = scored + conceded;

            snapshot.matches_analyzed += 1;
            snapshot.goals_scored += scored;
            snapshot.goals_conceded += conceded;

            let result = FormResult::from_score(scored, conceded);
            match result {
                FormResult::Win => snapshot.wins += 1,
                FormResult::Draw => snapshot.draws += 1,
                FormResult::Loss => snapshot.losses += 1,
            }
            snapshot.form.push(result);

            if conceded == 0 {
                snapshot.clean_sheets += 1;
            }
            if scored > 0 && conceded > 0 {
                snapshot.btts_count += 1;
            }
            if total > 2 {
                snapshot.over_2_5_count += 1;
            }
            if total > 3 {
                snapshot.over_3_5_count += 1;
            }

            corners += self.heuristics.corners(total);
            cards += self.heuristics.cards(scored.abs_diff(conceded));
        }

        snapshot.form.truncate(self.form_length);

        let n = snapshot.matches_analyzed;
        if n == 0 {
            debug!(team_id, "no finished matches, returning neutral snapshot");
            return snapshot;
        }

        let games = n as f64;
        let avg_scored = snapshot.goals_scored as f64 / games;
        snapshot.avg_goals_scored = round_to(avg_scored, 2);
        snapshot.avg_goals_conceded = round_to(snapshot.goals_conceded as f64 / games, 2);
        snapshot.avg_corners = round_to(corners / games, 1);
        snapshot.avg_cards = round_to(cards / games, 1);
        snapshot.expected_goals = round_to(avg_scored * self.xg_inflation, 2);

        snapshot.btts_pct = percent(snapshot.btts_count, n);
        snapshot.over_2_5_pct = percent(snapshot.over_2_5_count, n);
        snapshot.over_3_5_pct = percent(snapshot.over_3_5_count, n);
        snapshot.clean_sheet_pct = percent(snapshot.clean_sheets, n);
        snapshot.win_pct = percent(snapshot.wins, n);

        debug!(
            team_id,
            matches = n,
            form = %snapshot.form_string(),
            xg = snapshot.expected_goals,
            "aggregated team form"
        );
        snapshot
    }
}
