use serde::{Deserialize, Serialize};

/// Result of a single match from one team's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "D")]
    Draw,
    #[serde(rename = "L")]
    Loss,
}

impl FormResult {
    pub fn from_score(scored: u32, conceded: u32) -> Self {
        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => FormResult::Win,
            std::cmp::Ordering::Less => FormResult::Loss,
            std::cmp::Ordering::Equal => FormResult::Draw,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            FormResult::Win => 'W',
            FormResult::Draw => 'D',
            FormResult::Loss => 'L',
        }
    }
}

/// Render a form sequence as a compact string, e.g. "WWDLW"
pub fn form_string(form: &[FormResult]) -> String {
    form.iter().map(FormResult::as_char).collect()
}

/// Statistical summary of a team's recent finished matches.
///
/// Every rate, average and expected-goals field is zero when no match was
/// analysed. Percentages are in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    pub team_id: u64,
    pub matches_analyzed: u32,
    pub goals_scored: u32,
    pub goals_conceded: u32,
    pub avg_goals_scored: f64,
    pub avg_goals_conceded: f64,
    /// Most recent first
    pub form: Vec<FormResult>,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub clean_sheets: u32,
    pub btts_count: u32,
    pub over_2_5_count: u32,
    pub over_3_5_count: u32,
    pub avg_corners: f64,
    pub avg_cards: f64,
    pub expected_goals: f64,
    pub btts_pct: f64,
    pub over_2_5_pct: f64,
    pub over_3_5_pct: f64,
    pub clean_sheet_pct: f64,
    pub win_pct: f64,
}

impl TeamSnapshot {
    /// Snapshot for a team with no usable history
    pub fn empty(team_id: u64) -> Self {
        Self {
            team_id,
            matches_analyzed: 0,
            goals_scored: 0,
            goals_conceded: 0,
            avg_goals_scored: 0.0,
            avg_goals_conceded: 0.0,
            form: Vec::new(),
            wins: 0,
            draws: 0,
            losses: 0,
            clean_sheets: 0,
            btts_count: 0,
            over_2_5_count: 0,
            over_3_5_count: 0,
            avg_corners: 0.0,
            avg_cards: 0.0,
            expected_goals: 0.0,
            btts_pct: 0.0,
            over_2_5_pct: 0.0,
            over_3_5_pct: 0.0,
            clean_sheet_pct: 0.0,
            win_pct: 0.0,
        }
    }

    pub fn has_history(&self) -> bool {
        self.matches_analyzed > 0
    }

    pub fn form_string(&self) -> String {
        form_string(&self.form)
    }
}
