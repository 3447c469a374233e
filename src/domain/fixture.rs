use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a fixture as reported by the fixture provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    Scheduled,
    Timed,
    InPlay,
    Paused,
    Finished,
    Postponed,
    Suspended,
    Cancelled,
    Unknown,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "SCHEDULED",
            MatchStatus::Timed => "TIMED",
            MatchStatus::InPlay => "IN_PLAY",
            MatchStatus::Paused => "PAUSED",
            MatchStatus::Finished => "FINISHED",
            MatchStatus::Postponed => "POSTPONED",
            MatchStatus::Suspended => "SUSPENDED",
            MatchStatus::Cancelled => "CANCELLED",
            MatchStatus::Unknown => "UNKNOWN",
        }
    }

    /// Parse a provider status string. Unrecognised values map to `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SCHEDULED" => MatchStatus::Scheduled,
            "TIMED" => MatchStatus::Timed,
            "IN_PLAY" | "LIVE" => MatchStatus::InPlay,
            "PAUSED" => MatchStatus::Paused,
            "FINISHED" | "AWARDED" => MatchStatus::Finished,
            "POSTPONED" => MatchStatus::Postponed,
            "SUSPENDED" => MatchStatus::Suspended,
            "CANCELLED" | "CANCELED" => MatchStatus::Cancelled,
            _ => MatchStatus::Unknown,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, MatchStatus::Finished)
    }
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A team as referenced from a fixture or table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crest: Option<String>,
}

impl TeamRef {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            short_name: None,
            crest: None,
        }
    }
}

/// A single fixture, played or not
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition_name: Option<String>,
    pub kickoff: Option<DateTime<Utc>>,
    pub status: MatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matchday: Option<u32>,
    pub home: TeamRef,
    pub away: TeamRef,
    /// Full-time goals, present once the match has been played
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
}

impl Fixture {
    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn title(&self) -> String {
        format!("{} vs {}", self.home.name, self.away.name)
    }

    /// Goals (scored, conceded) from the point of view of `team_id`.
    /// Missing scores count as zero; `None` if the team did not play.
    pub fn goals_for_team(&self, team_id: u64) -> Option<(u32, u32)> {
        let home = self.home_goals.unwrap_or(0);
        let away = self.away_goals.unwrap_or(0);
        if self.home.id == team_id {
            Some((home, away))
        } else if self.away.id == team_id {
            Some((away, home))
        } else {
            None
        }
    }
}

/// A competition offered by the fixture provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emblem: Option<String>,
    /// Odds feed key, when the competition is covered by the odds provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odds_key: Option<String>,
}

/// One row of a league table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingRow {
    pub position: u32,
    pub team: TeamRef,
    pub played_games: u32,
    pub won: u32,
    pub draw: u32,
    pub lost: u32,
    pub points: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
}

impl StandingRow {
    /// Goals scored per game played, `None` before the first game
    pub fn scoring_rate(&self) -> Option<f64> {
        if self.played_games == 0 {
            None
        } else {
            Some(self.goals_for as f64 / self.played_games as f64)
        }
    }

    /// Goals conceded per game played, `None` before the first game
    pub fn conceding_rate(&self) -> Option<f64> {
        if self.played_games == 0 {
            None
        } else {
            Some(self.goals_against as f64 / self.played_games as f64)
        }
    }
}

/// Overall league table for a competition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueTable {
    pub competition_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub competition_name: Option<String>,
    pub rows: Vec<StandingRow>,
}

impl LeagueTable {
    pub fn row_for(&self, team_id: u64) -> Option<&StandingRow> {
        self.rows.iter().find(|r| r.team.id == team_id)
    }
}
