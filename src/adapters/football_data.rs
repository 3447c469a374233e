// football-data.org v4 integration
// Competitions, fixtures, team history and league tables

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use tracing::{debug, info, warn};

use crate::adapters::traits::FixtureProvider;
use crate::adapters::odds_api::League;
use crate::config::FootballDataConfig;
use crate::domain::{
    Competition, Fixture, LeagueTable, MatchStatus, StandingRow, TeamRef,
};
use crate::error::{BetBrainError, Result};

const PROVIDER: &str = "football-data";

// Wire types. Every field defaults so a partial payload degrades instead of failing.

/// Treat an explicit `null` like a missing key.
/// `#[serde(default)]` alone only covers the missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FdTeam {
    #[serde(deserialize_with = "null_as_default")]
    id: u64,
    name: Option<String>,
    short_name: Option<String>,
    crest: Option<String>,
}

impl FdTeam {
    fn into_team_ref(self) -> TeamRef {
        TeamRef {
            id: self.id,
            name: self.name.unwrap_or_else(|| match self.id {
                0 => "TBD".to_string(),
                id => format!("Team {}", id),
            }),
            short_name: self.short_name,
            crest: self.crest,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FdScoreLine {
    home: Option<u32>,
    away: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FdScore {
    #[serde(deserialize_with = "null_as_default")]
    full_time: FdScoreLine,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FdCompetitionRef {
    id: Option<u64>,
    name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FdMatch {
    #[serde(deserialize_with = "null_as_default")]
    id: u64,
    utc_date: Option<String>,
    status: Option<String>,
    matchday: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    home_team: FdTeam,
    #[serde(deserialize_with = "null_as_default")]
    away_team: FdTeam,
    #[serde(deserialize_with = "null_as_default")]
    score: FdScore,
    competition: Option<FdCompetitionRef>,
}

impl FdMatch {
    fn into_fixture(self) -> Fixture {
        let kickoff = self.utc_date.as_deref().and_then(parse_kickoff);
        let status = self
            .status
            .as_deref()
            .map(MatchStatus::parse)
            .unwrap_or(MatchStatus::Unknown);
        let competition = self.competition.unwrap_or_default();

        Fixture {
            id: self.id,
            competition_id: competition.id,
            competition_name: competition.name,
            kickoff,
            status,
            matchday: self.matchday,
            home: self.home_team.into_team_ref(),
            away: self.away_team.into_team_ref(),
            home_goals: self.score.full_time.home,
            away_goals: self.score.full_time.away,
        }
    }
}

fn parse_kickoff(raw: &str) -> Option<DateTime<Utc>> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            debug!("Unparseable kickoff {:?}: {}", raw, e);
            None
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FdMatchesResponse {
    #[serde(deserialize_with = "null_as_default")]
    matches: Vec<FdMatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FdArea {
    name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FdCompetition {
    #[serde(deserialize_with = "null_as_default")]
    id: u64,
    name: Option<String>,
    code: Option<String>,
    area: Option<FdArea>,
    emblem: Option<String>,
}

impl FdCompetition {
    fn into_competition(self) -> Competition {
        Competition {
            id: self.id,
            name: self.name.unwrap_or_else(|| format!("Competition {}", self.id)),
            code: self.code,
            area: self.area.and_then(|a| a.name),
            emblem: self.emblem,
            odds_key: League::from_competition_id(self.id).map(|l| l.api_key().to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FdCompetitionsResponse {
    #[serde(deserialize_with = "null_as_default")]
    competitions: Vec<FdCompetition>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FdStandingRow {
    #[serde(deserialize_with = "null_as_default")]
    position: u32,
    #[serde(deserialize_with = "null_as_default")]
    team: FdTeam,
    #[serde(deserialize_with = "null_as_default")]
    played_games: u32,
    #[serde(deserialize_with = "null_as_default")]
    won: u32,
    #[serde(deserialize_with = "null_as_default")]
    draw: u32,
    #[serde(deserialize_with = "null_as_default")]
    lost: u32,
    #[serde(deserialize_with = "null_as_default")]
    points: u32,
    #[serde(deserialize_with = "null_as_default")]
    goals_for: u32,
    #[serde(deserialize_with = "null_as_default")]
    goals_against: u32,
    #[serde(deserialize_with = "null_as_default")]
    goal_difference: i32,
}

impl FdStandingRow {
    fn into_row(self) -> StandingRow {
        StandingRow {
            position: self.position,
            team: self.team.into_team_ref(),
            played_games: self.played_games,
            won: self.won,
            draw: self.draw,
            lost: self.lost,
            points: self.points,
            goals_for: self.goals_for,
            goals_against: self.goals_against,
            goal_difference: self.goal_difference,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FdStandingTable {
    #[serde(rename = "type")]
    kind: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    table: Vec<FdStandingRow>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct FdStandingsResponse {
    competition: Option<FdCompetitionRef>,
    #[serde(deserialize_with = "null_as_default")]
    standings: Vec<FdStandingTable>,
}

impl FdStandingsResponse {
    /// The overall table; the first table when no "TOTAL" entry exists
    fn into_league_table(self, competition_id: u64) -> LeagueTable {
        let competition_name = self.competition.and_then(|c| c.name);
        let mut tables = self.standings;
        let index = tables
            .iter()
            .position(|t| t.kind.as_deref() == Some("TOTAL"))
            .unwrap_or(0);

        let rows = if tables.is_empty() {
            Vec::new()
        } else {
            tables
                .swap_remove(index)
                .table
                .into_iter()
                .map(FdStandingRow::into_row)
                .collect()
        };

        LeagueTable {
            competition_id,
            competition_name,
            rows,
        }
    }
}

/// football-data.org REST client
pub struct FootballDataClient {
    http: Client,
    base_url: String,
    token: String,
}

impl FootballDataClient {
    pub fn new(config: &FootballDataConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BetBrainError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        if !self.is_configured() {
            return Err(BetBrainError::NotConfigured(
                "FOOTBALL_DATA_TOKEN not set".to_string(),
            ));
        }

        let url = format!("{}{}", self.base_url, path);
        debug!("Fetching {}", url);

        let response = self
            .http
            .get(&url)
            .header("X-Auth-Token", &self.token)
            .query(query)
            .send()
            .await
            .map_err(|e| classify_transport_error(e, PROVIDER))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("football-data error {} on {}: {}", status, path, body);
            return Err(classify_status(status, body, PROVIDER, path));
        }

        response.json::<T>().await.map_err(BetBrainError::Http)
    }
}

/// Map a transport failure, separating timeouts from other network errors
pub(crate) fn classify_transport_error(err: reqwest::Error, provider: &str) -> BetBrainError {
    if err.is_timeout() {
        BetBrainError::Timeout {
            provider: provider.to_string(),
        }
    } else {
        BetBrainError::Http(err)
    }
}

pub(crate) fn classify_status(
    status: StatusCode,
    body: String,
    provider: &str,
    resource: &str,
) -> BetBrainError {
    match status {
        StatusCode::NOT_FOUND => BetBrainError::NotFound(format!("{} {}", provider, resource)),
        StatusCode::TOO_MANY_REQUESTS => BetBrainError::RateLimited(provider.to_string()),
        _ => BetBrainError::UpstreamStatus {
            provider: provider.to_string(),
            status: status.as_u16(),
            body,
        },
    }
}

#[async_trait]
impl FixtureProvider for FootballDataClient {
    async fn competitions(&self) -> Result<Vec<Competition>> {
        let response: FdCompetitionsResponse = self.get_json("/competitions", &[]).await?;
        let competitions: Vec<Competition> = response
            .competitions
            .into_iter()
            .map(FdCompetition::into_competition)
            .collect();
        info!("Fetched {} competitions", competitions.len());
        Ok(competitions)
    }

    async fn competition_matches(&self, competition_id: u64, status: &str) -> Result<Vec<Fixture>> {
        let path = format!("/competitions/{}/matches", competition_id);
        let response: FdMatchesResponse = self
            .get_json(&path, &[("status", status.to_string())])
            .await?;
        let fixtures: Vec<Fixture> = response
            .matches
            .into_iter()
            .map(FdMatch::into_fixture)
            .map(|mut f| {
                f.competition_id.get_or_insert(competition_id);
                f
            })
            .collect();
        info!(
            "Fetched {} fixtures for competition {} ({})",
            fixtures.len(),
            competition_id,
            status
        );
        Ok(fixtures)
    }

    async fn match_by_id(&self, match_id: u64) -> Result<Fixture> {
        let path = format!("/matches/{}", match_id);
        let response: FdMatch = self.get_json(&path, &[]).await?;
        if response.id == 0 {
            return Err(BetBrainError::NotFound(format!("match {}", match_id)));
        }
        Ok(response.into_fixture())
    }

    async fn team_matches(&self, team_id: u64, limit: u32) -> Result<Vec<Fixture>> {
        let path = format!("/teams/{}/matches", team_id);
        let response: FdMatchesResponse = self
            .get_json(
                &path,
                &[
                    ("status", MatchStatus::Finished.as_str().to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;
        Ok(response
            .matches
            .into_iter()
            .map(FdMatch::into_fixture)
            .collect())
    }

    async fn standings(&self, competition_id: u64) -> Result<LeagueTable> {
        let path = format!("/competitions/{}/standings", competition_id);
        let response: FdStandingsResponse = self.get_json(&path, &[]).await?;
        Ok(response.into_league_table(competition_id))
    }
}
