//! Match service: combines fixtures, standings and odds with the prediction
//! engine, caching every response by endpoint and parameters.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::adapters::{FixtureProvider, League, Lookup, OddsEvent, OddsSource};
use crate::config::{AppConfig, FootballDataConfig, OddsConfig};
use crate::domain::{
    Competition, ExpectedGoals, Fixture, GoalMarkets, LeagueTable, OddsQuote,
    OutcomeDistribution, StandingRow, TeamSnapshot, ValueSignal,
};
use crate::engine::{best_match, MatchPrediction, Predictor, SideInputs};
use crate::error::Result;
use crate::services::cache::ResponseCache;

/// Competitions offered by the fixture provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitionList {
    pub count: usize,
    pub competitions: Vec<Competition>,
}

/// Standings-based prediction attached to a listed fixture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickPrediction {
    pub expected_goals: ExpectedGoals,
    pub outcome: OutcomeDistribution,
    pub goals: GoalMarkets,
    pub signals: Vec<ValueSignal>,
}

impl From<MatchPrediction> for QuickPrediction {
    fn from(prediction: MatchPrediction) -> Self {
        Self {
            expected_goals: prediction.expected_goals,
            outcome: prediction.probabilities.outcome,
            goals: prediction.probabilities.goals,
            signals: prediction.signals,
        }
    }
}

/// A fixture enriched with odds and, when standings exist, a quick prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListedMatch {
    pub fixture: Fixture,
    /// Bookmaker quote, or the `Estimated` placeholder
    pub odds: OddsQuote,
    /// Whether `odds` came from a bookmaker matched to this fixture
    pub odds_matched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<QuickPrediction>,
}

/// Enriched fixtures of a competition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListing {
    pub competition_id: u64,
    pub status: String,
    pub count: usize,
    pub matches: Vec<ListedMatch>,
    pub odds_available: bool,
    pub standings_available: bool,
}

/// One side of an analysed fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamAnalysis {
    pub snapshot: TeamSnapshot,
    pub form: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standing: Option<StandingRow>,
}

impl TeamAnalysis {
    fn new(snapshot: TeamSnapshot, standing: Option<&StandingRow>) -> Self {
        Self {
            form: snapshot.form_string(),
            snapshot,
            standing: standing.cloned(),
        }
    }
}

/// Which inputs fed an analysis; `notes` holds the reason for each gap
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSources {
    pub home_history: bool,
    pub away_history: bool,
    pub standings: bool,
    pub odds: bool,
    pub notes: Vec<String>,
}

/// Detailed analysis of a single fixture
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchAnalysis {
    pub fixture: Fixture,
    pub home: TeamAnalysis,
    pub away: TeamAnalysis,
    pub prediction: MatchPrediction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub odds: Option<OddsQuote>,
    pub data_sources: DataSources,
}

/// Raw odds feed of a league. Never an error: failures are reported in `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OddsFeed {
    pub league_key: String,
    pub count: usize,
    pub data: Vec<OddsEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmakerList {
    pub league_key: String,
    pub count: usize,
    pub bookmakers: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct MatchService {
    fixtures: Arc<dyn FixtureProvider>,
    odds: Arc<dyn OddsSource>,
    cache: Arc<dyn ResponseCache<Value>>,
    predictor: Predictor,
    football_data: FootballDataConfig,
    odds_config: OddsConfig,
    ttl: Duration,
}

impl MatchService {
    pub fn new(
        fixtures: Arc<dyn FixtureProvider>,
        odds: Arc<dyn OddsSource>,
        cache: Arc<dyn ResponseCache<Value>>,
        config: &AppConfig,
    ) -> Self {
        Self {
            fixtures,
            odds,
            cache,
            predictor: Predictor::new(config.model.clone()),
            football_data: config.football_data.clone(),
            odds_config: config.odds.clone(),
            ttl: config.cache.ttl(),
        }
    }

    pub fn predictor(&self) -> &Predictor {
        &self.predictor
    }

    /// Serve `key` from the cache, or run `load` and cache its result.
    /// Errors are never cached.
    async fn cached<T, F>(&self, key: String, load: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.cache.get(&key) {
            match serde_json::from_value::<T>(hit.as_ref().clone()) {
                Ok(value) => {
                    debug!(key = %key, "serving from cache");
                    return Ok(value);
                }
                Err(e) => warn!(key = %key, "discarding unreadable cache entry: {}", e),
            }
        }

        let value = load.await?;
        self.cache.set(&key, serde_json::to_value(&value)?, self.ttl);
        Ok(value)
    }

    pub async fn competitions(&self) -> Result<CompetitionList> {
        self.cached("competitions".to_string(), async {
            let competitions = self.fixtures.competitions().await?;
            Ok(CompetitionList {
                count: competitions.len(),
                competitions,
            })
        })
        .await
    }

    pub async fn standings(&self, competition_id: u64) -> Result<LeagueTable> {
        self.cached(
            format!("standings_{}", competition_id),
            self.fixtures.standings(competition_id),
        )
        .await
    }

    /// Odds events of a league, cached per league key
    async fn odds_events(&self, league_key: &str) -> Result<Vec<OddsEvent>> {
        self.cached(
            format!("odds_{}", league_key),
            self.odds.odds(league_key, &self.odds_config.markets),
        )
        .await
    }

    async fn odds_lookup(&self, league: Option<League>) -> Lookup<Vec<OddsEvent>> {
        match league {
            Some(league) => Lookup::from_result(self.odds_events(league.api_key()).await, "odds"),
            None => Lookup::unavailable("competition not covered by the odds feed"),
        }
    }

    async fn standings_lookup(&self, competition_id: Option<u64>) -> Lookup<LeagueTable> {
        match competition_id {
            Some(id) => Lookup::from_result(self.standings(id).await, "standings"),
            None => Lookup::unavailable("fixture has no competition"),
        }
    }

    /// Best bookmaker quote for a fixture among `events`
    fn quote_for(&self, fixture: &Fixture, events: &[OddsEvent]) -> Option<OddsQuote> {
        best_match(
            events,
            &fixture.home.name,
            &fixture.away.name,
            self.predictor.config().name_match_threshold,
            |e| (e.home_team.as_str(), e.away_team.as_str()),
        )
        .and_then(OddsEvent::quote)
    }

    /// Fixtures of a competition with odds and quick predictions.
    ///
    /// Only the fixture fetch is required; odds and standings degrade.
    #[instrument(skip(self))]
    pub async fn matches(&self, competition_id: u64, status: &str) -> Result<MatchListing> {
        self.cached(
            format!("matches_{}_{}", competition_id, status),
            self.load_matches(competition_id, status),
        )
        .await
    }

    async fn load_matches(&self, competition_id: u64, status: &str) -> Result<MatchListing> {
        let league = League::from_competition_id(competition_id);

        let (fixtures, odds, table) = tokio::join!(
            self.fixtures.competition_matches(competition_id, status),
            self.odds_lookup(league),
            self.standings_lookup(Some(competition_id)),
        );
        let fixtures = fixtures?;

        let events: &[OddsEvent] = odds.as_option().map(Vec::as_slice).unwrap_or_default();
        let table = table.as_option();

        let matches: Vec<ListedMatch> = fixtures
            .into_iter()
            .take(self.football_data.listing_limit)
            .map(|fixture| {
                let quote = self.quote_for(&fixture, events);
                let prediction = table.and_then(|t| {
                    let home = t.row_for(fixture.home.id)?;
                    let away = t.row_for(fixture.away.id)?;
                    let prediction = self.predictor.predict(
                        SideInputs::new(None, Some(home)),
                        SideInputs::new(None, Some(away)),
                        quote.as_ref(),
                    );
                    Some(QuickPrediction::from(prediction))
                });

                ListedMatch {
                    odds_matched: quote.is_some(),
                    odds: quote.unwrap_or_else(OddsQuote::placeholder),
                    prediction,
                    fixture,
                }
            })
            .collect();

        info!(
            competition_id,
            matches = matches.len(),
            odds_events = events.len(),
            "Built match listing"
        );

        Ok(MatchListing {
            competition_id,
            status: status.to_string(),
            count: matches.len(),
            matches,
            odds_available: !events.is_empty(),
            standings_available: table.is_some(),
        })
    }

    /// Full analysis of one fixture from both teams' recent form.
    ///
    /// Only the match detail is required; team history, standings and odds
    /// degrade to neutral inputs with a note.
    #[instrument(skip(self))]
    pub async fn match_analysis(&self, match_id: u64) -> Result<MatchAnalysis> {
        self.cached(
            format!("analysis_{}", match_id),
            self.load_analysis(match_id),
        )
        .await
    }

    async fn load_analysis(&self, match_id: u64) -> Result<MatchAnalysis> {
        let fixture = self.fixtures.match_by_id(match_id).await?;
        let limit = self.football_data.recent_matches;
        let league = fixture.competition_id.and_then(League::from_competition_id);

        let (home_history, away_history, table, odds) = tokio::join!(
            self.fixtures.team_matches(fixture.home.id, limit),
            self.fixtures.team_matches(fixture.away.id, limit),
            self.standings_lookup(fixture.competition_id),
            self.odds_lookup(league),
        );
        let home_history = Lookup::from_result(home_history, "home team history");
        let away_history = Lookup::from_result(away_history, "away team history");

        let mut sources = DataSources::default();
        let aggregator = self.predictor.aggregator();
        let mut snapshot = |history: &Lookup<Vec<Fixture>>, team_id: u64, side: &str| {
            match history.as_option() {
                Some(matches) => aggregator.aggregate(team_id, matches),
                None => {
                    if let Some(reason) = history.reason() {
                        sources.notes.push(format!("{} history: {}", side, reason));
                    }
                    TeamSnapshot::empty(team_id)
                }
            }
        };
        let home_snapshot = snapshot(&home_history, fixture.home.id, "home");
        let away_snapshot = snapshot(&away_history, fixture.away.id, "away");

        if let Some(reason) = table.reason() {
            sources.notes.push(format!("standings: {}", reason));
        }
        if let Some(reason) = odds.reason() {
            sources.notes.push(format!("odds: {}", reason));
        }

        let table = table.as_option();
        let home_row = table.and_then(|t| t.row_for(fixture.home.id));
        let away_row = table.and_then(|t| t.row_for(fixture.away.id));

        let quote = odds
            .as_option()
            .and_then(|events| self.quote_for(&fixture, events));

        let prediction = self.predictor.predict(
            SideInputs::new(Some(&home_snapshot), home_row),
            SideInputs::new(Some(&away_snapshot), away_row),
            quote.as_ref(),
        );

        sources.home_history = home_snapshot.has_history();
        sources.away_history = away_snapshot.has_history();
        sources.standings = table.is_some();
        sources.odds = quote.is_some();

        info!(
            match_id,
            home_xg = prediction.expected_goals.home,
            away_xg = prediction.expected_goals.away,
            signals = prediction.signals.len(),
            "Analysed {}",
            fixture.title()
        );

        Ok(MatchAnalysis {
            home: TeamAnalysis::new(home_snapshot, home_row),
            away: TeamAnalysis::new(away_snapshot, away_row),
            prediction,
            odds: quote,
            data_sources: sources,
            fixture,
        })
    }

    /// Raw odds for a league key
    pub async fn league_odds(&self, league_key: &str) -> OddsFeed {
        match self.odds_events(league_key).await {
            Ok(data) => OddsFeed {
                league_key: league_key.to_string(),
                count: data.len(),
                data,
                error: None,
            },
            Err(e) => {
                warn!("Odds feed {} unavailable: {}", league_key, e);
                OddsFeed {
                    league_key: league_key.to_string(),
                    count: 0,
                    data: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Distinct bookmaker titles quoting the reference league
    pub async fn bookmakers(&self) -> BookmakerList {
        let league_key = self.odds_config.bookmaker_league.clone();
        let feed = self.league_odds(&league_key).await;

        let mut bookmakers: Vec<String> = Vec::new();
        for title in feed.data.iter().flat_map(OddsEvent::bookmaker_titles) {
            if !bookmakers.iter().any(|b| b == title) {
                bookmakers.push(title.to_string());
            }
        }

        BookmakerList {
            league_key,
            count: bookmakers.len(),
            bookmakers,
            error: feed.error,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::adapters::traits::{MockFixtureProvider, MockOddsSource};
    use crate::adapters::{BookmakerOdds, MarketOdds, Outcome};
    use crate::domain::{MatchStatus, TeamRef};
    use crate::error::BetBrainError;
    use crate::services::cache::TtlCache;

    pub(crate) fn fixture(id: u64, home: (u64, &str), away: (u64, &str)) -> Fixture {
        Fixture {
            id,
            competition_id: Some(2021),
            competition_name: Some("Premier League".into()),
            kickoff: None,
            status: MatchStatus::Scheduled,
            matchday: Some(1),
            home: TeamRef::new(home.0, home.1),
            away: TeamRef::new(away.0, away.1),
            home_goals: None,
            away_goals: None,
        }
    }

    fn played(id: u64, home: u64, away: u64, goals: (u32, u32)) -> Fixture {
        let mut f = fixture(id, (home, "H"), (away, "A"));
        f.status = MatchStatus::Finished;
        f.home_goals = Some(goals.0);
        f.away_goals = Some(goals.1);
        f
    }

    fn row(team_id: u64, name: &str, played: u32, goals_for: u32, goals_against: u32) -> StandingRow {
        StandingRow {
            position: 1,
            team: TeamRef::new(team_id, name),
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

    pub(crate) fn table() -> LeagueTable {
        LeagueTable {
            competition_id: 2021,
            competition_name: Some("Premier League".into()),
            rows: vec![
                row(57, "Arsenal FC", 10, 22, 8),
                row(62, "Everton FC", 10, 9, 15),
            ],
        }
    }

    pub(crate) fn odds_event(home: &str, away: &str, prices: (f64, f64, f64)) -> OddsEvent {
        OddsEvent {
            id: format!("{home}-{away}"),
            sport_key: "soccer_epl".into(),
            home_team: home.into(),
            away_team: away.into(),
            bookmakers: vec![BookmakerOdds {
                key: "pinnacle".into(),
                title: "Pinnacle".into(),
                markets: vec![MarketOdds {
                    key: "h2h".into(),
                    outcomes: vec![
                        Outcome { name: home.into(), price: prices.0, point: None },
                        Outcome { name: "Draw".into(), price: prices.1, point: None },
                        Outcome { name: away.into(), price: prices.2, point: None },
                    ],
                }],
            }],
            ..Default::default()
        }
    }

    fn service(fixtures: MockFixtureProvider, odds: MockOddsSource) -> MatchService {
        MatchService::new(
            Arc::new(fixtures),
            Arc::new(odds),
            Arc::new(TtlCache::new()),
            &AppConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_listing_survives_odds_failure() {
        let mut fixtures = MockFixtureProvider::new();
        fixtures
            .expect_competition_matches()
            .returning(|_, _| Ok(vec![fixture(1, (57, "Arsenal FC"), (62, "Everton FC"))]));
        fixtures.expect_standings().returning(|_| Ok(table()));

        let mut odds = MockOddsSource::new();
        odds.expect_odds().returning(|_, _| {
            Err(BetBrainError::Timeout {
                provider: "the-odds-api".into(),
            })
        });

        let listing = service(fixtures, odds)
            .matches(2021, "SCHEDULED,LIVE")
            .await
            .unwrap();

        assert!(!listing.odds_available);
        assert!(listing.standings_available);
        assert_eq!(listing.count, 1);
        let listed = &listing.matches[0];
        assert!(!listed.odds_matched);
        assert!(listed.odds.estimated);
        assert_eq!(listed.odds.source, "Estimated");
        let prediction = listed.prediction.as_ref().unwrap();
        assert!(prediction.outcome.home_win > prediction.outcome.away_win);
        assert!(prediction.signals.iter().all(|s| !s.is_value()));
    }

    #[tokio::test]
    async fn test_listing_attaches_matched_quotes_and_limits() {
        let mut fixtures = MockFixtureProvider::new();
        fixtures.expect_competition_matches().returning(|_, _| {
            let mut all = vec![fixture(1, (57, "Arsenal FC"), (62, "Everton FC"))];
            all.extend((2..30).map(|i| fixture(i, (100 + i, "Brentford FC"), (200 + i, "Fulham FC"))));
            Ok(all)
        });
        fixtures
            .expect_standings()
            .returning(|_| Err(BetBrainError::NotFound("standings".into())));

        let mut odds = MockOddsSource::new();
        odds.expect_odds()
            .withf(|league, markets| league == "soccer_epl" && markets == "h2h,totals,btts")
            .returning(|_, _| Ok(vec![odds_event("Arsenal", "Everton", (1.65, 4.0, 5.5))]));

        let listing = service(fixtures, odds).matches(2021, "SCHEDULED").await.unwrap();

        assert_eq!(listing.count, 20);
        assert!(listing.odds_available);
        assert!(!listing.standings_available);

        let first = &listing.matches[0];
        assert!(first.odds_matched);
        assert_eq!(first.odds.source, "Pinnacle");
        assert_eq!(first.odds.home, 1.65);
        assert!(first.prediction.is_none());

        assert!(!listing.matches[1].odds_matched);
    }

    #[tokio::test]
    async fn test_listing_fails_when_fixtures_fail() {
        let mut fixtures = MockFixtureProvider::new();
        fixtures.expect_competition_matches().returning(|_, _| {
            Err(BetBrainError::UpstreamStatus {
                provider: "football-data".into(),
                status: 503,
                body: String::new(),
            })
        });
        fixtures.expect_standings().returning(|_| Ok(table()));
        let mut odds = MockOddsSource::new();
        odds.expect_odds().returning(|_, _| Ok(vec![]));

        let err = service(fixtures, odds).matches(2021, "SCHEDULED").await.unwrap_err();
        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_uncovered_competition_skips_odds() {
        let mut fixtures = MockFixtureProvider::new();
        fixtures
            .expect_competition_matches()
            .returning(|_, _| Ok(vec![fixture(1, (1, "Ajax"), (2, "PSV"))]));
        fixtures.expect_standings().returning(|_| Ok(LeagueTable::default()));
        let mut odds = MockOddsSource::new();
        odds.expect_odds().never();

        let listing = service(fixtures, odds).matches(2003, "SCHEDULED").await.unwrap();
        assert!(!listing.odds_available);
        assert!(listing.matches[0].prediction.is_none());
    }

    #[tokio::test]
    async fn test_responses_are_cached() {
        let mut fixtures = MockFixtureProvider::new();
        fixtures.expect_competitions().times(1).returning(|| {
            Ok(vec![Competition {
                id: 2021,
                name: "Premier League".into(),
                code: Some("PL".into()),
                area: None,
                emblem: None,
                odds_key: Some("soccer_epl".into()),
            }])
        });
        let service = service(fixtures, MockOddsSource::new());

        let first = service.competitions().await.unwrap();
        let second = service.competitions().await.unwrap();
        assert_eq!(first.count, 1);
        assert_eq!(second.competitions[0].name, "Premier League");
    }

    #[tokio::test]
    async fn test_analysis_uses_history_and_odds() {
        let mut fixtures = MockFixtureProvider::new();
        fixtures
            .expect_match_by_id()
            .returning(|id| Ok(fixture(id, (57, "Arsenal FC"), (62, "Everton FC"))));
        fixtures.expect_team_matches().returning(|team_id, _| {
            if team_id == 57 {
                Ok(vec![
                    played(10, 57, 1, (3, 0)),
                    played(11, 2, 57, (1, 2)),
                    played(12, 57, 3, (2, 2)),
                ])
            } else {
                Ok(vec![played(20, team_id, 4, (0, 1)), played(21, 5, team_id, (2, 0))])
            }
        });
        fixtures.expect_standings().returning(|_| Ok(table()));

        let mut odds = MockOddsSource::new();
        odds.expect_odds()
            .returning(|_, _| Ok(vec![odds_event("Arsenal", "Everton", (3.0, 3.5, 2.5))]));

        let analysis = service(fixtures, odds).match_analysis(436).await.unwrap();

        assert_eq!(analysis.home.snapshot.matches_analyzed, 3);
        assert_eq!(analysis.home.form, "WWD");
        assert_eq!(analysis.away.form, "LL");
        assert!(analysis.data_sources.odds);
        assert!(analysis.data_sources.notes.is_empty());
        assert!(analysis.prediction.expected_corners.is_some());

        // Generous home price against a strong home side
        assert!(analysis.prediction.value_signals().any(|s| s.label().contains("Home win")));
    }

    #[tokio::test]
    async fn test_analysis_degrades_without_history() {
        let mut fixtures = MockFixtureProvider::new();
        fixtures
            .expect_match_by_id()
            .returning(|id| Ok(fixture(id, (57, "Arsenal FC"), (62, "Everton FC"))));
        fixtures.expect_team_matches().returning(|_, _| {
            Err(BetBrainError::RateLimited("football-data".into()))
        });
        fixtures.expect_standings().returning(|_| Ok(table()));
        let mut odds = MockOddsSource::new();
        odds.expect_odds()
            .returning(|_, _| Err(BetBrainError::NotConfigured("key".into())));

        let analysis = service(fixtures, odds).match_analysis(7).await.unwrap();

        assert!(!analysis.data_sources.home_history);
        assert!(!analysis.data_sources.odds);
        assert_eq!(analysis.data_sources.notes.len(), 3);
        assert!(analysis.odds.is_none());
        // Standings rates: (2.2 + 1.5) / 2 * 1.10
        assert_eq!(analysis.prediction.expected_goals.home, 2.04);
        assert!(analysis.prediction.expected_corners.is_none());
    }

    #[tokio::test]
    async fn test_analysis_missing_match_is_not_found() {
        let mut fixtures = MockFixtureProvider::new();
        fixtures
            .expect_match_by_id()
            .returning(|id| Err(BetBrainError::NotFound(format!("match {id}"))));

        let err = service(fixtures, MockOddsSource::new())
            .match_analysis(1)
            .await
            .unwrap_err();
        assert!(matches!(err, BetBrainError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_league_odds_reports_errors_in_body() {
        let mut odds = MockOddsSource::new();
        odds.expect_odds().returning(|_, _| {
            Err(BetBrainError::UpstreamStatus {
                provider: "the-odds-api".into(),
                status: 401,
                body: "invalid key".into(),
            })
        });

        let feed = service(MockFixtureProvider::new(), odds)
            .league_odds("soccer_epl")
            .await;
        assert!(feed.data.is_empty());
        assert!(feed.error.unwrap().contains("401"));
    }

    #[tokio::test]
    async fn test_bookmakers_are_distinct() {
        let mut odds = MockOddsSource::new();
        odds.expect_odds().returning(|_, _| {
            let mut second = odds_event("Chelsea", "Fulham", (1.8, 3.6, 4.2));
            second.bookmakers.push(BookmakerOdds {
                key: "betfair".into(),
                title: "Betfair".into(),
                markets: vec![],
            });
            Ok(vec![odds_event("Arsenal", "Everton", (1.65, 4.0, 5.5)), second])
        });

        let list = service(MockFixtureProvider::new(), odds).bookmakers().await;
        assert_eq!(list.bookmakers, vec!["Pinnacle", "Betfair"]);
        assert_eq!(list.count, 2);
        assert!(list.error.is_none());
    }
}
