// The Odds API integration
// Fetches decimal bookmaker prices for the major football leagues

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::adapters::football_data::{classify_status, classify_transport_error, null_as_default};
use crate::adapters::traits::OddsSource;
use crate::config::OddsConfig;
use crate::domain::OddsQuote;
use crate::engine::round_to;
use crate::error::{BetBrainError, Result};

const PROVIDER: &str = "the-odds-api";

/// Leagues with an odds feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    #[serde(rename = "soccer_epl")]
    PremierLeague,
    #[serde(rename = "soccer_spain_la_liga")]
    LaLiga,
    #[serde(rename = "soccer_italy_serie_a")]
    SerieA,
    #[serde(rename = "soccer_germany_bundesliga")]
    Bundesliga,
    #[serde(rename = "soccer_france_ligue_one")]
    Ligue1,
}

impl League {
    pub const ALL: [League; 5] = [
        League::PremierLeague,
        League::LaLiga,
        League::SerieA,
        League::Bundesliga,
        League::Ligue1,
    ];

    /// Map a football-data competition id to its odds feed
    pub fn from_competition_id(id: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.competition_id() == id)
    }

    pub fn api_key(&self) -> &'static str {
        match self {
            League::PremierLeague => "soccer_epl",
            League::LaLiga => "soccer_spain_la_liga",
            League::SerieA => "soccer_italy_serie_a",
            League::Bundesliga => "soccer_germany_bundesliga",
            League::Ligue1 => "soccer_france_ligue_one",
        }
    }

    pub fn competition_id(&self) -> u64 {
        match self {
            League::PremierLeague => 2021,
            League::LaLiga => 2014,
            League::SerieA => 2019,
            League::Bundesliga => 2002,
            League::Ligue1 => 2015,
        }
    }
}

/// One priced outcome of a market
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Outcome {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point: Option<f64>,
}

/// Market odds (h2h, totals, btts)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketOdds {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub outcomes: Vec<Outcome>,
}

impl MarketOdds {
    fn price_of(&self, name: &str) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|o| o.name.eq_ignore_ascii_case(name))
            .map(|o| o.price)
            .filter(|p| p.is_finite() && *p > 1.0)
    }

    fn price_at(&self, name: &str, point: f64) -> Option<f64> {
        self.outcomes
            .iter()
            .find(|o| {
                o.name.eq_ignore_ascii_case(name)
                    && o.point.is_some_and(|p| (p - point).abs() < 1e-9)
            })
            .map(|o| o.price)
            .filter(|p| p.is_finite() && *p > 1.0)
    }
}

/// Bookmaker odds for an event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookmakerOdds {
    #[serde(deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub markets: Vec<MarketOdds>,
}

impl BookmakerOdds {
    fn market(&self, key: &str) -> Option<&MarketOdds> {
        self.markets.iter().find(|m| m.key == key)
    }
}

/// Event with odds from multiple bookmakers
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OddsEvent {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sport_key: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sport_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub commence_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub home_team: String,
    #[serde(deserialize_with = "null_as_default")]
    pub away_team: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bookmakers: Vec<BookmakerOdds>,
}

impl OddsEvent {
    /// Prices from the first bookmaker with a usable match-winner market.
    ///
    /// A missing draw price is derived from the two-way prices; a bookmaker
    /// whose prices leave no room for a draw is skipped.
    pub fn quote(&self) -> Option<OddsQuote> {
        self.bookmakers.iter().find_map(|bookie| {
            let h2h = bookie.market("h2h")?;
            let home = h2h.price_of(&self.home_team)?;
            let away = h2h.price_of(&self.away_team)?;

            let (draw, draw_derived) = match h2h.price_of("Draw") {
                Some(draw) => (draw, false),
                None => (derive_draw_price(home, away)?, true),
            };

            let totals = bookie.market("totals");
            let btts = bookie.market("btts");

            Some(OddsQuote {
                home,
                draw,
                away,
                source: bookie.title.clone(),
                draw_derived,
                estimated: false,
                over_2_5: totals.and_then(|m| m.price_at("Over", 2.5)),
                under_2_5: totals.and_then(|m| m.price_at("Under", 2.5)),
                btts_yes: btts.and_then(|m| m.price_of("Yes")),
            })
        })
    }

    pub fn bookmaker_titles(&self) -> impl Iterator<Item = &str> {
        self.bookmakers.iter().map(|b| b.title.as_str())
    }
}

/// Draw price implied by the residual probability of a two-way quote
pub fn derive_draw_price(home: f64, away: f64) -> Option<f64> {
    if !(home > 1.0 && away > 1.0) {
        return None;
    }
    let residual = 1.0 - (1.0 / home + 1.0 / away);
    if !residual.is_finite() || residual <= 0.0 {
        return None;
    }
    Some(round_to(1.0 / residual, 2))
}

/// The Odds API client
pub struct OddsApiClient {
    client: Client,
    config: OddsConfig,
}

impl OddsApiClient {
    pub fn new(config: OddsConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| BetBrainError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }
}

#[async_trait]
impl OddsSource for OddsApiClient {
    async fn odds(&self, league_key: &str, markets: &str) -> Result<Vec<OddsEvent>> {
        if !self.is_configured() {
            return Err(BetBrainError::NotConfigured(
                "THE_ODDS_API_KEY not set".into(),
            ));
        }

        let url = format!(
            "{}/sports/{}/odds",
            self.config.base_url.trim_end_matches('/'),
            league_key
        );

        debug!("Fetching odds from: {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("apiKey", self.config.api_key.as_str()),
                ("regions", self.config.regions.as_str()),
                ("markets", markets),
                ("oddsFormat", "decimal"),
            ])
            .send()
            .await
            .map_err(|e| classify_transport_error(e, PROVIDER))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("Odds API error {} for {}: {}", status, league_key, text);
            return Err(classify_status(status, text, PROVIDER, league_key));
        }

        let events: Vec<OddsEvent> = response.json().await?;

        info!("Fetched {} {} events with odds", events.len(), league_key);
        Ok(events)
    }
}
