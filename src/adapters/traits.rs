//! Seams between the service layer and the upstream providers.
//!
//! Each upstream collaborator sits behind an async trait so the match
//! service can be exercised with in-process fakes.

use async_trait::async_trait;
use tracing::warn;

use crate::adapters::odds_api::OddsEvent;
use crate::domain::{ChatMessage, Competition, Fixture, LeagueTable};
use crate::error::Result;

/// Fixture and standings provider (football-data.org)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FixtureProvider: Send + Sync {
    async fn competitions(&self) -> Result<Vec<Competition>>;

    /// Fixtures of a competition, `status` is a comma separated filter
    async fn competition_matches(&self, competition_id: u64, status: &str) -> Result<Vec<Fixture>>;

    async fn match_by_id(&self, match_id: u64) -> Result<Fixture>;

    /// Most recent finished fixtures of a team
    async fn team_matches(&self, team_id: u64, limit: u32) -> Result<Vec<Fixture>>;

    async fn standings(&self, competition_id: u64) -> Result<LeagueTable>;
}

/// Bookmaker odds provider (The Odds API)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Events with prices for `league_key`, `markets` is a comma separated list
    async fn odds(&self, league_key: &str, markets: &str) -> Result<Vec<OddsEvent>>;
}

/// Text-completion service behind the conversational assistant
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, system: &str, messages: &[ChatMessage]) -> Result<String>;
}

/// Outcome of a best-effort upstream call
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Lookup<T> {
    /// Convert a call result, logging the failure that is being absorbed
    pub fn from_result(result: Result<T>, what: &str) -> Self {
        match result {
            Ok(value) => Lookup::Available(value),
            Err(e) => {
                warn!("{} unavailable: {}", what, e);
                Lookup::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Lookup::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Lookup::Available(_))
    }

    pub fn as_option(&self) -> Option<&T> {
        match self {
            Lookup::Available(value) => Some(value),
            Lookup::Unavailable { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Lookup::Available(_) => None,
            Lookup::Unavailable { reason } => Some(reason),
        }
    }
}
