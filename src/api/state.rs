use std::sync::Arc;

use serde_json::Value;

use crate::adapters::{
    ChatCompletion, ChatCompletionClient, FixtureProvider, FootballDataClient, OddsApiClient,
    OddsSource,
};
use crate::config::AppConfig;
use crate::error::Result;
use crate::services::{Assistant, HealthState, MatchService, ResponseCache, TtlCache};

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub matches: Arc<MatchService>,
    pub assistant: Arc<Assistant>,
    pub health: Arc<HealthState>,
}

impl AppState {
    /// Wire the service from explicit collaborators
    pub fn new(
        config: &AppConfig,
        fixtures: Arc<dyn FixtureProvider>,
        odds: Arc<dyn OddsSource>,
        completion: Arc<dyn ChatCompletion>,
    ) -> Self {
        let cache: Arc<dyn ResponseCache<Value>> = Arc::new(TtlCache::new());
        let matches = Arc::new(MatchService::new(fixtures, odds, cache, config));
        let assistant = Arc::new(Assistant::new(
            completion,
            Arc::clone(&matches),
            config.assistant.clone(),
        ));

        Self {
            matches,
            assistant,
            health: Arc::new(HealthState::new(config)),
        }
    }

    /// Wire the service against the real upstream providers
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fixtures = Arc::new(FootballDataClient::new(&config.football_data)?);
        let odds = Arc::new(OddsApiClient::new(config.odds.clone())?);
        let completion = Arc::new(ChatCompletionClient::new(config.assistant.clone())?);
        Ok(Self::new(config, fixtures, odds, completion))
    }
}
