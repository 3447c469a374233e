use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Upper bound for corner and card market lines
pub const MAX_MARKET_LINE: f64 = 50.0;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub football_data: FootballDataConfig,
    #[serde(default)]
    pub odds: OddsConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the API server
    #[serde(default = "default_host")]
    pub host: String,
    /// API server port (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FootballDataConfig {
    /// REST endpoint for football-data.org v4
    #[serde(default = "default_football_data_url")]
    pub base_url: String,
    /// Value for the X-Auth-Token header
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_football_data_timeout")]
    pub timeout_secs: u64,
    /// Finished matches pulled per team for form analysis
    #[serde(default = "default_recent_matches")]
    pub recent_matches: u32,
    /// Fixtures returned by a league listing
    #[serde(default = "default_listing_limit")]
    pub listing_limit: usize,
}

fn default_football_data_url() -> String {
    "https://api.football-data.org/v4".to_string()
}

fn default_football_data_timeout() -> u64 {
    10
}

fn default_recent_matches() -> u32 {
    10
}

fn default_listing_limit() -> usize {
    20
}

impl Default for FootballDataConfig {
    fn default() -> Self {
        Self {
            base_url: default_football_data_url(),
            api_token: String::new(),
            timeout_secs: default_football_data_timeout(),
            recent_matches: default_recent_matches(),
            listing_limit: default_listing_limit(),
        }
    }
}

impl FootballDataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OddsConfig {
    /// REST endpoint for The Odds API v4
    #[serde(default = "default_odds_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    /// Comma separated bookmaker regions (e.g. "eu,uk")
    #[serde(default = "default_regions")]
    pub regions: String,
    /// Comma separated markets requested for match enrichment
    #[serde(default = "default_markets")]
    pub markets: String,
    #[serde(default = "default_odds_timeout")]
    pub timeout_secs: u64,
    /// League feed used to list available bookmakers
    #[serde(default = "default_bookmaker_league")]
    pub bookmaker_league: String,
}

fn default_odds_url() -> String {
    "https://api.the-odds-api.com/v4".to_string()
}

fn default_regions() -> String {
    "eu,uk".to_string()
}

fn default_markets() -> String {
    "h2h,totals,btts".to_string()
}

fn default_odds_timeout() -> u64 {
    15
}

fn default_bookmaker_league() -> String {
    "soccer_epl".to_string()
}

impl Default for OddsConfig {
    fn default() -> Self {
        Self {
            base_url: default_odds_url(),
            api_key: String::new(),
            regions: default_regions(),
            markets: default_markets(),
            timeout_secs: default_odds_timeout(),
            bookmaker_league: default_bookmaker_league(),
        }
    }
}

impl OddsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssistantConfig {
    /// OpenAI-compatible chat completions endpoint
    #[serde(default = "default_assistant_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_assistant_model")]
    pub model: String,
    #[serde(default = "default_assistant_timeout")]
    pub timeout_secs: u64,
    /// Conversation turns forwarded with each request (oldest dropped first)
    #[serde(default = "default_max_history")]
    pub max_history: usize,
    /// Upcoming fixtures analysed when a chat names a league but no match
    #[serde(default = "default_max_matches")]
    pub max_matches: usize,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_assistant_url() -> String {
    "https://api.x.ai/v1".to_string()
}

fn default_assistant_model() -> String {
    "grok-4-1-fast-reasoning".to_string()
}

fn default_assistant_timeout() -> u64 {
    30
}

fn default_max_history() -> usize {
    10
}

fn default_max_matches() -> usize {
    3
}

fn default_max_tokens() -> u32 {
    800
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: default_assistant_url(),
            api_key: String::new(),
            model: default_assistant_model(),
            timeout_secs: default_assistant_timeout(),
            max_history: default_max_history(),
            max_matches: default_max_matches(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl AssistantConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Tunable constants of the probability model
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Multiplier applied to the home side's expected goals (> 1)
    #[serde(default = "default_home_advantage")]
    pub home_advantage: f64,
    /// Multiplier applied to the away side's expected goals (< 1)
    #[serde(default = "default_away_factor")]
    pub away_factor: f64,
    /// Scales average goals scored into expected goals
    #[serde(default = "default_xg_inflation")]
    pub xg_inflation: f64,
    /// Goals per side covered by the score grid (exclusive bound)
    #[serde(default = "default_goal_grid")]
    pub goal_grid: u32,
    /// Percentage points model probability must beat implied probability by
    #[serde(default = "default_value_margin")]
    pub value_margin: f64,
    /// Goal-market probability above which a high-probability signal fires
    #[serde(default = "default_high_confidence")]
    pub high_confidence_threshold: f64,
    /// Number of form entries kept on a team snapshot
    #[serde(default = "default_form_length")]
    pub form_length: usize,
    /// Minimum similarity ratio for two team names to be considered equal
    #[serde(default = "default_name_match_threshold")]
    pub name_match_threshold: f64,
    #[serde(default = "default_corners_line")]
    pub corners_line: f64,
    #[serde(default = "default_cards_line")]
    pub cards_line: f64,
}

fn default_home_advantage() -> f64 {
    1.10
}

fn default_away_factor() -> f64 {
    0.90
}

fn default_xg_inflation() -> f64 {
    1.05
}

fn default_goal_grid() -> u32 {
    6
}

fn default_value_margin() -> f64 {
    5.0
}

fn default_high_confidence() -> f64 {
    60.0
}

fn default_form_length() -> usize {
    5
}

fn default_name_match_threshold() -> f64 {
    0.75
}

fn default_corners_line() -> f64 {
    9.5
}

fn default_cards_line() -> f64 {
    4.5
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            home_advantage: default_home_advantage(),
            away_factor: default_away_factor(),
            xg_inflation: default_xg_inflation(),
            goal_grid: default_goal_grid(),
            value_margin: default_value_margin(),
            high_confidence_threshold: default_high_confidence(),
            form_length: default_form_length(),
            name_match_threshold: default_name_match_threshold(),
            corners_line: default_corners_line(),
            cards_line: default_cards_line(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Lifetime of a cached response in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info,betbrain=debug".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("logging.level", "info,betbrain=debug")?
            .set_default("logging.json", false)?
            .set_default("cache.ttl_secs", 300)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Environment-specific overrides (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("BETBRAIN_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // BETBRAIN_ODDS__API_KEY, BETBRAIN_SERVER__PORT, ...
            .add_source(
                Environment::with_prefix("BETBRAIN")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: AppConfig = builder.build()?.try_deserialize()?;
        config.apply_provider_keys();
        Ok(config)
    }

    /// Fill empty credentials from the providers' conventional variable names
    fn apply_provider_keys(&mut self) {
        if self.football_data.api_token.is_empty() {
            self.football_data.api_token = std::env::var("FOOTBALL_DATA_TOKEN").unwrap_or_default();
        }
        if self.odds.api_key.is_empty() {
            self.odds.api_key = std::env::var("THE_ODDS_API_KEY").unwrap_or_default();
        }
        if self.assistant.api_key.is_empty() {
            self.assistant.api_key = std::env::var("CHAT_API_KEY").unwrap_or_default();
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let model = &self.model;

        if model.home_advantage < 1.0 {
            errors.push("model.home_advantage must be >= 1".to_string());
        }
        if model.away_factor <= 0.0 || model.away_factor > 1.0 {
            errors.push("model.away_factor must be in (0, 1]".to_string());
        }
        if model.xg_inflation <= 0.0 {
            errors.push("model.xg_inflation must be positive".to_string());
        }
        if model.goal_grid < 2 || model.goal_grid > 20 {
            errors.push("model.goal_grid must be between 2 and 20".to_string());
        }
        if model.value_margin < 0.0 {
            errors.push("model.value_margin must not be negative".to_string());
        }
        if !(0.0..=100.0).contains(&model.high_confidence_threshold) {
            errors.push("model.high_confidence_threshold must be between 0 and 100".to_string());
        }
        if model.form_length == 0 {
            errors.push("model.form_length must be at least 1".to_string());
        }
        if !(0.0..=1.0).contains(&model.name_match_threshold) {
            errors.push("model.name_match_threshold must be between 0 and 1".to_string());
        }
        for (name, line) in [
            ("model.corners_line", model.corners_line),
            ("model.cards_line", model.cards_line),
        ] {
            if !line.is_finite() || !(0.0..=MAX_MARKET_LINE).contains(&line) {
                errors.push(format!("{} must be between 0 and {}", name, MAX_MARKET_LINE));
            }
        }
        if self.cache.ttl_secs == 0 {
            errors.push("cache.ttl_secs must be positive".to_string());
        }
        if self.football_data.listing_limit == 0 {
            errors.push("football_data.listing_limit must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
