pub mod assistant;
pub mod cache;
pub mod health;
pub mod match_service;

pub use assistant::{Assistant, ChatReply, ChatRequest, ReplySource};
pub use cache::{ResponseCache, TtlCache};
pub use health::{ComponentHealth, HealthResponse, HealthState, HealthStatus};
pub use match_service::{
    BookmakerList, CompetitionList, DataSources, ListedMatch, MatchAnalysis, MatchListing,
    MatchService, OddsFeed, QuickPrediction, TeamAnalysis,
};
