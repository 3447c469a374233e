pub mod api_server;
pub mod chat_completion;
pub mod football_data;
pub mod odds_api;
pub mod traits;

pub use api_server::start_api_server;
pub use chat_completion::ChatCompletionClient;
pub use football_data::FootballDataClient;
pub use odds_api::{
    derive_draw_price, BookmakerOdds, League, MarketOdds, OddsApiClient, OddsEvent, Outcome,
};
pub use traits::{ChatCompletion, FixtureProvider, Lookup, OddsSource};
