pub mod chat;
pub mod fixture;
pub mod market;
pub mod outcome;
pub mod team;

pub use chat::*;
pub use fixture::*;
pub use market::*;
pub use outcome::*;
pub use team::*;
