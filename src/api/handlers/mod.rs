pub mod chat;
pub mod matches;
pub mod system;

pub use chat::*;
pub use matches::*;
pub use system::*;
