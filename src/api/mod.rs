#[cfg(test)]
pub mod mock;
pub mod models;
pub mod provider;
pub mod riot_client;

pub use provider::MatchDataProvider;
pub use riot_client::RiotClient;
