mod client;
mod endpoints;
mod league;
pub mod tag;
pub mod types;

pub use client::BrawlClient;
#[cfg(test)]
pub(crate) use client::tests::client as client_for_tests;
pub use league::{PowerLeagueRank, rank_name};
pub use types::{BrawlerInfo, PlayerBrawlerDto, PlayerDto};
