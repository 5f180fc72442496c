//! Steam Web API game server directory client.
//!
//! Queries `IGameServersService/GetServerList` for the servers of one
//! application and version line. Key characteristics of the endpoint:
//! - Authentication is a `key` query parameter, not a header
//! - Filtering is a single backslash-delimited `filter` string
//! - When nothing matches, `response.servers` is omitted entirely

mod client;
mod error;
mod mock;
mod provider;
mod types;

pub use client::{SteamClient, SteamConfig};
pub use error::ProviderError;
pub use mock::MockProvider;
pub use provider::ServerProvider;
pub use types::{GetServerListResponse, ServerList, ServerRecord};
