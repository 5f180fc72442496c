//! Wire types for `IGameServersService/GetServerList`.
//!
//! Only the one response shape we query is modelled. Field names follow the
//! upstream JSON; every field defaults to its zero value because the API
//! leaves out empty ones. Numbers are kept as `i64` so one server reporting
//! an odd value (a negative count, an out-of-range port) cannot make the
//! whole list undecodable.

use serde::{Deserialize, Serialize};

use super::error::ProviderError;

/// Top-level envelope: `{ "response": { "servers": [...] } }`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GetServerListResponse {
    pub response: ServerList,
}

/// The `response` object.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerList {
    /// Absent when no server matches the filter.
    #[serde(default)]
    pub servers: Vec<ServerRecord>,
}

/// One game server as reported by the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerRecord {
    /// Query address, `host:port`.
    pub addr: String,

    #[serde(rename = "gameport")]
    pub game_port: i64,

    #[serde(rename = "steamid")]
    pub steam_id: String,

    pub name: String,

    #[serde(rename = "appid")]
    pub app_id: i64,

    #[serde(rename = "gamedir")]
    pub game_dir: String,

    pub version: String,

    pub product: String,

    /// Master-server region code; see [`crate::lookup::region_label`].
    pub region: i64,

    pub players: i64,

    pub max_players: i64,

    pub bots: i64,

    pub map: String,

    /// VAC-secured.
    pub secure: bool,

    pub dedicated: bool,

    /// Platform code (`w`, `m`, `l`); see [`crate::lookup::platform_label`].
    pub os: String,

    #[serde(rename = "gametype")]
    pub game_type: String,
}

impl ServerRecord {
    /// Host part of the query address.
    pub fn host(&self) -> &str {
        match self.addr.rsplit_once(':') {
            Some((host, _)) => host,
            None => &self.addr,
        }
    }

    /// Address players connect to: the host with the game port.
    pub fn connect_address(&self) -> String {
        format!("{}:{}", self.host(), self.game_port)
    }
}

impl GetServerListResponse {
    /// Parse a response body into the server records it contains.
    pub fn parse(body: &str) -> Result<Vec<ServerRecord>, ProviderError> {
        let parsed: GetServerListResponse =
            serde_json::from_str(body).map_err(|e| ProviderError::decode(e, body))?;
        Ok(parsed.response.servers)
    }
}
