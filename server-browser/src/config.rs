//! Startup configuration.
//!
//! Parsed from command-line flags, each of which can also be given through
//! the environment.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::cache::CacheConfig;
use crate::steam::SteamConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Command-line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "server-browser")]
#[command(about = "Web page listing the live game servers known to the Steam directory")]
pub struct Args {
    /// Steam Web API key (get one at https://steamcommunity.com/dev/apikey)
    #[arg(long, env = "STEAM_API_KEY", hide_env_values = true)]
    pub apikey: Option<String>,

    /// Host and port for the web server, e.g. `0.0.0.0:8080` or `localhost:8080`
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    pub addr: String,

    /// Serve a recorded GetServerList response instead of querying Steam
    #[arg(long, env = "MOCK_DATA")]
    pub mock_data: Option<PathBuf>,

    /// Seconds a fetched server list is served before refreshing
    #[arg(long, env = "CACHE_TTL_SECS", default_value_t = 60)]
    pub cache_ttl: u64,
}

/// Where server records come from.
#[derive(Debug, Clone)]
pub enum Source {
    Steam(SteamConfig),
    Mock(PathBuf),
}

/// Validated startup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub source: Source,
    /// `host:port`, resolved when the listener binds.
    pub bind: String,
    pub cache: CacheConfig,
}

/// Errors that stop the process before it starts serving.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("an api key is required! get one at https://steamcommunity.com/dev/apikey")]
    MissingApiKey,

    #[error("invalid bind address {addr:?}: expected host:port")]
    InvalidBindAddress { addr: String },
}

/// Check that `addr` looks like `host:port`. The host is resolved later.
fn validate_bind(addr: &str) -> Result<(), ConfigError> {
    let invalid = || ConfigError::InvalidBindAddress {
        addr: addr.to_string(),
    };
    let (host, port) = addr.rsplit_once(':').ok_or_else(invalid)?;
    if host.is_empty() || port.parse::<u16>().is_err() {
        return Err(invalid());
    }
    Ok(())
}

impl Config {
    /// Validate parsed arguments.
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        validate_bind(&args.addr)?;

        let source = match (args.mock_data, args.apikey) {
            (Some(path), _) => Source::Mock(path),
            (None, Some(key)) if !key.trim().is_empty() => Source::Steam(SteamConfig::new(key)),
            (None, _) => return Err(ConfigError::MissingApiKey),
        };

        Ok(Self {
            source,
            bind: args.addr,
            cache: CacheConfig {
                ttl: Duration::from_secs(args.cache_ttl),
            },
        })
    }
}
