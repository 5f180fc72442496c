//! Steam Web API HTTP client.

use std::time::Duration;

use tracing::debug;

use super::error::{ProviderError, excerpt};
use super::provider::ServerProvider;
use super::types::{GetServerListResponse, ServerRecord};

/// Default base URL for the Steam Web API.
const DEFAULT_BASE_URL: &str = "https://api.steampowered.com";

/// Path of the server list method, relative to the base URL.
const SERVER_LIST_PATH: &str = "IGameServersService/GetServerList/v1/";

/// Garry's Mod.
const DEFAULT_APP_ID: u32 = 4000;

/// Any 1.x build.
const DEFAULT_VERSION_MATCH: &str = "1.*";

/// Configuration for the Steam client.
#[derive(Debug, Clone)]
pub struct SteamConfig {
    /// Steam Web API key, sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production Steam)
    pub base_url: String,
    /// Application whose servers are listed
    pub app_id: u32,
    /// Version glob passed to the directory's `version_match` filter
    pub version_match: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SteamConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            app_id: DEFAULT_APP_ID,
            version_match: DEFAULT_VERSION_MATCH.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the application id to list servers for.
    pub fn with_app_id(mut self, app_id: u32) -> Self {
        self.app_id = app_id;
        self
    }

    /// Set the version glob.
    pub fn with_version_match(mut self, pattern: impl Into<String>) -> Self {
        self.version_match = pattern.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The directory filter string, e.g. `\appid\4000\version_match\1.*`.
    pub fn filter(&self) -> String {
        format!(
            "\\appid\\{}\\version_match\\{}",
            self.app_id, self.version_match
        )
    }
}

/// Client for the Steam game server directory.
#[derive(Debug, Clone)]
pub struct SteamClient {
    http: reqwest::Client,
    url: String,
    filter: String,
    api_key: String,
}

impl SteamClient {
    /// Create a new Steam client with the given configuration.
    pub fn new(config: SteamConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let url = format!(
            "{}/{}",
            config.base_url.trim_end_matches('/'),
            SERVER_LIST_PATH
        );

        Ok(Self {
            http,
            url,
            filter: config.filter(),
            api_key: config.api_key,
        })
    }

    /// Fetch the filtered server list.
    pub async fn get_server_list(&self) -> Result<Vec<ServerRecord>, ProviderError> {
        debug!(url = %self.url, filter = %self.filter, "querying server directory");

        let response = self
            .http
            .get(&self.url)
            .query(&[("filter", self.filter.as_str()), ("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::Unauthorized);
        }

        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => excerpt(&body),
                Err(e) => format!("failed to read response body: {e}"),
            };
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;

        GetServerListResponse::parse(&body)
    }
}

impl ServerProvider for SteamClient {
    async fn fetch(&self) -> Result<Vec<ServerRecord>, ProviderError> {
        self.get_server_list().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::Router;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use std::collections::HashMap;

    /// Serve `app` on an ephemeral loopback port and return its base URL.
    async fn spawn_upstream(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: &str) -> SteamClient {
        SteamClient::new(SteamConfig::new("test-key").with_base_url(base_url)).unwrap()
    }

    #[test]
    fn config_builder() {
        let config = SteamConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_app_id(440)
            .with_version_match("2.*")
            .with_timeout(5);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.app_id, 440);
        assert_eq!(config.version_match, "2.*");
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn config_defaults() {
        let config = SteamConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.app_id, 4000);
        assert_eq!(config.version_match, "1.*");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.filter(), r"\appid\4000\version_match\1.*");
    }

    #[tokio::test]
    async fn sends_filter_and_key() {
        let app = Router::new().route(
            "/IGameServersService/GetServerList/v1/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let ok = params.get("filter").map(String::as_str)
                    == Some(r"\appid\4000\version_match\1.*")
                    && params.get("key").map(String::as_str) == Some("test-key");
                if ok {
                    (
                        StatusCode::OK,
                        r#"{"response":{"servers":[{"name":"a"},{"name":"b"},{"name":"c"}]}}"#,
                    )
                } else {
                    (StatusCode::BAD_REQUEST, "bad query")
                }
            }),
        );
        let base = spawn_upstream(app).await;

        let servers = client_for(&base).fetch().await.unwrap();
        let names: Vec<_> = servers.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn forbidden_is_unauthorized() {
        let app = Router::new().route(
            "/IGameServersService/GetServerList/v1/",
            get(|| async { (StatusCode::FORBIDDEN, "<html>Access is denied</html>") }),
        );
        let base = spawn_upstream(app).await;

        let err = client_for(&base).fetch().await.unwrap_err();
        assert!(matches!(err, ProviderError::Unauthorized));
    }

    #[tokio::test]
    async fn server_error_is_status() {
        let app = Router::new().route(
            "/IGameServersService/GetServerList/v1/",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "try later") }),
        );
        let base = spawn_upstream(app).await;

        let err = client_for(&base).fetch().await.unwrap_err();
        match err {
            ProviderError::Status { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "try later");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn long_error_body_is_cut_short() {
        let app = Router::new().route(
            "/IGameServersService/GetServerList/v1/",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "e".repeat(2000)) }),
        );
        let base = spawn_upstream(app).await;

        let err = client_for(&base).fetch().await.unwrap_err();
        let ProviderError::Status { status, message } = err else {
            panic!("expected status error, got {err:?}");
        };
        assert_eq!(status, 503);
        assert_eq!(message.chars().count(), 500);
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let app = Router::new().route(
            "/IGameServersService/GetServerList/v1/",
            get(|| async { "not json" }),
        );
        let base = spawn_upstream(app).await;

        let err = client_for(&base).fetch().await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[tokio::test]
    async fn unreachable_is_transport_error() {
        // Bind then drop to get a port nobody is listening on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}")).fetch().await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }
}
