//! Mock provider for running without Steam API access.
//!
//! Serves a recorded `GetServerList` response from a JSON file as if it were
//! live. The file is read again on every fetch, so edits show up the next
//! time the cache refreshes.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::ProviderError;
use super::provider::ServerProvider;
use super::types::{GetServerListResponse, ServerRecord};

/// Provider backed by a recorded response file.
#[derive(Debug, Clone)]
pub struct MockProvider {
    path: PathBuf,
}

impl MockProvider {
    /// Serve the recorded API response at `path`.
    ///
    /// The file is loaded once up front so a bad path fails at startup.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
        GetServerListResponse::parse(&json)?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// The file being served.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ServerProvider for MockProvider {
    async fn fetch(&self) -> Result<Vec<ServerRecord>, ProviderError> {
        debug!(path = %self.path.display(), "reading recorded server list");
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| read_error(&self.path, e))?;
        GetServerListResponse::parse(&json)
    }
}

fn read_error(path: &Path, e: std::io::Error) -> ProviderError {
    ProviderError::MockData {
        message: format!("failed to read {}: {}", path.display(), e),
    }
}
