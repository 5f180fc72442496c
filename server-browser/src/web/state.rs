//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::ServerCache;

/// Shared application state.
///
/// Handlers only ever see the cache, never the provider or the network.
pub struct AppState<P> {
    /// Server list cache
    pub cache: Arc<ServerCache<P>>,
}

impl<P> AppState<P> {
    /// Create a new app state.
    pub fn new(cache: ServerCache<P>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}
