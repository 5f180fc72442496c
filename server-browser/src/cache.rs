//! Freshness-gated cache for the server list.
//!
//! Holds exactly one snapshot of the directory. A snapshot younger than the
//! TTL is served without touching the network; an older one triggers a
//! refresh. A failed refresh keeps the previous snapshot and its timestamp,
//! so the next request tries again instead of waiting out another TTL.
//!
//! Refreshes are single-flight: callers that find the snapshot stale queue
//! on a gate, and everyone queued behind an attempt gets that attempt's
//! outcome, success or failure, instead of fetching again.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::steam::{ProviderError, ServerProvider, ServerRecord};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a snapshot is served before a refresh is attempted.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
        }
    }
}

/// One generation of the server list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    servers: Vec<ServerRecord>,
    /// `None` until the first successful fetch.
    fetched_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// The snapshot served before anything has been fetched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A snapshot holding one complete provider response.
    pub fn new(servers: Vec<ServerRecord>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            servers,
            fetched_at: Some(fetched_at),
        }
    }

    pub fn servers(&self) -> &[ServerRecord] {
        &self.servers
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Time since this snapshot was fetched, if it ever was.
    pub fn age(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        self.fetched_at.map(|at| now - at)
    }

    /// Whether the snapshot may be served as-is at `now`.
    ///
    /// The expiry instant itself still counts as fresh. A never-fetched
    /// snapshot is always stale.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: TimeDelta) -> bool {
        let Some(fetched_at) = self.fetched_at else {
            return false;
        };
        match fetched_at.checked_add_signed(ttl) {
            Some(expiry) => now <= expiry,
            None => true,
        }
    }
}

/// Result of a cache read.
///
/// Always carries a snapshot to serve. `error` is set when a refresh was
/// attempted and failed, in which case `snapshot` is the previous one.
/// Callers that queued behind the same failed attempt share one error.
#[derive(Debug)]
pub struct CacheRead {
    pub snapshot: Arc<Snapshot>,
    pub error: Option<Arc<ProviderError>>,
}

impl CacheRead {
    fn ok(snapshot: Arc<Snapshot>) -> Self {
        Self {
            snapshot,
            error: None,
        }
    }

    pub fn into_parts(self) -> (Arc<Snapshot>, Option<Arc<ProviderError>>) {
        (self.snapshot, self.error)
    }
}

/// Server list cache in front of a [`ServerProvider`].
pub struct ServerCache<P> {
    provider: P,
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    current: RwLock<Arc<Snapshot>>,
    /// Held for the duration of a fetch; holds the last attempt's error.
    refresh_gate: Mutex<Option<Arc<ProviderError>>>,
    /// Number of finished refresh attempts, successful or not.
    attempts: AtomicU64,
}

impl<P: ServerProvider> ServerCache<P> {
    /// Create an empty cache reading the system clock.
    pub fn new(provider: P, config: &CacheConfig) -> Self {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    /// Create an empty cache reading the given clock.
    pub fn with_clock(provider: P, config: &CacheConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            provider,
            clock,
            ttl: TimeDelta::from_std(config.ttl).unwrap_or(TimeDelta::MAX),
            current: RwLock::new(Arc::new(Snapshot::empty())),
            refresh_gate: Mutex::new(None),
            attempts: AtomicU64::new(0),
        }
    }

    /// The stored snapshot, without any freshness check.
    pub async fn current(&self) -> Arc<Snapshot> {
        self.current.read().await.clone()
    }

    /// Current time according to the cache's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Get a snapshot to serve, refreshing it first if stale.
    ///
    /// Failures are returned, not logged; the caller decides how loudly to
    /// report them.
    pub async fn get(&self) -> CacheRead {
        let now = self.clock.now();

        let snapshot = self.current().await;
        if snapshot.is_fresh(now, self.ttl) {
            debug!(servers = snapshot.len(), "serving cached server list");
            return CacheRead::ok(snapshot);
        }

        let seen = self.attempts.load(Ordering::Acquire);
        let mut last_error = self.refresh_gate.lock().await;

        // An attempt finished while we queued: take its outcome as ours
        if self.attempts.load(Ordering::Acquire) != seen {
            debug!("sharing the outcome of a concurrent refresh");
            return CacheRead {
                snapshot: self.current().await,
                error: last_error.clone(),
            };
        }

        let outcome = match self.provider.fetch().await {
            Ok(servers) => {
                let fresh = Arc::new(Snapshot::new(servers, self.clock.now()));
                *self.current.write().await = fresh.clone();
                info!(servers = fresh.len(), "server list refreshed");
                *last_error = None;
                CacheRead::ok(fresh)
            }
            Err(e) => {
                let e = Arc::new(e);
                *last_error = Some(e.clone());
                CacheRead {
                    snapshot,
                    error: Some(e),
                }
            }
        };
        self.attempts.fetch_add(1, Ordering::Release);
        outcome
    }

    /// The provider behind this cache.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
