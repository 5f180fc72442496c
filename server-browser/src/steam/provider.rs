//! The seam between the cache and whatever supplies server records.

use std::future::Future;

use super::error::ProviderError;
use super::types::ServerRecord;

/// Source of the current server list.
///
/// Implementations perform one fetch per call and never retry; retrying is
/// the caller's business. Records come back in upstream order.
pub trait ServerProvider: Send + Sync {
    fn fetch(&self) -> impl Future<Output = Result<Vec<ServerRecord>, ProviderError>> + Send;
}
