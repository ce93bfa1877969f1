use async_trait::async_trait;
use nextup_models::ShowRecord;

use crate::error::ProviderError;

/// Fetch capability the watchlist store depends on. `TmdbClient` is the one
/// production implementation; tests substitute scripted providers.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Free-text show search. A provider response with zero matches is
    /// `Ok(vec![])`, not an error.
    async fn search(&self, query: &str) -> Result<Vec<ShowRecord>, ProviderError>;

    /// Full detail for a single show. On success the returned record always
    /// carries `Some(detail)`.
    async fn fetch_detail(&self, id: &str) -> Result<ShowRecord, ProviderError>;
}
