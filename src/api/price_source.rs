use async_trait::async_trait;

use crate::errors::Result;

/// Seam between the aggregator and the remote price service, so pricing can
/// be exercised against a mock without live HTTP.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Map a ticker symbol to the provider's asset identifier.
    /// `Ok(None)` means the provider knows no asset with that symbol.
    async fn resolve_asset_id(&self, symbol: &str) -> Result<Option<String>>;

    /// Most recent USD price sample inside the `[start_ms, end_ms]` window.
    /// `Ok(None)` means the provider returned no samples for the window.
    async fn window_price(
        &self,
        asset_id: &str,
        interval: &str,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Option<f64>>;
}
