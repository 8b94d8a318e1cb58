use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::api::PriceSource;
use crate::errors::Result;
use crate::middleware::TokenBucket;
use crate::wallet::{Holding, PortfolioSummary, PriceStatus, PricedHolding};

/// Query window for the history endpoint. Performance is measured against a
/// fixed historical reference point, not the live price.
#[derive(Debug, Clone)]
pub struct FetchWindow {
    pub interval: String,
    pub start_ms: i64,
    pub end_ms: i64,
}

/// Drives identifier resolution and price fetches across all holdings with
/// bounded concurrency and paced submissions, then reduces the results.
pub struct PerformanceAggregator<S: PriceSource + 'static> {
    source: Arc<S>,
    limiter: TokenBucket,
    max_concurrent: usize,
    window: FetchWindow,
}

impl<S: PriceSource + 'static> PerformanceAggregator<S> {
    pub fn new(
        source: Arc<S>,
        limiter: TokenBucket,
        max_concurrent: usize,
        window: FetchWindow,
    ) -> Self {
        Self {
            source,
            limiter,
            max_concurrent: max_concurrent.max(1),
            window,
        }
    }

    /// Price every holding. Output preserves input order; a holding whose
    /// resolution or fetch fails comes back `Unresolved` with zero price and
    /// ratio, without disturbing its siblings. All tasks are awaited before
    /// this returns, so callers never observe partial results.
    pub async fn price_holdings(&self, holdings: Vec<Holding>) -> Vec<PricedHolding> {
        let originals = holdings.clone();
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();

        for (index, holding) in holdings.into_iter().enumerate() {
            let source = Arc::clone(&self.source);
            let limiter = self.limiter.clone();
            let semaphore = Arc::clone(&semaphore);
            let window = self.window.clone();

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => return (index, PricedHolding::unresolved(holding)),
                };
                limiter.acquire().await;

                let priced = match fetch_one(source.as_ref(), &holding, &window).await {
                    Ok(Some(price)) => PricedHolding::priced(holding, price),
                    Ok(None) => {
                        warn!("No price resolved for {}, contributes zero", holding.symbol);
                        PricedHolding::unresolved(holding)
                    }
                    Err(e) => {
                        warn!("Failed to price {}: {}", holding.symbol, e);
                        PricedHolding::unresolved(holding)
                    }
                };
                (index, priced)
            });
        }

        let mut priced: Vec<Option<PricedHolding>> = originals.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, holding)) => priced[index] = Some(holding),
                Err(e) => warn!("Pricing task aborted: {}", e),
            }
        }

        // Backfill any slot lost to an aborted task so the output always
        // matches the input one-to-one.
        priced
            .into_iter()
            .zip(originals)
            .map(|(slot, original)| slot.unwrap_or_else(|| PricedHolding::unresolved(original)))
            .collect()
    }
}

async fn fetch_one<S: PriceSource + ?Sized>(
    source: &S,
    holding: &Holding,
    window: &FetchWindow,
) -> Result<Option<f64>> {
    let asset_id = match source.resolve_asset_id(&holding.symbol).await? {
        Some(id) => id,
        None => return Ok(None),
    };
    source
        .window_price(&asset_id, &window.interval, window.start_ms, window.end_ms)
        .await
}

/// Pure reduction over completed holdings: total value plus best/worst
/// extremes by performance ratio, ties won by input order. Idempotent.
pub fn summarize(priced: &[PricedHolding]) -> PortfolioSummary {
    let total_value = priced.iter().map(|p| p.value()).sum();

    let mut best: Option<&PricedHolding> = None;
    let mut worst: Option<&PricedHolding> = None;
    for candidate in priced {
        if best.map_or(true, |b| candidate.performance_ratio > b.performance_ratio) {
            best = Some(candidate);
        }
        if worst.map_or(true, |w| candidate.performance_ratio < w.performance_ratio) {
            worst = Some(candidate);
        }
    }

    let unresolved = priced
        .iter()
        .filter(|p| p.status == PriceStatus::Unresolved)
        .count();
    if unresolved > 0 {
        info!("{} of {} holdings are unresolved", unresolved, priced.len());
    }

    PortfolioSummary {
        total_value,
        best: best.cloned(),
        worst: worst.cloned(),
        unresolved,
    }
}
