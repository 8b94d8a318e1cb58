use std::sync::Arc;

use anyhow::Result;
use chrono::DateTime;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use wallet_perf::api::CoinCapClient;
use wallet_perf::errors::WalletError;
use wallet_perf::middleware::TokenBucket;
use wallet_perf::portfolio::{summarize, FetchWindow, PerformanceAggregator};
use wallet_perf::utils::{format_summary, Config};
use wallet_perf::wallet::read_holdings;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let holdings = read_holdings(&config.holdings_file)?;
    if holdings.is_empty() {
        return Err(WalletError::EmptyPortfolio.into());
    }

    info!(
        "Pricing {} holdings against window {} .. {} (interval {})",
        holdings.len(),
        format_ms(config.window_start_ms),
        format_ms(config.window_end_ms),
        config.interval
    );

    let client = CoinCapClient::new(&config.api_base_url)?;
    let limiter = TokenBucket::new(config.requests_per_second, 1);
    let aggregator = PerformanceAggregator::new(
        Arc::new(client),
        limiter,
        config.max_concurrent_requests,
        FetchWindow {
            interval: config.interval.clone(),
            start_ms: config.window_start_ms,
            end_ms: config.window_end_ms,
        },
    );

    let priced = aggregator.price_holdings(holdings).await;
    let summary = summarize(&priced);
    if summary.unresolved > 0 {
        warn!(
            "{} of {} holdings could not be priced and contribute zero",
            summary.unresolved,
            priced.len()
        );
    }

    // Diagnostics go to stderr via tracing; stdout carries only the report.
    match format_summary(&summary) {
        Some(line) => println!("{}", line),
        None => return Err(WalletError::EmptyPortfolio.into()),
    }

    Ok(())
}

fn format_ms(epoch_ms: i64) -> String {
    DateTime::from_timestamp_millis(epoch_ms)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| epoch_ms.to_string())
}
