/// CoinCap v2 REST API base URL.
pub const COINCAP_API_BASE_URL: &str = "https://api.coincap.io/v2";

/// Candle interval for the history endpoint.
pub const DEFAULT_INTERVAL: &str = "d1";

/// Reference price window, epoch milliseconds. Performance is measured
/// against this fixed historical point, not the live price.
pub const DEFAULT_WINDOW_START_MS: i64 = 1_617_753_600_000;
pub const DEFAULT_WINDOW_END_MS: i64 = 1_617_753_601_000;

/// Maximum in-flight price fetches.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 3;

/// Outbound request pacing for the public API.
pub const DEFAULT_REQUESTS_PER_SECOND: f64 = 1.0;

pub const DEFAULT_HOLDINGS_FILE: &str = "crypto-wallet.csv";

pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;
