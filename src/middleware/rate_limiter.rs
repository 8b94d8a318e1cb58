use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

/// Token-bucket pacer for outbound API requests.
///
/// Tokens refill continuously at `rate` per second up to `burst`; `acquire`
/// waits until a token is available, so once the initial burst is spent
/// callers are spaced at the configured rate. Time comes from `tokio::time`,
/// so tests can run under paused time.
#[derive(Clone)]
pub struct TokenBucket {
    state: Arc<Mutex<BucketState>>,
    rate: f64,
    burst: f64,
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    /// `rate` is requests per second and must be positive.
    pub fn new(rate: f64, burst: usize) -> Self {
        let burst = burst.max(1) as f64;
        Self {
            state: Arc::new(Mutex::new(BucketState {
                tokens: burst,
                last_refill: Instant::now(),
            })),
            rate,
            burst,
        }
    }

    /// Wait until a token is available and consume it.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut state = self.state.lock().await;
                let now = Instant::now();
                let elapsed = now.duration_since(state.last_refill).as_secs_f64();
                state.tokens = (state.tokens + elapsed * self.rate).min(self.burst);
                state.last_refill = now;

                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    return;
                }
                Duration::from_secs_f64((1.0 - state.tokens) / self.rate)
            };

            debug!("Rate limiter exhausted, waiting {:?}", wait);
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn burst_is_not_throttled() {
        let bucket = TokenBucket::new(1.0, 3);
        let started = Instant::now();

        bucket.acquire().await;
        bucket.acquire().await;
        bucket.acquire().await;

        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn acquisitions_are_paced_at_the_configured_rate() {
        let bucket = TokenBucket::new(1.0, 1);
        let started = Instant::now();

        // First token is the burst, the next two each wait ~1s.
        bucket.acquire().await;
        bucket.acquire().await;
        bucket.acquire().await;

        let elapsed = started.elapsed().as_secs_f64();
        assert!(elapsed >= 1.9, "expected >= 1.9s of pacing, got {}", elapsed);
        assert!(elapsed <= 2.5, "expected <= 2.5s of pacing, got {}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn higher_rate_waits_less() {
        let bucket = TokenBucket::new(10.0, 1);
        let started = Instant::now();

        bucket.acquire().await;
        bucket.acquire().await;

        let elapsed = started.elapsed().as_secs_f64();
        assert!(elapsed <= 0.2, "expected ~0.1s of pacing, got {}", elapsed);
    }
}
