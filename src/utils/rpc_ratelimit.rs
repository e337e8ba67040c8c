/// Wallet JSON-RPC rate limiter - 20 requests per second globally
use lazy_static::lazy_static;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

lazy_static! {
    static ref RPC_RATE_LIMITER: Mutex<RpcRateLimiter> = Mutex::new(RpcRateLimiter::new(20));
}

pub struct RpcRateLimiter {
    /// Timestamps of requests sent inside the current window
    request_times: VecDeque<Instant>,
    max_requests: usize,
    window: Duration,
}

impl RpcRateLimiter {
    fn new(max_requests: usize) -> Self {
        Self {
            request_times: VecDeque::new(),
            max_requests,
            window: Duration::from_secs(1),
        }
    }

    /// Returns how long the caller must wait; zero means the request was recorded
    fn check_and_record(&mut self, now: Instant) -> Duration {
        while let Some(&front) = self.request_times.front() {
            if now.duration_since(front) > self.window {
                self.request_times.pop_front();
            } else {
                break;
            }
        }

        if self.request_times.len() >= self.max_requests {
            if let Some(&oldest) = self.request_times.front() {
                let elapsed = now.duration_since(oldest);
                if elapsed < self.window {
                    return self.window - elapsed;
                }
            }
        }

        self.request_times.push_back(now);
        Duration::ZERO
    }
}

/// Wait until the next wallet RPC call fits in the 20 requests/second budget
pub async fn rate_limit_rpc() {
    loop {
        let wait_duration = {
            let mut limiter = match RPC_RATE_LIMITER.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            limiter.check_and_record(Instant::now())
        };

        if wait_duration.is_zero() {
            return;
        }

        tracing::debug!("RPC rate limit: waiting {}ms", wait_duration.as_millis());
        tokio::time::sleep(wait_duration).await;
    }
}
