use std::future::Future;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Ready,
    NotReady,
    Exhausted,
}

/// Re-checks a condition at a fixed interval, giving up after a fixed number
/// of checks.
#[derive(Debug, Clone)]
pub struct BoundedPoll {
    interval: Duration,
    max_attempts: u32,
    attempts: u32,
}

impl BoundedPoll {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

    pub fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
            attempts: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Counts one check whose result was `ready`.
    pub fn record(&mut self, ready: bool) -> PollState {
        if self.attempts >= self.max_attempts {
            return PollState::Exhausted;
        }
        self.attempts += 1;

        if ready {
            PollState::Ready
        } else if self.attempts >= self.max_attempts {
            PollState::Exhausted
        } else {
            PollState::NotReady
        }
    }

    /// Runs `check` until it reports ready or the attempts run out, sleeping
    /// between checks. Never returns `NotReady`.
    pub async fn wait_until<F, Fut>(&mut self, mut check: F) -> PollState
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        loop {
            if self.attempts >= self.max_attempts {
                return PollState::Exhausted;
            }
            let ready = check().await;
            match self.record(ready) {
                PollState::NotReady => {
                    debug!(attempt = self.attempts, "Condition not met, waiting");
                    tokio::time::sleep(self.interval).await;
                }
                state => return state,
            }
        }
    }
}

impl Default for BoundedPoll {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL, Self::DEFAULT_MAX_ATTEMPTS)
    }
}
