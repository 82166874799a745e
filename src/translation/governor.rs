/*!
 * Fixed-interval self-throttling between backend calls.
 */

use log::debug;
use std::time::Duration;

/// Waits a fixed delay between consecutive backend calls
///
/// This is not a token bucket: the delay is measured from the end of one call
/// to the start of the next, regardless of how long the call took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateGovernor {
    delay: Duration,
}

impl RateGovernor {
    /// Create a governor with the given delay
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// A governor that never waits
    pub fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Suspend the job for the configured delay
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        debug!("Rate governor waiting {:?}", self.delay);
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for RateGovernor {
    fn default() -> Self {
        Self::none()
    }
}
