use crate::env_var;
use std::time::Duration;

const MIN_SWEEP_INTERVAL: Duration = Duration::from_millis(1);

/// Settings for [`TtlActor`](crate::domains::ttl_actors::TtlActor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweeperConfig {
    pub sweep_interval: Duration,
    pub mailbox_size: usize,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self { sweep_interval: Duration::from_millis(100), mailbox_size: 100 }
    }
}

impl SweeperConfig {
    /// Reads `TTLQ_SWEEP_INTERVAL_MS` and `TTLQ_MAILBOX_SIZE`, keeping defaults for anything
    /// missing or malformed.
    pub fn from_env() -> Self {
        let default = Self::default();
        env_var!(
            defaults: {
                sweep_interval_ms: u64 = default.sweep_interval.as_millis() as u64,
                mailbox_size: usize = default.mailbox_size,
            }
        );
        Self::default()
            .with_sweep_interval(Duration::from_millis(sweep_interval_ms))
            .with_mailbox_size(mailbox_size)
    }

    // tokio's interval rejects a zero period
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval.max(MIN_SWEEP_INTERVAL);
        self
    }

    // tokio's channel rejects a zero capacity
    pub fn with_mailbox_size(mut self, size: usize) -> Self {
        self.mailbox_size = size.max(1);
        self
    }
}
