use std::time::Duration;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("backoff table needs at least one entry")]
    EmptyBackoff,
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

/// Delays indexed by the consecutive-failure count, capped at the last entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffTable {
    delays: Vec<Duration>,
}

impl BackoffTable {
    pub fn new(delays: Vec<Duration>) -> Result<Self, PolicyError> {
        if delays.is_empty() {
            return Err(PolicyError::EmptyBackoff);
        }
        if delays.iter().any(Duration::is_zero) {
            return Err(PolicyError::ZeroInterval("failure backoff entry"));
        }
        Ok(Self { delays })
    }

    pub fn from_secs(secs: &[u64]) -> Result<Self, PolicyError> {
        Self::new(secs.iter().copied().map(Duration::from_secs).collect())
    }

    pub fn delay_for(&self, failure_streak: u32) -> Duration {
        let last = self.delays.len() - 1;
        let index = usize::try_from(failure_streak).map_or(last, |streak| streak.min(last));
        self.delays[index]
    }
}

impl Default for BackoffTable {
    fn default() -> Self {
        Self {
            delays: [60, 120, 300, 600, 1200, 1800]
                .into_iter()
                .map(Duration::from_secs)
                .collect(),
        }
    }
}

/// How long to wait before the next poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollPolicy {
    /// Used while at least one target tier is available.
    pub available_interval: Duration,
    /// Used while nothing is available.
    pub idle_interval: Duration,
    pub failure_backoff: BackoffTable,
}

impl PollPolicy {
    pub fn new(
        available_interval: Duration,
        idle_interval: Duration,
        failure_backoff: BackoffTable,
    ) -> Result<Self, PolicyError> {
        if available_interval.is_zero() {
            return Err(PolicyError::ZeroInterval("available interval"));
        }
        if idle_interval.is_zero() {
            return Err(PolicyError::ZeroInterval("idle interval"));
        }
        Ok(Self {
            available_interval,
            idle_interval,
            failure_backoff,
        })
    }

    pub fn success_delay(&self, anything_available: bool) -> Duration {
        if anything_available {
            self.available_interval
        } else {
            self.idle_interval
        }
    }

    pub fn failure_delay(&self, failure_streak: u32) -> Duration {
        self.failure_backoff.delay_for(failure_streak)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            available_interval: Duration::from_secs(60),
            idle_interval: Duration::from_secs(5 * 60),
            failure_backoff: BackoffTable::default(),
        }
    }
}
