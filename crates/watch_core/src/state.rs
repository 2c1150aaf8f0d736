use crate::{PollPolicy, Targets};

/// Everything the monitor remembers between cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorState {
    targets: Targets,
    policy: PollPolicy,
    previous: Vec<String>,
    failure_streak: u32,
    cycles: u64,
}

impl MonitorState {
    pub fn new(targets: Targets, policy: PollPolicy) -> Self {
        Self {
            targets,
            policy,
            previous: Vec::new(),
            failure_streak: 0,
            cycles: 0,
        }
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Names seen on the last successful poll, in target order.
    pub fn previous_availability(&self) -> &[String] {
        &self.previous
    }

    pub fn failure_streak(&self) -> u32 {
        self.failure_streak
    }

    /// Polls handled so far, successful or not.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub(crate) fn record_success(&mut self, current: Vec<String>) {
        self.cycles += 1;
        self.failure_streak = 0;
        self.previous = current;
    }

    pub(crate) fn record_failure(&mut self) -> u32 {
        self.cycles += 1;
        self.failure_streak = self.failure_streak.saturating_add(1);
        self.failure_streak
    }
}
