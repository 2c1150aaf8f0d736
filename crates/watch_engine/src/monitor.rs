use std::sync::Arc;
use std::time::Duration;

use watch_core::{update, AvailableTier, Effect, MonitorState, Msg};
use watch_logging::{watch_debug, watch_info, watch_warn};

use crate::{deliver, Extractor, Fetcher, Notifier, PollError};

/// Applies `msg` to `state` and delivers every resulting notification.
///
/// Returns the next state and the scheduled delay, if the message produced one.
pub async fn announce(
    notifier: &dyn Notifier,
    state: MonitorState,
    msg: Msg,
) -> (MonitorState, Option<Duration>) {
    let (state, effects) = update(state, msg);
    let mut next_delay = None;
    for effect in effects {
        match effect {
            Effect::Notify(notification) => {
                deliver(notifier, &notification).await;
            }
            Effect::ScheduleNext(delay) => next_delay = Some(delay),
        }
    }
    (state, next_delay)
}

/// Watches one campaign page. `poll` is the only method that moves state forward.
pub struct Monitor {
    state: MonitorState,
    fetcher: Box<dyn Fetcher>,
    extractor: Box<dyn Extractor>,
    notifier: Arc<dyn Notifier>,
}

impl Monitor {
    pub fn new(
        state: MonitorState,
        fetcher: Box<dyn Fetcher>,
        extractor: Box<dyn Extractor>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            state,
            fetcher,
            extractor,
            notifier,
        }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Runs one fetch/extract/compare cycle and returns how long to wait before the next.
    pub async fn poll(&mut self) -> Duration {
        let msg = match self.check().await {
            Ok(tiers) => {
                watch_debug!("page lists {} available tier(s)", tiers.len());
                Msg::PollSucceeded(tiers)
            }
            Err(err) => {
                watch_warn!(
                    "Poll failed ({} in a row before this one): {}",
                    self.state.failure_streak(),
                    err
                );
                Msg::PollFailed {
                    reason: err.to_string(),
                }
            }
        };

        let fallback = self.state.policy().idle_interval;
        let delay = self.apply(msg).await.unwrap_or(fallback);
        watch_info!(
            "cycle {}: available={:?} failures={} next poll in {}s",
            self.state.cycles(),
            self.state.previous_availability(),
            self.state.failure_streak(),
            delay.as_secs()
        );
        delay
    }

    /// Sends the start-up notification.
    pub async fn announce_start(&mut self) {
        self.apply(Msg::Started).await;
    }

    /// Sends the stop notification.
    pub async fn announce_stop(&mut self) {
        self.apply(Msg::StopRequested).await;
    }

    async fn check(&self) -> Result<Vec<AvailableTier>, PollError> {
        let page = self
            .fetcher
            .fetch(self.state.targets().campaign_url())
            .await?;
        Ok(self.extractor.extract(&page.html)?)
    }

    async fn apply(&mut self, msg: Msg) -> Option<Duration> {
        let (state, delay) = announce(self.notifier.as_ref(), self.state.clone(), msg).await;
        self.state = state;
        delay
    }
}
