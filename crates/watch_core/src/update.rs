use crate::{sets_equal, target_names, Effect, MonitorState, Msg, Notification};

/// Pure update function: applies a message to state and returns any effects.
///
/// Poll messages always end with exactly one `Effect::ScheduleNext`.
pub fn update(mut state: MonitorState, msg: Msg) -> (MonitorState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::Notify(Notification::Started {
            url: state.targets().campaign_url().to_string(),
            target_count: state.targets().tier_ids().len(),
        })],
        Msg::PollSucceeded(tiers) => {
            let current = target_names(&tiers, state.targets());
            let changed = !sets_equal(Some(state.previous_availability()), Some(current.as_slice()));

            let mut effects = Vec::with_capacity(2);
            if changed {
                let notification = if current.is_empty() {
                    Notification::Unavailable
                } else {
                    Notification::Available {
                        names: current.clone(),
                        url: state.targets().campaign_url().to_string(),
                    }
                };
                effects.push(Effect::Notify(notification));
            }

            let delay = state.policy().success_delay(!current.is_empty());
            state.record_success(current);
            effects.push(Effect::ScheduleNext(delay));
            effects
        }
        Msg::PollFailed { reason } => {
            let streak = state.record_failure();
            let mut effects = Vec::with_capacity(2);
            // Only the first failure of a streak goes out; the rest are logged by the caller.
            if streak == 1 {
                effects.push(Effect::Notify(Notification::FetchFailed { streak, reason }));
            }
            effects.push(Effect::ScheduleNext(state.policy().failure_delay(streak)));
            effects
        }
        Msg::StopRequested => vec![Effect::Notify(Notification::Stopping)],
        Msg::Fatal { reason } => vec![Effect::Notify(Notification::Fatal { reason })],
    };

    (state, effects)
}
