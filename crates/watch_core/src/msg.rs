use crate::AvailableTier;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The watcher is about to run its first cycle.
    Started,
    /// Fetch and extraction worked; carries every tier the page offers.
    PollSucceeded(Vec<AvailableTier>),
    /// Fetch or extraction failed this cycle.
    PollFailed { reason: String },
    /// Operator asked the process to stop.
    StopRequested,
    /// Something escaped the poll loop and the process is going down.
    Fatal { reason: String },
}
