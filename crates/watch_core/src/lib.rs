//! Watch core: pure availability state machine, no IO.
mod availability;
mod effect;
mod msg;
mod notification;
mod policy;
mod state;
mod targets;
mod update;

pub use availability::{sets_equal, target_names};
pub use effect::Effect;
pub use msg::Msg;
pub use notification::Notification;
pub use policy::{BackoffTable, PolicyError, PollPolicy};
pub use state::MonitorState;
pub use targets::{AvailableTier, TargetError, Targets};
pub use update::update;
