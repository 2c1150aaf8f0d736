use std::time::Duration;

use crate::Notification;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notification),
    ScheduleNext(Duration),
}
