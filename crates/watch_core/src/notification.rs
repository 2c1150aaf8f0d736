use std::fmt;

/// Everything the watcher tells the outside world about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Started { url: String, target_count: usize },
    Available { names: Vec<String>, url: String },
    Unavailable,
    FetchFailed { streak: u32, reason: String },
    Stopping,
    Fatal { reason: String },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Started { url, target_count } => {
                write!(f, "Watching {url} for {target_count} pledge tier(s).")
            }
            Notification::Available { names, url } => {
                write!(f, "Pledge available! GO GET IT! {} {url}", names.join(", "))
            }
            Notification::Unavailable => write!(f, "Whoops, too late. Try again later."),
            Notification::FetchFailed { streak, reason } => write!(
                f,
                "Could not check pledge availability ({streak} failed attempt(s)): {reason}"
            ),
            Notification::Stopping => write!(f, "Pledge watch stopping."),
            Notification::Fatal { reason } => write!(f, "Pledge watch crashed: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Notification;

    #[test]
    fn available_message_lists_names_and_link() {
        let note = Notification::Available {
            names: vec!["Tier A".to_string(), "Tier B".to_string()],
            url: "https://example.com/p".to_string(),
        };
        assert_eq!(
            note.to_string(),
            "Pledge available! GO GET IT! Tier A, Tier B https://example.com/p"
        );
    }

    #[test]
    fn failure_message_carries_streak_and_reason() {
        let note = Notification::FetchFailed {
            streak: 1,
            reason: "http status 429".to_string(),
        };
        assert_eq!(
            note.to_string(),
            "Could not check pledge availability (1 failed attempt(s)): http status 429"
        );
    }
}
