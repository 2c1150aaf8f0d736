//! Watch engine: page fetching, tier extraction, notification delivery and the poll loop.
mod extract;
mod fetch;
mod monitor;
mod notify;
mod proxy;
mod schedule;
mod types;

pub use extract::{Extractor, PageSelectors, PledgeExtractor};
pub use fetch::{decode_body, FetchSettings, Fetcher, ReqwestFetcher};
pub use monitor::{announce, Monitor};
pub use notify::{deliver, LogNotifier, Notifier, WebhookNotifier};
pub use proxy::{build_proxy, ProxyError, ProxySettings};
pub use schedule::run;
pub use types::{FailureKind, FetchError, FetchedPage, NotifyError, ParseError, PollError};
