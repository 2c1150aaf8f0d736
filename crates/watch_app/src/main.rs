mod config;
mod shutdown;

use std::any::Any;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use log::LevelFilter;
use tokio_util::sync::CancellationToken;
use watch_core::{MonitorState, Msg};
use watch_engine::{
    announce, run, LogNotifier, Monitor, Notifier, PledgeExtractor, ReqwestFetcher,
    WebhookNotifier,
};
use watch_logging::{watch_error, watch_info, LogDestination};

use crate::config::{WatchConfig, CONFIG_PATH_ENV, WEBHOOK_ENV};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(15);

#[tokio::main]
async fn main() -> ExitCode {
    let path = config::resolve_path(
        std::env::args().nth(1),
        std::env::var(CONFIG_PATH_ENV).ok(),
    );
    let config = match WatchConfig::load(&path) {
        Ok(config) => config.with_webhook_override(std::env::var(WEBHOOK_ENV).ok()),
        Err(err) => {
            watch_logging::initialize(LogDestination::Terminal, LevelFilter::Info);
            watch_error!("Failed to load config from {:?}: {}", path, err);
            return ExitCode::FAILURE;
        }
    };

    let destination = match config.log_file.clone() {
        Some(file) => LogDestination::TerminalAndFile(file),
        None => LogDestination::Terminal,
    };
    watch_logging::initialize(destination, LevelFilter::Info);
    watch_info!("Loaded config from {:?}", path);

    match watch(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            watch_error!("Pledge watch failed: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn watch(config: WatchConfig) -> anyhow::Result<()> {
    let token = CancellationToken::new();
    let signals = shutdown::listen(token.clone());
    let result = start_and_poll(config, token).await;
    signals.abort();
    result
}

async fn start_and_poll(config: WatchConfig, token: CancellationToken) -> anyhow::Result<()> {
    let state = MonitorState::new(config.targets()?, config.poll_policy()?);

    let notifier: Arc<dyn Notifier> = match config.webhook_url.as_deref() {
        Some(url) => Arc::new(
            WebhookNotifier::new(url, NOTIFY_TIMEOUT).context("building webhook client")?,
        ),
        None => {
            watch_info!("No webhook configured; notifications are only logged");
            Arc::new(LogNotifier)
        }
    };

    let monitor = match build_monitor(&config, state.clone(), notifier.clone()) {
        Ok(monitor) => monitor,
        Err(err) => {
            report_fatal(notifier.as_ref(), state, format!("{err:#}")).await;
            return Err(err);
        }
    };

    poll_until_stopped(monitor, notifier, state, token).await
}

fn build_monitor(
    config: &WatchConfig,
    state: MonitorState,
    notifier: Arc<dyn Notifier>,
) -> anyhow::Result<Monitor> {
    let fetcher = ReqwestFetcher::new(config.fetch_settings()?).context("building page client")?;
    let extractor = PledgeExtractor::new(config.page_selectors())?;
    Ok(Monitor::new(
        state,
        Box::new(fetcher),
        Box::new(extractor),
        notifier,
    ))
}

/// Announces start, polls until `token` is cancelled, then announces stop.
///
/// A token cancelled before or during the start announcement skips polling
/// and still ends with the stop announcement.
async fn poll_until_stopped(
    mut monitor: Monitor,
    notifier: Arc<dyn Notifier>,
    initial: MonitorState,
    token: CancellationToken,
) -> anyhow::Result<()> {
    monitor.announce_start().await;

    let poller = tokio::spawn(async move {
        let cycles = run(&mut monitor, &token).await;
        (monitor, cycles)
    });

    match poller.await {
        Ok((mut monitor, cycles)) => {
            watch_info!("Poll loop stopped after {} cycle(s)", cycles);
            monitor.announce_stop().await;
            Ok(())
        }
        Err(join_err) => {
            let reason = if join_err.is_panic() {
                format!("poll task panicked: {}", panic_message(join_err.into_panic()))
            } else {
                format!("poll task ended unexpectedly: {join_err}")
            };
            report_fatal(notifier.as_ref(), initial, reason.clone()).await;
            Err(anyhow!(reason))
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

async fn report_fatal(notifier: &dyn Notifier, state: MonitorState, reason: String) {
    watch_error!("Fatal: {}", reason);
    announce(notifier, state, Msg::Fatal { reason }).await;
}
