//! Process configuration, read once at startup from a RON file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use watch_core::{BackoffTable, PolicyError, PollPolicy, TargetError, Targets};
use watch_engine::{FetchSettings, PageSelectors, ProxyError, ProxySettings};

pub const DEFAULT_CONFIG_PATH: &str = "pledge_watch.ron";
pub const CONFIG_PATH_ENV: &str = "PLEDGE_WATCH_CONFIG";
pub const WEBHOOK_ENV: &str = "SLACK_WEBHOOK_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config syntax error: {0}")]
    Syntax(#[from] ron::error::SpannedError),
    #[error(transparent)]
    Targets(#[from] TargetError),
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error(transparent)]
    Proxy(#[from] ProxyError),
    #[error("webhook url is empty")]
    EmptyWebhook,
    #[error("fetch.{0} must be greater than zero")]
    ZeroFetchLimit(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    pub campaign_url: String,
    pub target_tiers: Vec<String>,
    #[serde(default)]
    pub webhook_url: Option<String>,
    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PollConfig {
    pub available_interval_secs: u64,
    pub idle_interval_secs: u64,
    pub failure_backoff_secs: Vec<u64>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            available_interval_secs: 60,
            idle_interval_secs: 300,
            failure_backoff_secs: vec![60, 120, 300, 600, 1200, 1800],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    pub container_selector: String,
    pub tier_selector: String,
    pub id_attribute: String,
    pub name_selector: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        let selectors = PageSelectors::default();
        Self {
            container_selector: selectors.container,
            tier_selector: selectors.tier,
            id_attribute: selectors.id_attribute,
            name_selector: selectors.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FetchConfig {
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let settings = FetchSettings::default();
        Self {
            connect_timeout_secs: settings.connect_timeout.as_secs(),
            request_timeout_secs: settings.request_timeout.as_secs(),
            max_bytes: settings.max_bytes,
            user_agent: settings.user_agent,
        }
    }
}

/// CLI argument first, then the environment, then the working directory default.
pub fn resolve_path(cli_arg: Option<String>, env_value: Option<String>) -> PathBuf {
    let given = |value: Option<String>| value.filter(|value| !value.trim().is_empty());
    given(cli_arg)
        .or_else(|| given(env_value))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

impl WatchConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses and validates everything that can be checked without IO.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: WatchConfig = ron::from_str(content)?;
        config.targets()?;
        config.poll_policy()?;
        config.fetch_settings()?;
        if config
            .webhook_url
            .as_deref()
            .is_some_and(|url| url.trim().is_empty())
        {
            return Err(ConfigError::EmptyWebhook);
        }
        Ok(config)
    }

    /// A non-empty `SLACK_WEBHOOK_URL` replaces the configured webhook.
    pub fn with_webhook_override(mut self, env_value: Option<String>) -> Self {
        if let Some(url) = env_value.filter(|url| !url.trim().is_empty()) {
            self.webhook_url = Some(url.trim().to_string());
        }
        self
    }

    pub fn targets(&self) -> Result<Targets, TargetError> {
        Targets::new(&self.campaign_url, &self.target_tiers)
    }

    pub fn poll_policy(&self) -> Result<PollPolicy, PolicyError> {
        PollPolicy::new(
            Duration::from_secs(self.poll.available_interval_secs),
            Duration::from_secs(self.poll.idle_interval_secs),
            BackoffTable::from_secs(&self.poll.failure_backoff_secs)?,
        )
    }

    pub fn fetch_settings(&self) -> Result<FetchSettings, ConfigError> {
        let limits = [
            ("connect_timeout_secs", self.fetch.connect_timeout_secs),
            ("request_timeout_secs", self.fetch.request_timeout_secs),
            ("max_bytes", self.fetch.max_bytes),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::ZeroFetchLimit(*name));
        }

        let proxy = self.proxy.as_ref().map(|proxy| ProxySettings {
            host: proxy.host.clone(),
            port: proxy.port,
            username: proxy.username.clone(),
            password: proxy.password.clone(),
        });
        if let Some(proxy) = proxy.as_ref() {
            proxy.proxy_url()?;
        }

        Ok(FetchSettings {
            connect_timeout: Duration::from_secs(self.fetch.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.fetch.request_timeout_secs),
            max_bytes: self.fetch.max_bytes,
            user_agent: self.fetch.user_agent.clone(),
            proxy,
            ..FetchSettings::default()
        })
    }

    pub fn page_selectors(&self) -> PageSelectors {
        PageSelectors {
            container: self.page.container_selector.clone(),
            tier: self.page.tier_selector.clone(),
            id_attribute: self.page.id_attribute.clone(),
            name: self.page.name_selector.clone(),
        }
    }
}
