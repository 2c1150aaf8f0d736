use url::Url;

/// A tier the page currently offers for purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableTier {
    pub id: String,
    pub name: String,
}

impl AvailableTier {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid campaign url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("campaign url must use http or https, got {0}")]
    UnsupportedScheme(String),
    #[error("at least one target tier id is required")]
    NoTargets,
}

/// The campaign page and the tier ids the operator is waiting for.
///
/// Ids keep their configured order; blanks and repeats are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Targets {
    campaign_url: Url,
    tier_ids: Vec<String>,
}

impl Targets {
    pub fn new<I, S>(campaign_url: &str, tier_ids: I) -> Result<Self, TargetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trimmed = campaign_url.trim();
        let url = Url::parse(trimmed).map_err(|err| TargetError::InvalidUrl {
            url: trimmed.to_string(),
            message: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(TargetError::UnsupportedScheme(url.scheme().to_string()));
        }

        let mut ids: Vec<String> = Vec::new();
        for id in tier_ids {
            let id = id.as_ref().trim();
            if id.is_empty() || ids.iter().any(|existing| existing == id) {
                continue;
            }
            ids.push(id.to_string());
        }
        if ids.is_empty() {
            return Err(TargetError::NoTargets);
        }

        Ok(Self {
            campaign_url: url,
            tier_ids: ids,
        })
    }

    pub fn campaign_url(&self) -> &str {
        self.campaign_url.as_str()
    }

    pub fn tier_ids(&self) -> &[String] {
        &self.tier_ids
    }

    /// Position of `id` in the configured order.
    pub(crate) fn rank(&self, id: &str) -> Option<usize> {
        self.tier_ids.iter().position(|target| target == id)
    }
}
