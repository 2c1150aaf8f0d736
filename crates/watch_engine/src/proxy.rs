use reqwest::Proxy;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProxyError {
    #[error("proxy host is empty")]
    EmptyHost,
    #[error("unsupported proxy scheme {0}, expected http or https")]
    UnsupportedScheme(String),
    #[error("invalid proxy url {url}: {message}")]
    InvalidUrl { url: String, message: String },
}

/// Proxy used for page fetches only; notifications go direct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    /// Host name, optionally with an `http://` or `https://` prefix.
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxySettings {
    pub fn proxy_url(&self) -> Result<String, ProxyError> {
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(ProxyError::EmptyHost);
        }
        let (scheme, bare_host) = match host.split_once("://") {
            Some((scheme, rest)) => (scheme.to_ascii_lowercase(), rest),
            None => ("http".to_string(), host),
        };
        if scheme != "http" && scheme != "https" {
            return Err(ProxyError::UnsupportedScheme(scheme));
        }
        if bare_host.is_empty() {
            return Err(ProxyError::EmptyHost);
        }
        Ok(format!("{scheme}://{bare_host}:{}", self.port))
    }
}

/// Build a reqwest Proxy routing every request, with basic auth when a username is set.
pub fn build_proxy(settings: &ProxySettings) -> Result<Proxy, ProxyError> {
    let url = settings.proxy_url()?;
    let mut proxy = Proxy::all(&url).map_err(|e| ProxyError::InvalidUrl {
        url: url.clone(),
        message: e.to_string(),
    })?;

    if let Some(username) = settings.username.as_deref() {
        let password = settings.password.as_deref().unwrap_or_default();
        proxy = proxy.basic_auth(username, password);
    }

    Ok(proxy)
}

#[cfg(test)]
mod tests {
    use super::{build_proxy, ProxyError, ProxySettings};

    fn settings(host: &str) -> ProxySettings {
        ProxySettings {
            host: host.to_string(),
            port: 8080,
            username: Some("user".to_string()),
            password: Some("secret".to_string()),
        }
    }

    #[test]
    fn bare_host_defaults_to_http() {
        assert_eq!(
            settings("proxy.example.com").proxy_url().unwrap(),
            "http://proxy.example.com:8080"
        );
        assert_eq!(
            settings("https://proxy.example.com/").proxy_url().unwrap(),
            "https://proxy.example.com:8080"
        );
    }

    #[test]
    fn unsupported_scheme_and_empty_host_fail() {
        assert_eq!(
            settings("socks5://proxy.example.com").proxy_url(),
            Err(ProxyError::UnsupportedScheme("socks5".to_string()))
        );
        assert_eq!(settings("  ").proxy_url(), Err(ProxyError::EmptyHost));
    }

    #[test]
    fn proxy_builds_with_credentials() {
        assert!(build_proxy(&settings("proxy.example.com")).is_ok());
    }
}
