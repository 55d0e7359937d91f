use reqwest::header::HeaderMap;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Config {
    endpoint: String,
    default_timeout: Duration,
}

impl Config {
    pub fn new() -> Self {
        Self {
            endpoint: Presets::new().endpoint.to_owned(),
            default_timeout: Duration::from_secs(30),
        }
    }

    /// Switch to the sandbox gateway.
    pub fn mockup(&mut self) {
        self.endpoint = Presets::mock().endpoint.to_owned();
    }

    pub fn set_endpoint(&mut self, endpoint: &str) {
        self.endpoint = endpoint.trim_end_matches('/').to_owned();
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }
}

#[derive(Clone, Debug)]
struct Presets {
    endpoint: &'static str,
}

impl Presets {
    fn new() -> Self {
        Self {
            endpoint: "https://api.efashe.com/rw/v2",
        }
    }

    fn mock() -> Self {
        Self {
            endpoint: "https://sb-api.efashe.com/rw/v2",
        }
    }
}

/// Per-call overrides. Unset fields fall back to the client's stored
/// defaults, then to the built-in ones; the merge happens once per call and
/// the resolved value is what the request path actually consumes.
#[derive(Clone, Debug, Default)]
pub struct CallOptions {
    /// Renew the session before a protected call when the cached access
    /// token has lapsed. Opting out trusts whatever token is currently
    /// cached, for this one call only.
    pub auto_renew: Option<bool>,
    pub timeout: Option<Duration>,
    pub headers: Option<HeaderMap>,
}

#[derive(Clone, Debug)]
pub(crate) struct ResolvedCall {
    pub auto_renew: bool,
    pub timeout: Duration,
    pub headers: HeaderMap,
}

impl CallOptions {
    pub(crate) fn resolve(&self, defaults: &CallOptions, config: &Config) -> ResolvedCall {
        ResolvedCall {
            auto_renew: self.auto_renew.or(defaults.auto_renew).unwrap_or(true),
            timeout: self
                .timeout
                .or(defaults.timeout)
                .unwrap_or_else(|| config.default_timeout()),
            headers: self
                .headers
                .clone()
                .or_else(|| defaults.headers.clone())
                .unwrap_or_default(),
        }
    }
}
