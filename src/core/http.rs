use crate::config::Config;
use crate::error::VdsClientError as Error;
use log::debug;
use reqwest::{header::HeaderMap, Client, Method, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;

/// Thin transport over reqwest. Issues a single request and hands back the
/// raw status plus the decoded JSON body; classifying non-2xx statuses is
/// the endpoint layer's concern, and renewal decisions belong to the
/// session controller. No retries happen here, so a failed exchange
/// surfaces to the caller immediately.
pub struct HttpTransport {
    client: Client,
    config: Config,
}

impl HttpTransport {
    pub(crate) fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Value>,
        bearer: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<(StatusCode, Value), Error> {
        let url = Url::parse(&format!(
            "{}/{}",
            self.config.endpoint().trim_end_matches('/'),
            path.trim_start_matches('/')
        ))?;

        let mut request = self
            .client
            .request(method, url.clone())
            .timeout(timeout.unwrap_or_else(|| self.config.default_timeout()))
            .headers(headers);
        if let Some(content) = body {
            request = request.json(&content);
        }
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        debug!("sending request to {}", url);
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let decoded = if text.is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text)?
        };
        Ok((status, decoded))
    }
}
