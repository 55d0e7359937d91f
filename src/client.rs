use crate::api::authentication::{AuthResponse, RefreshResponse};
use crate::api::gateway::{self, StatusResponse};
use crate::config::{CallOptions, Config, ResolvedCall};
use crate::core::http::HttpTransport;
use crate::error::VdsClientError as Error;
use crate::session::SessionController;

/// Client for the vending gateway. Owns the HTTP transport, the session
/// controller and the stored per-call defaults; every protected endpoint
/// goes through the controller before its request is sent.
pub struct VdsClient {
    transport: HttpTransport,
    session: SessionController,
    defaults: CallOptions,
}

impl VdsClient {
    pub fn new(api_key: &str, api_secret: &str) -> Result<Self, Error> {
        if api_key.trim().is_empty() {
            return Err(Error::ValidationError("api key not provided".into()));
        }
        if api_secret.trim().is_empty() {
            return Err(Error::ValidationError("api secret not provided".into()));
        }

        Ok(Self {
            transport: HttpTransport::new(Config::new()),
            session: SessionController::new(api_key.to_owned(), api_secret.to_owned()),
            defaults: CallOptions::default(),
        })
    }

    /// Switch to the sandbox gateway.
    pub fn mock(mut self) -> Self {
        self.transport.config_mut().mockup();
        self
    }

    /// Point the client at a custom gateway URL.
    pub fn endpoint(mut self, endpoint: &str) -> Self {
        self.transport.config_mut().set_endpoint(endpoint);
        self
    }

    /// Replace the stored per-call defaults.
    pub fn defaults(mut self, defaults: CallOptions) -> Self {
        self.defaults = defaults;
        self
    }

    /// Resume a previously exported session instead of starting empty. The
    /// expiries are re-derived from the tokens themselves.
    pub fn restore_session(mut self, access_token: &str, refresh_token: &str) -> Result<Self, Error> {
        self.session.restore(access_token, refresh_token)?;
        Ok(self)
    }

    /// Make sure a non-expired access token is cached, renewing or
    /// re-authenticating if needed. Safe to call repeatedly; when the
    /// session is already live this is a single time comparison.
    pub async fn ensure_session(&mut self) -> Result<(), Error> {
        self.session.ensure_valid(&self.transport).await
    }

    /// Force a fresh login regardless of the cached session.
    pub async fn authenticate(&mut self) -> Result<AuthResponse, Error> {
        self.session.authenticate(&self.transport).await
    }

    /// Force a refresh-token renewal of the access token.
    pub async fn refresh_session(&mut self) -> Result<RefreshResponse, Error> {
        self.session.refresh(&self.transport).await
    }

    /// Current access token, for embedding into an Authorization header.
    pub fn access_token(&self) -> &str {
        self.session.access_token()
    }

    /// Current refresh token, for callers persisting the session.
    pub fn refresh_token(&self) -> &str {
        self.session.refresh_token()
    }

    /// Gateway health. Does not require a session.
    pub async fn status(&self, options: &CallOptions) -> Result<StatusResponse, Error> {
        let call = self.resolve(options);
        gateway::status(&self.transport, &call).await
    }

    /// Ask the gateway whether the cached access token is still accepted.
    /// A rejected token reads as `Ok(false)`, not as an error.
    pub async fn validate_session(&mut self, options: &CallOptions) -> Result<bool, Error> {
        let call = self.resolve(options);
        if call.auto_renew {
            self.session.ensure_valid(&self.transport).await?;
        }
        gateway::validate_session(&self.transport, self.session.access_token(), &call).await
    }

    fn resolve(&self, options: &CallOptions) -> ResolvedCall {
        options.resolve(&self.defaults, self.transport.config())
    }
}
