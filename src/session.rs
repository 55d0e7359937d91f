//! Lifecycle of the gateway's chained bearer credentials.

pub mod token;

use chrono::{DateTime, Utc};
use log::{debug, info};

use crate::api::authentication::{self, AuthResponse, RefreshResponse};
use crate::core::http::HttpTransport;
use crate::error::VdsClientError as Error;

/// One bearer credential and the instant it stops being usable. The expiry
/// always comes from the claims inside the token itself; the gateway
/// controls lifetime semantics, so the client never computes one locally.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Credential {
    value: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Credential {
    fn issued(value: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            value,
            expires_at: Some(expires_at),
        }
    }

    fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|instant| instant > now)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct SessionState {
    access: Credential,
    refresh: Credential,
}

/// Owns the access/refresh token pair and decides, before every protected
/// call, whether a renewal exchange is needed. Methods take `&mut self`,
/// so one controller serves one sequence of calls at a time; wrap the
/// owning client in a lock if several tasks must share it.
pub struct SessionController {
    api_key: String,
    api_secret: String,
    state: SessionState,
}

impl SessionController {
    pub(crate) fn new(api_key: String, api_secret: String) -> Self {
        Self {
            api_key,
            api_secret,
            state: SessionState::default(),
        }
    }

    /// Resume from previously exported token strings. Expiries are
    /// re-derived from the tokens' own claims.
    pub(crate) fn restore(&mut self, access_token: &str, refresh_token: &str) -> Result<(), Error> {
        let access_expires_at = token::expiry_of(access_token)?;
        let refresh_expires_at = token::expiry_of(refresh_token)?;
        self.state.access = Credential::issued(access_token.to_owned(), access_expires_at);
        self.state.refresh = Credential::issued(refresh_token.to_owned(), refresh_expires_at);
        Ok(())
    }

    /// Called before every bearer-protected request. The common case is a
    /// single time comparison; otherwise exactly one exchange runs, a
    /// refresh when the refresh token is still live, a full
    /// re-authentication when it is not. Any failure leaves the cached
    /// state exactly as it was, so the next call tries again instead of
    /// inheriting a half-updated session.
    pub async fn ensure_valid(&mut self, transport: &HttpTransport) -> Result<(), Error> {
        let now = Utc::now();
        if self.state.access.is_live_at(now) {
            return Ok(());
        }
        debug!("access token expired");

        if self.state.refresh.is_live_at(now) {
            let renewed = authentication::refresh_token(transport, &self.state.refresh.value).await?;
            let expires_at = token::expiry_of(&renewed.data.access_token)?;
            self.state.access = Credential::issued(renewed.data.access_token, expires_at);
            debug!("access token renewed with refresh token");
            return Ok(());
        }

        debug!("refresh token expired; authenticating from scratch");
        let granted =
            authentication::authenticate(transport, &self.api_key, &self.api_secret).await?;
        self.install_grant(&granted)?;
        info!("fresh authentication was successful");
        Ok(())
    }

    /// Full login regardless of the cached state, for callers that know the
    /// session was invalidated out of band. Updates both credentials and
    /// hands the gateway's response back.
    pub async fn authenticate(&mut self, transport: &HttpTransport) -> Result<AuthResponse, Error> {
        let granted =
            authentication::authenticate(transport, &self.api_key, &self.api_secret).await?;
        self.install_grant(&granted)?;
        Ok(granted)
    }

    /// Refresh exchange regardless of the cached access token's state. The
    /// refresh token itself is not rotated by this path.
    pub async fn refresh(&mut self, transport: &HttpTransport) -> Result<RefreshResponse, Error> {
        if self.state.refresh.value.is_empty() {
            return Err(Error::NoSession);
        }
        let renewed = authentication::refresh_token(transport, &self.state.refresh.value).await?;
        let expires_at = token::expiry_of(&renewed.data.access_token)?;
        self.state.access = Credential::issued(renewed.data.access_token.clone(), expires_at);
        Ok(renewed)
    }

    fn install_grant(&mut self, granted: &AuthResponse) -> Result<(), Error> {
        // Both expiries are read before either credential is overwritten,
        // so a malformed token cannot leave the pair half-updated.
        let access_expires_at = token::expiry_of(&granted.data.access_token)?;
        let refresh_expires_at = token::expiry_of(&granted.data.refresh_token)?;
        self.state.access =
            Credential::issued(granted.data.access_token.clone(), access_expires_at);
        self.state.refresh =
            Credential::issued(granted.data.refresh_token.clone(), refresh_expires_at);
        Ok(())
    }

    /// Current access token, for the Authorization header of a protected
    /// call. Empty until a session has been established.
    pub fn access_token(&self) -> &str {
        &self.state.access.value
    }

    /// Current refresh token, for callers persisting the session.
    pub fn refresh_token(&self) -> &str {
        &self.state.refresh.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use chrono::Duration;
    use serde_json::json;

    fn token_expiring_at(instant: DateTime<Utc>) -> String {
        let header = URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(&json!({"alg": "HS256", "typ": "JWT"})).unwrap());
        let payload = URL_SAFE_NO_PAD
            .encode(serde_json::to_vec(&json!({"exp": instant.timestamp()})).unwrap());
        format!("{header}.{payload}.signature")
    }

    #[test]
    fn empty_credential_is_never_live() {
        assert!(!Credential::default().is_live_at(Utc::now()));
    }

    #[test]
    fn credential_liveness_is_strict() {
        let now = Utc::now();
        let at_deadline = Credential::issued("t".into(), now);
        let past_deadline = Credential::issued("t".into(), now - Duration::seconds(1));
        let before_deadline = Credential::issued("t".into(), now + Duration::seconds(1));

        assert!(!at_deadline.is_live_at(now));
        assert!(!past_deadline.is_live_at(now));
        assert!(before_deadline.is_live_at(now));
    }

    #[test]
    fn restore_reads_expiries_from_claims() {
        let access_deadline = Utc::now() + Duration::minutes(10);
        let refresh_deadline = Utc::now() + Duration::hours(10);
        let access = token_expiring_at(access_deadline);
        let refresh = token_expiring_at(refresh_deadline);

        let mut controller = SessionController::new("key".into(), "secret".into());
        controller.restore(&access, &refresh).unwrap();

        assert_eq!(controller.access_token(), access);
        assert_eq!(controller.refresh_token(), refresh);
        assert_eq!(
            controller.state.access.expires_at.unwrap().timestamp(),
            access_deadline.timestamp()
        );
        assert_eq!(
            controller.state.refresh.expires_at.unwrap().timestamp(),
            refresh_deadline.timestamp()
        );
    }

    #[test]
    fn restore_rejects_opaque_tokens() {
        let mut controller = SessionController::new("key".into(), "secret".into());
        let err = controller.restore("opaque", "tokens").unwrap_err();
        assert!(matches!(err, Error::MalformedToken(_)));
        assert_eq!(controller.access_token(), "");
    }

    #[tokio::test]
    async fn refresh_without_cached_token_is_rejected() {
        let transport = HttpTransport::new(Config::new());
        let mut controller = SessionController::new("key".into(), "secret".into());

        let err = controller.refresh(&transport).await.unwrap_err();
        assert!(matches!(err, Error::NoSession));
    }
}
