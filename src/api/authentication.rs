use log::debug;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::http::HttpTransport;
use crate::error::VdsClientError as Error;

#[derive(Deserialize, Debug)]
pub struct AuthResponse {
    pub data: AuthGrant,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthGrant {
    /// JWT presented on protected endpoints.
    pub access_token: String,
    /// JWT exchanged for a new access token once the first one lapses.
    pub refresh_token: String,
    // The gateway echoes expiry timestamps next to the tokens, but the
    // claims inside the tokens are authoritative; these stay informational.
    #[serde(default)]
    pub access_token_expires_at: Option<String>,
    #[serde(default)]
    pub refresh_token_expires_at: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct RefreshResponse {
    pub data: RefreshGrant,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RefreshGrant {
    pub access_token: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

pub(crate) async fn authenticate(
    transport: &HttpTransport,
    api_key: &str,
    api_secret: &str,
) -> Result<AuthResponse, Error> {
    let body = json!({
        "api_key": api_key,
        "api_secret": api_secret,
    });

    let (status, decoded) = transport
        .send(Method::POST, "/auth", HeaderMap::new(), Some(body), None, None)
        .await?;
    match status {
        StatusCode::OK => Ok(serde_json::from_value(decoded)?),
        StatusCode::BAD_REQUEST => Err(Error::ValidationError(message_of(&decoded))),
        StatusCode::UNAUTHORIZED => {
            debug!("/auth: {} {}", status, message_of(&decoded));
            Err(Error::Unauthorized)
        }
        StatusCode::FORBIDDEN => {
            debug!("/auth: {} {}", status, message_of(&decoded));
            Err(Error::AccountBlocked)
        }
        StatusCode::NOT_FOUND => {
            debug!("/auth: {} {}", status, message_of(&decoded));
            Err(Error::AccountNotFound)
        }
        _ => {
            debug!("/auth: {} {}", status, message_of(&decoded));
            Err(Error::HttpError {
                status,
                message: message_of(&decoded),
            })
        }
    }
}

pub(crate) async fn refresh_token(
    transport: &HttpTransport,
    refresh_token: &str,
) -> Result<RefreshResponse, Error> {
    let body = json!({
        "data": { "refreshToken": refresh_token },
    });

    let (status, decoded) = transport
        .send(
            Method::POST,
            "/refresh-token",
            HeaderMap::new(),
            Some(body),
            None,
            None,
        )
        .await?;
    match status {
        StatusCode::OK => Ok(serde_json::from_value(decoded)?),
        _ => {
            debug!("/refresh-token: {} {}", status, message_of(&decoded));
            Err(Error::HttpError {
                status,
                message: message_of(&decoded),
            })
        }
    }
}

pub(crate) fn message_of(decoded: &Value) -> String {
    decoded
        .get("msg")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_owned()
}
