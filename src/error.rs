use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VdsClientError {
    #[error("validation error: {0}")]
    ValidationError(String),
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("no session established; authenticate first")]
    NoSession,
    #[error("unauthorized")]
    Unauthorized,
    #[error("account blocked")]
    AccountBlocked,
    #[error("account not found")]
    AccountNotFound,
    #[error("API is down")]
    ApiDown,
    #[error("request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("HTTP error: {status}, message: {message}")]
    HttpError { status: StatusCode, message: String },
}
