use log::debug;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

use crate::api::authentication::message_of;
use crate::config::ResolvedCall;
use crate::core::http::HttpTransport;
use crate::error::VdsClientError as Error;

#[derive(Deserialize, Debug)]
pub struct StatusResponse {
    /// operational | degraded | partial_outage | major_outage | maintenance
    pub status: String,
}

pub(crate) async fn status(
    transport: &HttpTransport,
    call: &ResolvedCall,
) -> Result<StatusResponse, Error> {
    let (status, decoded) = transport
        .send(
            Method::GET,
            "/status",
            call.headers.clone(),
            None,
            None,
            Some(call.timeout),
        )
        .await?;
    match status {
        StatusCode::OK => Ok(serde_json::from_value(decoded)?),
        StatusCode::BAD_GATEWAY => Err(Error::ApiDown),
        _ => Err(Error::HttpError {
            status,
            message: message_of(&decoded),
        }),
    }
}

pub(crate) async fn validate_session(
    transport: &HttpTransport,
    bearer: &str,
    call: &ResolvedCall,
) -> Result<bool, Error> {
    let (status, decoded) = transport
        .send(
            Method::GET,
            "/validate/session",
            call.headers.clone(),
            None,
            Some(bearer),
            Some(call.timeout),
        )
        .await?;
    match status {
        StatusCode::OK => Ok(true),
        StatusCode::UNAUTHORIZED => {
            debug!("/validate/session: {} {}", status, message_of(&decoded));
            Ok(false)
        }
        _ => {
            debug!("/validate/session: {} {}", status, message_of(&decoded));
            Err(Error::HttpError {
                status,
                message: message_of(&decoded),
            })
        }
    }
}
