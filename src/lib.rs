//! Async client for the Efashe VDS vending gateway (airtime, electricity
//! and pay-TV top-ups).
//!
//! The gateway issues a pair of chained bearer tokens: an access token
//! presented on protected endpoints and a refresh token used to renew it.
//! Every protected call goes through [`session::SessionController`], which
//! decides against the expiry instants embedded in the tokens themselves
//! whether the cached session is still usable, needs a refresh exchange,
//! or needs a full re-authentication.

pub mod client;
pub mod config;
pub mod environment;
pub mod error;
pub mod logger;
pub mod session;

mod api;
mod core;

pub use api::authentication::{AuthGrant, AuthResponse, RefreshGrant, RefreshResponse};
pub use api::gateway::StatusResponse;
pub use client::VdsClient;
pub use config::CallOptions;
pub use error::VdsClientError;
