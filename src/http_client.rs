use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Builds the blocking client handed to [`crate::lichess::LichessClient`].
/// Game exports stream slowly, so the timeout is generous.
pub fn build_http_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .context("failed to build http client")
}
