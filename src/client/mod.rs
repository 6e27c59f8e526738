//! HTTP clients used by the front ends: the Ecoleta API and the IBGE
//! geography service. No retries, no auth; one request per call.

pub mod api;
pub mod ibge;

pub use api::ApiClient;
pub use ibge::{IbgeClient, Location};

use std::time::Duration;
use thiserror::Error;

/// Default user agent for outgoing requests.
pub const DEFAULT_USER_AGENT: &str = concat!("ecoleta/", env!("CARGO_PKG_VERSION"));

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("server returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("form incomplete: {0}")]
    Incomplete(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

fn build_http_client() -> Result<reqwest::Client, ClientError> {
    let timeout = Duration::from_secs(DEFAULT_TIMEOUT_SECS);
    Ok(reqwest::Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()?)
}

/// Join `path` onto `base`, treating `base` as a directory even without a trailing slash.
fn join_url(base: &url::Url, path: &str) -> Result<url::Url, ClientError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let p = format!("{}/", base.path());
        base.set_path(&p);
    }
    Ok(base.join(path.trim_start_matches('/'))?)
}

/// Turn a non-2xx response into `ClientError::Status`, preferring the
/// server's `{ "error": { "message" } }` body when present.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(|m| m.as_str()).map(String::from))
        .unwrap_or(body);
    Err(ClientError::Status { status, message })
}
