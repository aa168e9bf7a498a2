//! ureq-based HTTP transport
//!
//! Direct implementation of the `HttpFetch` trait using a blocking ureq agent
//! with native-tls and a global per-request timeout.

use crate::client::{FetchError, HttpFetch, HttpResponse};
use log::debug;
use std::time::Duration;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};
use ureq::Agent;

const USER_AGENT: &str = concat!("so-watch/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client using ureq
#[derive(Debug, Clone)]
pub struct UreqFetcher {
    agent: Agent,
}

impl UreqFetcher {
    /// Create a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> Self {
        let tls_config = TlsConfig::builder()
            .provider(TlsProvider::NativeTls)
            .root_certs(RootCerts::PlatformVerifier)
            .build();

        // Status codes are checked by the caller, not turned into errors here
        let agent = Agent::config_builder()
            .tls_config(tls_config)
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent }
    }
}

impl HttpFetch for UreqFetcher {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        debug!("GET {}", url);

        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
