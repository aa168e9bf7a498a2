//! HTTP fetch trait and error definitions
//!
//! This module defines the `HttpFetch` trait that every transport must
//! satisfy, the response type, and an in-memory implementation used for
//! offline runs and tests.

use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

/// Errors that can occur while fetching a page
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

/// A raw HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,

    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Statuses 200-399 count as success
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }
}

/// HTTP transport used by the search pipeline
///
/// Implementations only transport bytes; status interpretation happens in
/// [`fetch_page`]. Calls are blocking.
pub trait HttpFetch {
    /// Issue a GET request
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL to fetch
    ///
    /// # Returns
    ///
    /// The status and body, or a transport error if no response arrived.
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;
}

impl<T: HttpFetch + ?Sized> HttpFetch for &T {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        (**self).get(url)
    }
}

impl<T: HttpFetch + ?Sized> HttpFetch for Box<T> {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        (**self).get(url)
    }
}

/// Fetch a page and return its body if the status is 200-399
pub fn fetch_page<F: HttpFetch + ?Sized>(http: &F, url: &str) -> Result<String, FetchError> {
    let response = http.get(url)?;
    if !response.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status,
        });
    }
    Ok(response.body)
}

/// Canned responses keyed by URL
///
/// Records every requested URL. Unknown URLs answer with HTTP 404.
#[derive(Debug, Default)]
pub struct InMemoryFetcher {
    routes: HashMap<String, Result<HttpResponse, FetchError>>,
    requests: RefCell<Vec<String>>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` with HTTP 200 at `url`
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.routes.insert(url.into(), Ok(HttpResponse::ok(body)));
        self
    }

    /// Answer `url` with an empty body and the given status
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.routes.insert(
            url.into(),
            Ok(HttpResponse {
                status,
                body: String::new(),
            }),
        );
        self
    }

    /// Fail `url` as if the connection broke
    pub fn with_transport_error(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        let error = FetchError::Transport {
            url: url.clone(),
            message: "connection reset".to_string(),
        };
        self.routes.insert(url, Err(error));
        self
    }

    /// All URLs requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    /// Number of requests whose URL contains `pattern`
    pub fn request_count(&self, pattern: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|url| url.contains(pattern))
            .count()
    }
}

impl HttpFetch for InMemoryFetcher {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        debug!("In-memory GET {}", url);
        self.requests.borrow_mut().push(url.to_string());
        match self.routes.get(url) {
            Some(response) => response.clone(),
            None => Ok(HttpResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}
