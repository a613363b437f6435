//! The HTTP boundary: turning a [`RequestDescriptor`] into raw response text.
//!
//! The engine only ever sees the [`Fetch`] trait, so tests drive it with
//! scripted fakes; the real client lives behind the `build-binary` feature.

use std::time::Duration;

use thiserror::Error;

use crate::catalogue::RequestDescriptor;

/// Fetches the raw response body for one request descriptor.
pub trait Fetch {
    /// Issue the request and return the response body as text.
    fn fetch(&self, descriptor: &RequestDescriptor) -> Result<String, FetchError>;
}

impl<F: Fetch + ?Sized> Fetch for &F {
    fn fetch(&self, descriptor: &RequestDescriptor) -> Result<String, FetchError> {
        (**self).fetch(descriptor)
    }
}

/// The ways a fetch can fail. All of them are fatal for that endpoint only.
#[derive(Error, Debug)]
pub enum FetchError {
    /// DNS, connection, or timeout failure.
    #[error("request to {url} failed: {message}")]
    Network {
        /// The request URL.
        url: String,
        /// The underlying transport error.
        message: String,
    },
    /// The server answered with a non-2xx status.
    #[error("bad response on {url}: {status}")]
    Status {
        /// The request URL.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
    /// The response body is not JSON.
    #[error("content for {url} had bad type, got: {content_type}")]
    ContentType {
        /// The request URL.
        url: String,
        /// The Content-Type header actually received.
        content_type: String,
    },
    /// The response carried no body at all.
    #[error("missing content for {url}")]
    MissingBody {
        /// The request URL.
        url: String,
    },
}

/// Connection settings for the live API, threaded into the fetcher at
/// construction time.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Base URL every descriptor path is resolved against.
    pub base_url: String,
    /// API key injected into every request before dispatch.
    pub api_key: String,
    /// Per-request timeout. A hung request must not stall the whole run.
    pub timeout: Duration,
}

impl ApiConfig {
    /// A config with the default 30 second request timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[cfg(feature = "build-binary")]
pub use self::http::HttpFetcher;

#[cfg(feature = "build-binary")]
mod http {
    use reqwest::blocking::Client;
    use reqwest::header::{ACCEPT, CONTENT_TYPE};
    use serde_json::Value;
    use tracing::debug;

    use crate::catalogue::{Method, RequestDescriptor};

    use super::{ApiConfig, Fetch, FetchError};

    /// Blocking HTTP client for the live API.
    pub struct HttpFetcher {
        client: Client,
        config: ApiConfig,
    }

    impl HttpFetcher {
        /// Build a client with the config's timeout applied.
        pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
            let client = Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(|err| FetchError::Network {
                    url: config.base_url.clone(),
                    message: err.to_string(),
                })?;

            Ok(HttpFetcher { client, config })
        }

        fn url_for(&self, path: &str) -> String {
            format!(
                "{}/{}",
                self.config.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }

    impl Fetch for HttpFetcher {
        fn fetch(&self, descriptor: &RequestDescriptor) -> Result<String, FetchError> {
            let url = self.url_for(&descriptor.path);

            let mut params = descriptor.params.clone();
            params.push(("api_key".to_owned(), self.config.api_key.clone()));

            debug!(method = %descriptor.method, %url, "issuing request");

            let request = match descriptor.method {
                Method::Get => self.client.get(&url).query(&params),
                Method::Post => {
                    let body: serde_json::Map<String, Value> = params
                        .into_iter()
                        .map(|(key, value)| (key, Value::String(value)))
                        .collect();
                    self.client.post(&url).json(&Value::Object(body))
                }
            };

            let response = request
                .header(ACCEPT, "application/json")
                .send()
                .map_err(|err| FetchError::Network {
                    url: url.clone(),
                    message: err.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url,
                    status: status.as_u16(),
                });
            }

            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default()
                .to_owned();
            if !content_type.starts_with("application/json") {
                return Err(FetchError::ContentType { url, content_type });
            }

            let body = response.text().map_err(|err| FetchError::Network {
                url: url.clone(),
                message: err.to_string(),
            })?;
            if body.is_empty() {
                return Err(FetchError::MissingBody { url });
            }

            Ok(body)
        }
    }
}
