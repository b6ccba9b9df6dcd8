//! HTTP transport shared by the provider adapters.
//!
//! A thin seam over reqwest: adapters hand it a URL, headers, and a JSON
//! body, and get back the provider's status, body, and headers untouched.
//! Status interpretation stays in the adapters because success semantics
//! differ per provider.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;

use crate::errors::MailerResult;
use crate::types::Response;

/// Fixed timeout applied to every provider call.
pub const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport trait the adapters program against.
///
/// The mock transport in [`crate::mocks`] implements this for tests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issues a POST and returns the raw result as a normalized [`Response`].
    ///
    /// Any status is returned as `Ok`; only network, timeout, and client
    /// failures produce an error.
    async fn post(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: Vec<u8>,
    ) -> MailerResult<Response>;
}

/// Reqwest-based transport used by every adapter in production.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with the fixed send timeout.
    pub fn new() -> MailerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| crate::errors::MailerError::Construction {
                message: format!("failed to create HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Flattens a reqwest header map into the normalized multi-value form.
    fn extract_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
        let mut out: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers.iter() {
            if let Ok(value) = value.to_str() {
                out.entry(name.as_str().to_string())
                    .or_default()
                    .push(value.to_string());
            }
        }
        out
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        headers: &HashMap<String, String>,
        body: Vec<u8>,
    ) -> MailerResult<Response> {
        let mut request = self.client.post(url);
        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request.body(body).send().await?;
        let status_code = response.status().as_u16();
        let response_headers = Self::extract_headers(response.headers());
        let body = response.text().await?;

        Ok(Response {
            status_code,
            body,
            headers: response_headers,
        })
    }
}
