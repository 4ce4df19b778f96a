use std::time::Duration;
use log::{trace, warn};
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use url::Url;
use crate::util::StrExt;

mod errors;

pub use errors::ApiClientError;

/// HTTP access to the portal backend, rooted at the API base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(
        api_url: &str,
        request_timeout: Option<Duration>,
    ) -> Result<Self, ApiClientError> {
        // relative endpoints must resolve under the base, not replace its last segment
        let api_url = if api_url.ends_with('/') {
            api_url.to_owned()
        } else {
            format!("{api_url}/")
        };
        let base = Url::parse(&api_url)
            .map_err(|e| ApiClientError::BaseUrl { url: api_url, source: e })?;
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(
            ApiClient {
                client: builder.build()?,
                base,
            }
        )
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, ApiClientError> {
        self.base.join(path)
            .map_err(|e| ApiClientError::Endpoint { path: path.to_owned(), source: e })
    }

    pub fn request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<RequestBuilder, ApiClientError> {
        let url = self.endpoint(path)?;
        trace!("{method} {url}");
        Ok(self.client.request(method, url))
    }

    /// Same as [Self::request], authorised with [token] as a bearer token.
    pub fn authorized_request(
        &self,
        method: Method,
        path: &str,
        token: &str,
    ) -> Result<RequestBuilder, ApiClientError> {
        Ok(self.request(method, path)?.bearer_auth(token))
    }
}

/// Human-readable reason for a failed call: the `detail` string of a JSON
/// error body when there is one, [fallback] otherwise.
pub async fn failure_detail(response: Response, fallback: &str) -> String {
    let status = response.status();
    match response.json::<Value>().await {
        Ok(body) => body.get("detail")
            .and_then(Value::as_str)
            // a blank detail gets the fallback too, not an empty message
            .and_then(|detail| detail.nonblank_to_some())
            .unwrap_or_else(|| fallback.to_owned()),
        Err(e) => {
            warn!("unreadable error body for HTTP {status}: {e}");
            fallback.to_owned()
        },
    }
}
