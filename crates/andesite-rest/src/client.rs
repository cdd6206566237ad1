//! REST client for a single node

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;
use url::Url;

use crate::error::HttpError;
use crate::options::{NodeOptions, StatusPolicy};
use crate::request::RequestConfig;
use crate::response::{decode_body, RawResponse, Response};

/// REST client bound to one node
///
/// Cloning is cheap; clones share the transport and the request counter.
#[derive(Debug, Clone)]
pub struct RestClient {
    inner: reqwest::Client,
    base_url: Url,
    status_policy: StatusPolicy,
    requests: Arc<AtomicU64>,
}

impl RestClient {
    /// Create a client for the node described by `options`
    ///
    /// No connection is made here. Fails if the host or a header value is malformed.
    pub fn new(options: &NodeOptions) -> Response<Self> {
        let base_url = options.base_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static("user-id"),
            header_value(&options.user_id, false)?,
        );
        if let Some(authorization) = &options.authorization {
            headers.insert(AUTHORIZATION, header_value(authorization, true)?);
        }

        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(options.rest_timeout())
            .build()
            .map_err(|e| HttpError::InvalidConfig(e.to_string()))?;

        tracing::debug!(node = %base_url, "Created node REST client");

        Ok(Self {
            inner,
            base_url,
            status_policy: options.status_policy,
            requests: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Requests completed successfully since this client was created
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// `http://{host}:{port}/` of the node
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Non-2xx handling in effect
    pub fn status_policy(&self) -> StatusPolicy {
        self.status_policy
    }

    /// GET `endpoint`, returns the JSON body deserialized to R
    #[instrument(skip(self, config), fields(node = %self.base_url))]
    pub async fn get<R>(&self, endpoint: &str, config: Option<&RequestConfig>) -> Response<R>
    where
        R: DeserializeOwned,
    {
        self.request::<(), R>(Method::GET, endpoint, None, config).await
    }

    /// POST `endpoint` with an optional JSON body, returns the JSON body deserialized to R
    #[instrument(skip(self, body, config), fields(node = %self.base_url))]
    pub async fn post<B, R>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        config: Option<&RequestConfig>,
    ) -> Response<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::POST, endpoint, body, config).await
    }

    /// PATCH `endpoint` with an optional JSON body, returns the JSON body deserialized to R
    #[instrument(skip(self, body, config), fields(node = %self.base_url))]
    pub async fn patch<B, R>(
        &self,
        endpoint: &str,
        body: Option<&B>,
        config: Option<&RequestConfig>,
    ) -> Response<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::PATCH, endpoint, body, config).await
    }

    /// DELETE `endpoint`, returns the JSON body deserialized to R
    #[instrument(skip(self, config), fields(node = %self.base_url))]
    pub async fn delete<R>(&self, endpoint: &str, config: Option<&RequestConfig>) -> Response<R>
    where
        R: DeserializeOwned,
    {
        self.request::<(), R>(Method::DELETE, endpoint, None, config).await
    }

    /// Issue a request with any method and decode the JSON body
    pub async fn request<B, R>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        config: Option<&RequestConfig>,
    ) -> Response<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let result = match self.send(method, endpoint, body, config).await {
            Ok(raw) => decode_body(raw.bytes()),
            Err(err) => Err(err),
        };
        self.complete(result)
    }

    /// Issue a request with any method and return the response as read
    ///
    /// Status policy and counting are the same as for the verb methods.
    pub async fn request_raw<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        config: Option<&RequestConfig>,
    ) -> Response<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let result = self.send(method, endpoint, body, config).await;
        self.complete(result)
    }

    async fn send<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        config: Option<&RequestConfig>,
    ) -> Response<RawResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(endpoint)?;
        let mut request = self.inner.request(method, url);

        if let Some(body) = body {
            let bytes = serde_json::to_vec(body)?;
            request = request.header(CONTENT_TYPE, "application/json").body(bytes);
        }

        if let Some(config) = config {
            request = config.apply(request);
        }

        let response = request.send().await?;
        let status = response.status();

        if self.status_policy == StatusPolicy::Reject && !status.is_success() {
            let message = response.text().await?;
            return Err(HttpError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(RawResponse::new(status.as_u16(), headers, body.to_vec()))
    }

    fn complete<R>(&self, result: Response<R>) -> Response<R> {
        match &result {
            Ok(_) => {
                let count = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
                tracing::trace!(requests = count, "Request completed");
            }
            Err(err) => tracing::debug!("Request failed: {}", err),
        }
        result
    }

    /// Resolve `endpoint` against the node URL
    ///
    /// Endpoints carrying their own scheme are used as given.
    fn endpoint_url(&self, endpoint: &str) -> Response<Url> {
        if has_scheme(endpoint) {
            return Url::parse(endpoint).map_err(HttpError::from);
        }

        if endpoint.starts_with("//") {
            return self.base_url.join(endpoint).map_err(HttpError::from);
        }

        let url = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        );
        Url::parse(&url).map_err(HttpError::from)
    }
}

fn header_value(value: &str, sensitive: bool) -> Response<HeaderValue> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| HttpError::InvalidConfig(format!("Invalid header value: {}", e)))?;
    header.set_sensitive(sensitive);
    Ok(header)
}

fn has_scheme(endpoint: &str) -> bool {
    match endpoint.split_once("://") {
        Some((scheme, _)) => {
            let mut chars = scheme.chars();
            chars.next().is_some_and(|c| c.is_ascii_alphabetic())
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestClient {
        RestClient::new(&NodeOptions::new("localhost", 5000, "abc")).expect("Valid options")
    }

    #[test]
    fn test_new_starts_with_zero_requests() {
        let client = client();
        assert_eq!(client.request_count(), 0);
        assert_eq!(client.base_url().as_str(), "http://localhost:5000/");
        assert_eq!(client.status_policy(), StatusPolicy::Reject);
    }

    #[test]
    fn test_new_rejects_malformed_host() {
        let result = RestClient::new(&NodeOptions::new("no such host", 5000, "abc"));
        assert!(matches!(result, Err(HttpError::InvalidConfig(_))));
    }

    #[test]
    fn test_new_rejects_malformed_header_values() {
        let result = RestClient::new(&NodeOptions::new("localhost", 5000, "abc\r\n"));
        assert!(matches!(result, Err(HttpError::InvalidConfig(_))));

        let options = NodeOptions::new("localhost", 5000, "abc").with_authorization("a\nb");
        let result = RestClient::new(&options);
        assert!(matches!(result, Err(HttpError::InvalidConfig(_))));
    }

    #[test]
    fn test_clone_shares_counter() {
        let client = client();
        let clone = client.clone();
        let _ = client.complete::<()>(Ok(()));
        assert_eq!(clone.request_count(), 1);
    }

    #[test]
    fn test_failed_result_is_not_counted() {
        let client = client();
        let _ = client.complete::<()>(Err(HttpError::InvalidUrl("x".to_string())));
        assert_eq!(client.request_count(), 0);
    }

    #[test]
    fn test_endpoint_url_joins_with_single_slash() {
        let client = client();
        for endpoint in ["/stats", "stats"] {
            let url = client.endpoint_url(endpoint).expect("Valid endpoint");
            assert_eq!(url.as_str(), "http://localhost:5000/stats");
        }

        let url = client
            .endpoint_url("/loadtracks?identifier=test")
            .expect("Valid endpoint");
        assert_eq!(url.as_str(), "http://localhost:5000/loadtracks?identifier=test");
    }

    #[test]
    fn test_endpoint_url_protocol_relative() {
        let client = client();
        let url = client
            .endpoint_url("//other.node:2333/stats")
            .expect("Valid endpoint");
        assert_eq!(url.as_str(), "http://other.node:2333/stats");
    }

    #[test]
    fn test_endpoint_url_keeps_absolute_urls() {
        let client = client();
        let url = client
            .endpoint_url("https://other.node:8443/stats")
            .expect("Valid endpoint");
        assert_eq!(url.as_str(), "https://other.node:8443/stats");
    }

    #[test]
    fn test_has_scheme() {
        assert!(has_scheme("http://localhost"));
        assert!(has_scheme("svn+ssh://host"));
        assert!(!has_scheme("/player/1?redirect=http://x"));
        assert!(!has_scheme("localhost:5000"));
        assert!(!has_scheme("://nohost"));
    }
}
