//! Typed request executor
//!
//! [`ApiClient`] turns a request descriptor (path, method, query, body,
//! skip-auth flag) into a typed result or an [`ApiError`]. It owns the
//! reqwest client, the configured base URL, and a handle to the token store.
//!
//! Deliberate simplifications, carried from the consumed backend contract:
//! - no automatic retries
//! - no transparent token refresh on 401 (refresh is an explicit caller
//!   operation, see the auth service)
//! - no timeouts beyond the HTTP client's defaults
//!
//! These are documented gaps, not bugs to patch silently.

use crate::config::ClientConfig;
use crate::error::{ApiError, Error, Result};
use crate::token_store::TokenStore;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Typed HTTP client for the Summit API
///
/// Cheap to share behind an `Arc`; every domain service facade borrows one
/// of these. Holds no request state — descriptors are built per call and
/// not retained.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    /// Create a client from a configuration and a token store
    pub fn new(config: ClientConfig, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url,
            tokens,
        }
    }

    /// Create a client configured from the environment
    pub fn from_env(tokens: Arc<dyn TokenStore>) -> Self {
        Self::new(ClientConfig::from_env(), tokens)
    }

    /// The configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle to the underlying token store
    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    /// Start building a request for the given method and endpoint path
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder<'_> {
        RequestBuilder {
            client: self,
            method,
            path: path.to_string(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            skip_auth: false,
        }
    }

    /// GET request builder
    pub fn get(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::GET, path)
    }

    /// POST request builder
    pub fn post(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::POST, path)
    }

    /// PATCH request builder
    pub fn patch(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::PATCH, path)
    }

    /// PUT request builder
    pub fn put(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::PUT, path)
    }

    /// DELETE request builder
    pub fn delete(&self, path: &str) -> RequestBuilder<'_> {
        self.request(Method::DELETE, path)
    }
}

/// Builder for a single API request
///
/// Transient: constructed per call, consumed by one of the `send` methods.
pub struct RequestBuilder<'a> {
    client: &'a ApiClient,
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Value>,
    skip_auth: bool,
}

impl RequestBuilder<'_> {
    /// Add a query parameter when the value is defined
    ///
    /// `None` omits the key entirely — it is never sent as an empty value.
    /// Defined values always appear, including `0` and the empty string.
    pub fn query(mut self, key: &str, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }

    /// Set a header, overriding any default of the same name
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Skip credential attachment for this request
    ///
    /// No authorization header is sent regardless of token store contents.
    pub fn skip_auth(mut self) -> Self {
        self.skip_auth = true;
        self
    }

    /// Execute and parse the response body as `T`
    ///
    /// An unexpected 204 No Content becomes [`Error::EmptyBody`]; use
    /// [`send_optional`](Self::send_optional) or
    /// [`send_unit`](Self::send_unit) for endpoints that legitimately
    /// return nothing.
    pub async fn send<T: DeserializeOwned>(self) -> Result<T> {
        let target = format!("{} {}", self.method, self.path);
        match self.send_optional().await? {
            Some(value) => Ok(value),
            None => Err(Error::EmptyBody(target)),
        }
    }

    /// Execute and discard any response body
    pub async fn send_unit(self) -> Result<()> {
        self.send_optional::<Value>().await?;
        Ok(())
    }

    /// Execute; `None` is the explicit no-value sentinel for 204 No Content
    pub async fn send_optional<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let url = self.build_url()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        // Caller headers replace defaults of the same name, never append a
        // second value and never remove
        for (name, value) in &self.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|_| Error::InvalidHeader(name.clone()))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|_| Error::InvalidHeader(name.to_string()))?;
            headers.insert(name, value);
        }

        let mut request = self
            .client
            .http
            .request(self.method.clone(), url)
            .headers(headers);

        if !self.skip_auth {
            // Read-then-use: a concurrent logout can race this read, and the
            // in-flight request proceeds with whatever pair it captured.
            // Token validity is enforced server-side.
            if let Some(pair) = self.client.tokens.read().await.into_pair() {
                request = request.bearer_auth(&pair.access);
            }
        }

        if let Some(body) = &self.body {
            request = request.json(body);
        }

        tracing::debug!(method = %self.method, path = %self.path, "sending API request");
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            // Best-effort parse of the error body; an unparseable body
            // yields an opaque null payload, never a construction failure
            let text = response.text().await.unwrap_or_default();
            let data = serde_json::from_str(&text).unwrap_or(Value::Null);
            tracing::debug!(
                method = %self.method,
                path = %self.path,
                status = status.as_u16(),
                "API request failed"
            );
            return Err(ApiError::new(
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                data,
            )
            .into());
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        Ok(Some(response.json::<T>().await?))
    }

    fn build_url(&self) -> Result<Url> {
        // Base URL and endpoint path are concatenated as strings; only the
        // query string goes through the URL encoder
        let mut url = Url::parse(&format!("{}{}", self.client.base_url, self.path))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(url)
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::{MemoryTokenStore, TokenPair};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(
            ClientConfig {
                base_url: server.uri(),
            },
            Arc::new(MemoryTokenStore::new()),
        )
    }

    async fn client_with_tokens(server: &MockServer) -> ApiClient {
        let client = client_for(server).await;
        client
            .tokens()
            .write(&TokenPair {
                access: "access-abc".to_string(),
                refresh: "refresh-xyz".to_string(),
            })
            .await;
        client
    }

    #[tokio::test]
    async fn test_bearer_token_attached_when_stored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let client = client_with_tokens(&server).await;
        let _: Value = client.get("/me/").send().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let auth = requests[0].headers.get("authorization").unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer access-abc");
    }

    #[tokio::test]
    async fn test_no_auth_header_when_store_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let _: Value = client.get("/articles/").send().await.unwrap();

        // Absent token: proceed without the header, the server decides
        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_skip_auth_never_attaches_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        // Tokens are present, but skip_auth must win
        let client = client_with_tokens(&server).await;
        let _: Value = client
            .post("/auth/login/")
            .json(&json!({"username": "alice", "password": "pw"}))
            .unwrap()
            .skip_auth()
            .send()
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("authorization").is_none());
    }

    #[tokio::test]
    async fn test_query_omits_undefined_keeps_falsy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let _: Value = client
            .get("/articles/")
            .query("page", Some(0))
            .query("search", Some(""))
            .query("status", None::<String>)
            .send()
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let query: Vec<(String, String)> = requests[0]
            .url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        // Defined values appear, including 0 and empty string; None is
        // omitted entirely
        assert_eq!(query.len(), 2);
        assert!(query.contains(&("page".to_string(), "0".to_string())));
        assert!(query.contains(&("search".to_string(), String::new())));
    }

    #[tokio::test]
    async fn test_default_content_type_with_override() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tags/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let _: Value = client.get("/tags/").send().await.unwrap();
        let _: Value = client
            .get("/tags/")
            .header("Content-Type", "application/vnd.summit+json")
            .send()
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let plain = requests[0].headers.get("content-type").unwrap();
        assert_eq!(plain.to_str().unwrap(), "application/json");
        // The override replaces the default: exactly one value on the wire,
        // never the default plus the caller's appended after it
        let overridden: Vec<&str> = requests[1]
            .headers
            .get_all("content-type")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(overridden, vec!["application/vnd.summit+json"]);
    }

    #[tokio::test]
    async fn test_204_returns_no_value_sentinel() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/articles/old-post/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result: Option<Value> = client
            .delete("/articles/old-post/")
            .send_optional()
            .await
            .unwrap();
        assert!(result.is_none());

        client.delete("/articles/old-post/").send_unit().await.unwrap();
    }

    #[tokio::test]
    async fn test_204_where_body_required_is_empty_body_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me/"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let result = client.get("/me/").send::<Value>().await;
        assert!(matches!(result, Err(Error::EmptyBody(_))));
    }

    #[tokio::test]
    async fn test_error_carries_parsed_json_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/articles/"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"title": ["This field is required."]})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client
            .post("/articles/")
            .json(&json!({}))
            .unwrap()
            .send::<Value>()
            .await
            .unwrap_err();

        match err {
            Error::Api(api) => {
                assert_eq!(api.status, 400);
                assert!(api.is_validation());
                assert_eq!(
                    api.field_errors()["title"],
                    vec!["This field is required."]
                );
            }
            other => panic!("expected Error::Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_with_unparseable_body_gets_null_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/articles/"))
            .respond_with(
                ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let err = client.get("/articles/").send::<Value>().await.unwrap_err();

        match err {
            Error::Api(api) => {
                assert_eq!(api.status, 502);
                assert_eq!(api.data, Value::Null);
                assert!(!api.is_validation());
            }
            other => panic!("expected Error::Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_body_omitted_when_not_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/categories/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let _: Value = client.get("/categories/").send().await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].body.is_empty());
    }
}
