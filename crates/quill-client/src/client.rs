//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use url::Url;

use quill_token::{SharedTokenStore, TokenStore as _, claims, create_memory_store};

use crate::api::{AuthApi, CommentsApi, PostsApi};
use crate::error::{Error, ErrorBody, Result};
use crate::expiry::ExpiryListeners;

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Whether a request must carry a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Attach the stored token; a dead session fails the call.
    Required,
    /// Send unauthenticated.
    None,
}

/// Quill API client.
///
/// Provides typed access to the Quill server endpoints. Cheap to clone;
/// clones share the HTTP connection pool, token store, and expiry
/// listeners.
///
/// # Example
///
/// ```no_run
/// use quill_client::QuillClient;
///
/// # async fn example() -> quill_client::Result<()> {
/// let client = QuillClient::builder()
///     .base_url("http://localhost:8000")
///     .build()?;
///
/// let posts = client.posts().list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct QuillClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests.
    pub(crate) base_url: Url,
    /// Request timeout.
    pub(crate) timeout: Duration,
    /// Credential storage.
    pub(crate) store: SharedTokenStore,
    /// Session-expiry subscribers.
    pub(crate) expiry: ExpiryListeners,
}

impl QuillClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The credential store backing this client.
    pub fn token_store(&self) -> SharedTokenStore {
        Arc::clone(&self.inner.store)
    }

    /// Register a callback invoked whenever a dead session is detected.
    ///
    /// Fires on the local expired-token short-circuit and on any 401 from an
    /// authenticated request. Callbacks must be idempotent.
    pub fn on_session_expired(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.inner.expiry.subscribe(listener);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the auth API.
    pub fn auth(&self) -> AuthApi {
        AuthApi::new(self.clone())
    }

    /// Access the posts API.
    pub fn posts(&self) -> PostsApi {
        PostsApi::new(self.clone())
    }

    /// Access the comments API.
    pub fn comments(&self) -> CommentsApi {
        CommentsApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner.base_url.join(path).map_err(Error::from)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        auth: Auth,
    ) -> Result<T> {
        let url = self.url(path)?;
        let request = self.inner.http.get(url).timeout(self.inner.timeout);
        let request = self.authorize(request, auth).await?;
        let response = request.send().await?;
        self.handle_response(response, auth).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B, auth: Auth) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let request = self
            .inner
            .http
            .post(url)
            .json(body)
            .timeout(self.inner.timeout);
        let request = self.authorize(request, auth).await?;
        let response = request.send().await?;
        self.handle_response(response, auth).await
    }

    /// Make a POST request with no body, discarding the response body.
    pub(crate) async fn post_empty(&self, path: &str, auth: Auth) -> Result<()> {
        let url = self.url(path)?;
        let request = self.inner.http.post(url).timeout(self.inner.timeout);
        let request = self.authorize(request, auth).await?;
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(self.extract_error(response, auth).await);
        }

        Ok(())
    }

    /// Make a PUT request.
    pub(crate) async fn put<T, B>(&self, path: &str, body: &B, auth: Auth) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let request = self
            .inner
            .http
            .put(url)
            .json(body)
            .timeout(self.inner.timeout);
        let request = self.authorize(request, auth).await?;
        let response = request.send().await?;
        self.handle_response(response, auth).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete(&self, path: &str, auth: Auth) -> Result<()> {
        let url = self.url(path)?;
        let request = self.inner.http.delete(url).timeout(self.inner.timeout);
        let request = self.authorize(request, auth).await?;
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(self.extract_error(response, auth).await);
        }

        Ok(())
    }

    /// Attach the bearer token when the request requires auth.
    ///
    /// A stored token that has already expired short-circuits the request:
    /// the store is cleared, expiry listeners fire, and the call fails
    /// without touching the network. A missing token sends no header and
    /// leaves the 401 to the server.
    async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
        auth: Auth,
    ) -> Result<reqwest::RequestBuilder> {
        if auth == Auth::None {
            return Ok(request);
        }

        match self.inner.store.retrieve().await? {
            Some(credentials) if claims::is_expired(&credentials.token) => {
                tracing::debug!("Stored token already expired, short-circuiting request");
                self.expire_session().await;
                Err(Error::SessionExpired("Session expired".to_string()))
            }
            Some(credentials) => {
                Ok(request.header(AUTHORIZATION, format!("Bearer {}", credentials.token)))
            }
            None => Ok(request),
        }
    }

    /// Handle a response, extracting the body or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
        auth: Auth,
    ) -> Result<T> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(self.extract_error(response, auth).await)
        }
    }

    /// Extract an error from a failed response.
    async fn extract_error(&self, response: reqwest::Response, auth: Auth) -> Error {
        let status = response.status().as_u16();
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.message)
            .unwrap_or_else(|_| format!("HTTP {}", status));

        if status == 401 {
            if auth == Auth::Required {
                // The server rejected the token: same cleanup as local expiry.
                self.expire_session().await;
                Error::SessionExpired(message)
            } else {
                Error::AuthFailed(message)
            }
        } else if status == 404 {
            Error::NotFound(message)
        } else {
            Error::RequestFailed { status, message }
        }
    }

    /// Clear stored credentials and notify expiry listeners.
    ///
    /// Safe to invoke more than once for the same session.
    async fn expire_session(&self) {
        if let Err(e) = self.inner.store.remove().await {
            tracing::warn!(error = %e, "Failed to clear credential store on expiry");
        }
        self.inner.expiry.notify();
    }
}

/// Builder for creating a [`QuillClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    token_store: Option<SharedTokenStore>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            token_store: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the base URL for the server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the credential store backing this client.
    ///
    /// Defaults to an in-memory store; deployments that should survive a
    /// restart inject a file-backed one here.
    pub fn token_store(mut self, store: SharedTokenStore) -> Self {
        self.token_store = Some(store);
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<QuillClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        // Build default headers
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("quill-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(QuillClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                store: self.token_store.unwrap_or_else(create_memory_store),
                expiry: ExpiryListeners::new(),
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use quill_token::{InMemoryTokenStore, StoredCredentials};
    use quill_types::{LoginRequest, Post};

    fn make_token(exp: i64) -> String {
        let claims = serde_json::json!({"user_id": "u1", "exp": exp});
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("h.{}.s", payload)
    }

    fn future_token() -> String {
        make_token(chrono::Utc::now().timestamp() + 3600)
    }

    fn expired_token() -> String {
        make_token(chrono::Utc::now().timestamp() - 10)
    }

    fn client_with_store(base_url: &str, store: SharedTokenStore) -> QuillClient {
        QuillClient::builder()
            .base_url(base_url)
            .token_store(store)
            .build()
            .unwrap()
    }

    fn post_body(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "Hello",
            "content": "# Hello",
            "excerpt": "Hello",
            "author_id": "u1",
            "author_name": "John Doe",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientBuilder::new().build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:8000")
            .build()
            .unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
    }

    #[test]
    fn test_url_building() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:8000")
            .build()
            .unwrap();

        let url = client.url("posts").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/posts");

        let url = client.url("/posts/1/comments").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/posts/1/comments");
    }

    #[tokio::test]
    async fn test_get_posts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(vec![post_body("p1")]))
            .mount(&server)
            .await;

        let client = client_with_store(&server.uri(), Arc::new(InMemoryTokenStore::new()));
        let posts: Vec<Post> = client.get("posts", Auth::None).await.unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "p1");
    }

    #[tokio::test]
    async fn test_bearer_header_attached_for_authed_request() {
        let token = future_token();
        let bearer = format!("Bearer {}", token);

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .and(header("authorization", bearer.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "u1",
                "email": "john@example.com",
                "name": "John Doe",
                "created_at": "2024-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let store: SharedTokenStore = Arc::new(InMemoryTokenStore::with_credentials(
            StoredCredentials::new(token, None),
        ));
        let client = client_with_store(&server.uri(), store);

        let user: quill_types::User = client.get("auth/me", Auth::Required).await.unwrap();
        assert_eq!(user.name, "John Doe");
    }

    #[tokio::test]
    async fn test_expired_token_short_circuits_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let store: SharedTokenStore = Arc::new(InMemoryTokenStore::with_credentials(
            StoredCredentials::new(expired_token(), None),
        ));
        let client = client_with_store(&server.uri(), Arc::clone(&store));

        let fired = Arc::new(AtomicUsize::new(0));
        {
            let fired = Arc::clone(&fired);
            client.on_session_expired(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }

        let result: Result<quill_types::User> = client.get("auth/me", Auth::Required).await;
        assert!(matches!(result, Err(Error::SessionExpired(_))));
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(store.retrieve().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_clears_store_and_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/me"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"detail": "Token revoked"})),
            )
            .mount(&server)
            .await;

        let store: SharedTokenStore = Arc::new(InMemoryTokenStore::with_credentials(
            StoredCredentials::new(future_token(), None),
        ));
        let client = client_with_store(&server.uri(), Arc::clone(&store));

        let fired = Arc::new(AtomicUsize::new(0));
        {
            let fired = Arc::clone(&fired);
            client.on_session_expired(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }

        let result: Result<quill_types::User> = client.get("auth/me", Auth::Required).await;
        match result {
            Err(Error::SessionExpired(message)) => assert_eq!(message, "Token revoked"),
            other => panic!("expected SessionExpired, got {:?}", other.err()),
        }
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert!(store.retrieve().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_login_is_bad_credentials_not_session_death() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"detail": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        // An existing session's credentials must survive a failed login.
        let store: SharedTokenStore = Arc::new(InMemoryTokenStore::with_credentials(
            StoredCredentials::new(future_token(), None),
        ));
        let client = client_with_store(&server.uri(), Arc::clone(&store));

        let fired = Arc::new(AtomicUsize::new(0));
        {
            let fired = Arc::clone(&fired);
            client.on_session_expired(move || {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }

        let result = client
            .auth()
            .login(LoginRequest {
                email: "john@example.com".to_string(),
                password: "wrong".to_string(),
            })
            .await;

        assert!(matches!(result, Err(Error::AuthFailed(_))));
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        assert!(store.retrieve().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"detail": "Post not found"})),
            )
            .mount(&server)
            .await;

        let client = client_with_store(&server.uri(), Arc::new(InMemoryTokenStore::new()));
        let result: Result<Post> = client.get("posts/missing", Auth::None).await;

        assert!(matches!(result, Err(Error::NotFound(_))));
    }

    #[tokio::test]
    async fn test_server_message_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/posts"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({"detail": "Title is required"})),
            )
            .mount(&server)
            .await;

        let client = client_with_store(&server.uri(), Arc::new(InMemoryTokenStore::new()));
        let result: Result<Post> = client
            .post("posts", &serde_json::json!({}), Auth::None)
            .await;

        match result {
            Err(Error::RequestFailed { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "Title is required");
            }
            other => panic!("expected RequestFailed, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_unparseable_error_body_gets_generic_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/posts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = client_with_store(&server.uri(), Arc::new(InMemoryTokenStore::new()));
        let result: Result<Vec<Post>> = client.get("posts", Auth::None).await;

        match result {
            Err(Error::RequestFailed { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "HTTP 500");
            }
            other => panic!("expected RequestFailed, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_is_network_error() {
        // Nothing listens on this port.
        let client = client_with_store("http://127.0.0.1:9", Arc::new(InMemoryTokenStore::new()));
        let result: Result<Vec<Post>> = client.get("posts", Auth::None).await;

        assert!(matches!(result, Err(Error::Network(_))));
    }
}
