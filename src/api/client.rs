//
//  argocd-rs
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client for the Argo CD API
//!
//! This module provides the core client shared by every resource service. It
//! owns connection configuration, the session token and the per-request header
//! assembly.
//!
//! ## Features
//!
//! - Base URL normalization (always ends with `/`)
//! - Lazy authentication through [`Client::init`]
//! - `Authorization: Bearer` injection with a write-once token
//! - JSON headers on every request
//! - Insecure-by-default TLS for `https` servers, overridable per client
//!
//! ## Lifecycle
//!
//! ```text
//! Client::new ──► Client::init ──► service method ──► Client::new_request
//!                  (login once)                         └─► query/body ─► execute
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use super::error::{ArgoError, Result};
use super::options::{ClientConfig, ClientOption, StatusPolicy};
use super::request::{HttpMethod, RequestBuilder};
use super::token::{AuthToken, TokenCell};
use super::transport::{HttpRequest, ReqwestTransport, Transport};
use super::v1::{
    AccountsService, ApplicationsService, ClustersService, ProjectsService, RepoCredsService,
    RepositoriesService, SessionsService,
};
use crate::auth::{Authenticator, SessionAuthenticator};

/// Path prefix of the versioned REST API, relative to the base URL.
pub const API_V1_PREFIX: &str = "api/v1/";

/// Joins the API prefix and a path relative to it.
pub(crate) fn v1(path: &str) -> String {
    format!("{API_V1_PREFIX}{path}")
}

/// The Argo CD API client.
///
/// Cloning is cheap; clones share configuration, transport and token.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use argocd_rs::Client;
///
/// # async fn example() -> Result<(), argocd_rs::ArgoError> {
/// // Username/password; the token is fetched by `init`
/// let client = Client::new("https://argocd.example.com", "admin", "secret", "", [])?;
/// client.init().await?;
///
/// let accounts = client.accounts().list_accounts().await?;
/// for account in accounts.items {
///     println!("{}", account.name);
/// }
/// # Ok(())
/// # }
/// ```
///
/// A pre-issued token skips the login entirely:
///
/// ```rust,no_run
/// use argocd_rs::Client;
///
/// let client = Client::new("https://argocd.example.com", "", "", "eyJhbGciOi...", [])?;
/// assert!(client.is_authenticated());
/// # Ok::<(), argocd_rs::ArgoError>(())
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: Url,
    username: String,
    password: String,
    user_agent: Option<String>,
    insecure_skip_verify: Option<bool>,
    timeout: Option<Duration>,
    status_policy: StatusPolicy,
    transport: Arc<dyn Transport>,
    authenticator: Arc<dyn Authenticator>,
    token: TokenCell,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url.as_str())
            .field("username", &self.inner.username)
            .field("authenticated", &self.is_authenticated())
            .field("insecure_skip_verify", &self.inner.insecure_skip_verify)
            .field("status_policy", &self.inner.status_policy)
            .finish()
    }
}

impl Client {
    /// Creates a client. No network I/O happens here.
    ///
    /// # Parameters
    ///
    /// * `base_url` - Absolute server URL, e.g. `https://argocd.example.com`
    /// * `username`, `password` - Login credentials; may be empty when `token` is set
    /// * `token` - Pre-issued session or account token; may be empty
    /// * `options` - Applied in order; the first failing option aborts construction
    ///
    /// # Errors
    ///
    /// - [`ArgoError::InvalidBaseUrl`] if `base_url` is empty, unparsable or not absolute
    /// - Whatever error a failing option returns
    /// - [`ArgoError::HttpClient`] if the default transport cannot be built
    pub fn new<I>(
        base_url: &str,
        username: &str,
        password: &str,
        token: &str,
        options: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = ClientOption>,
    {
        let mut config = ClientConfig::new(normalize_base_url(base_url)?);
        for option in options {
            option.apply(&mut config)?;
        }

        let resolved = config.resolved_insecure_skip_verify();
        let custom = config.transport.take();
        let insecure_skip_verify = if custom.is_some() { None } else { Some(resolved) };
        let transport: Arc<dyn Transport> = match custom {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(resolved)?),
        };
        let authenticator = config
            .authenticator
            .take()
            .unwrap_or_else(|| Arc::new(SessionAuthenticator));

        tracing::debug!(
            base_url = %config.base_url(),
            ?insecure_skip_verify,
            "created Argo CD client"
        );

        let inner = ClientInner {
            user_agent: config.user_agent.take(),
            timeout: config.timeout,
            status_policy: config.status_policy,
            base_url: config.into_base_url(),
            username: username.to_string(),
            password: password.to_string(),
            insecure_skip_verify,
            transport,
            authenticator,
            token: TokenCell::new(token),
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Authenticates if no token is present yet.
    ///
    /// With a token already set this returns immediately without contacting
    /// the server. Otherwise the configured authenticator exchanges the stored
    /// username and password for a token. Concurrent callers share one login.
    ///
    /// # Errors
    ///
    /// - The authenticator's error, unchanged
    /// - [`ArgoError::EmptyToken`] if the login succeeded without a token
    pub async fn init(&self) -> Result<()> {
        if self.is_authenticated() {
            return Ok(());
        }
        let inner = &self.inner;
        inner
            .token
            .get_or_try_init(|| async {
                tracing::debug!(username = %inner.username, "requesting session token");
                let session = inner
                    .authenticator
                    .create_user_jwt(self, &inner.username, &inner.password)
                    .await?;
                Ok(AuthToken::new(session.token))
            })
            .await?;
        Ok(())
    }

    /// Stores a token obtained elsewhere.
    ///
    /// # Errors
    ///
    /// - [`ArgoError::EmptyToken`] if `token` is empty
    /// - [`ArgoError::TokenAlreadySet`] if the client already holds a token
    pub fn set_token(&self, token: &str) -> Result<()> {
        self.inner.token.set(AuthToken::new(token))
    }

    /// Builds an authenticated request for `path`, relative to the base URL.
    ///
    /// The request carries `Accept: application/json`, the configured
    /// `User-Agent`, `Authorization: Bearer <token>` when a token is present,
    /// and `Content-Type: application/json` for `PUT` and `POST`.
    ///
    /// `path` must not start with `/`. Identifiers placed in it must already
    /// be escaped with [`escape_segment`](super::escape_segment); a violation
    /// surfaces as [`ArgoError::InvalidPath`] when the request is sent.
    ///
    /// ```rust
    /// use argocd_rs::{Client, HttpMethod};
    ///
    /// let client = Client::new("https://argocd.example.com", "", "", "abc123", [])?;
    /// let request = client.new_request(HttpMethod::Get, "api/v1/account").build()?;
    /// assert_eq!(request.url, "https://argocd.example.com/api/v1/account");
    /// assert_eq!(request.header("authorization"), Some("Bearer abc123"));
    /// # Ok::<(), argocd_rs::ArgoError>(())
    /// ```
    pub fn new_request(&self, method: HttpMethod, path: &str) -> RequestBuilder {
        self.request(method, path, true)
    }

    /// Builds a request that never carries an `Authorization` header.
    ///
    /// Used by the login endpoint, which must work before a token exists.
    pub fn new_unauthenticated_request(&self, method: HttpMethod, path: &str) -> RequestBuilder {
        self.request(method, path, false)
    }

    fn request(&self, method: HttpMethod, path: &str, authenticated: bool) -> RequestBuilder {
        if path.starts_with('/') {
            return RequestBuilder::new(self.clone(), Err(ArgoError::InvalidPath(path.to_string())));
        }

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(agent) = &self.inner.user_agent {
            headers.push(("User-Agent".to_string(), agent.clone()));
        }
        if authenticated {
            if let Some(token) = self.inner.token.get() {
                headers.push(("Authorization".to_string(), token.bearer()));
            }
        }
        if method.sends_json() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let request = HttpRequest {
            method,
            url: format!("{}{}", self.inner.base_url, path),
            headers,
            query: Vec::new(),
            body: None,
            timeout: self.inner.timeout,
        };
        RequestBuilder::new(self.clone(), Ok(request))
    }

    /// The normalized base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// The username used by [`Client::init`].
    pub fn username(&self) -> &str {
        &self.inner.username
    }

    /// The current token without the `Bearer ` prefix, if any.
    pub fn token(&self) -> Option<&str> {
        self.inner.token.get().map(AuthToken::as_str)
    }

    /// Whether a token is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner.token.get().is_some()
    }

    /// Whether server certificates are accepted without validation.
    ///
    /// `None` when a custom [`transport`](options::transport) was supplied,
    /// since that transport applies its own certificate policy.
    pub fn insecure_skip_verify(&self) -> Option<bool> {
        self.inner.insecure_skip_verify
    }

    /// The configured `User-Agent`, if any.
    pub fn user_agent(&self) -> Option<&str> {
        self.inner.user_agent.as_deref()
    }

    /// How non-200 responses are surfaced.
    pub fn status_policy(&self) -> StatusPolicy {
        self.inner.status_policy
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.inner.transport.as_ref()
    }

    /// Account operations.
    pub fn accounts(&self) -> AccountsService {
        AccountsService::new(self.clone())
    }

    /// Session (login/logout) operations.
    pub fn sessions(&self) -> SessionsService {
        SessionsService::new(self.clone())
    }

    /// Application operations.
    pub fn applications(&self) -> ApplicationsService {
        ApplicationsService::new(self.clone())
    }

    /// Cluster operations.
    pub fn clusters(&self) -> ClustersService {
        ClustersService::new(self.clone())
    }

    /// Project operations.
    pub fn projects(&self) -> ProjectsService {
        ProjectsService::new(self.clone())
    }

    /// Repository operations.
    pub fn repositories(&self) -> RepositoriesService {
        RepositoriesService::new(self.clone())
    }

    /// Repository credential template operations.
    pub fn repo_creds(&self) -> RepoCredsService {
        RepoCredsService::new(self.clone())
    }
}

/// Parses `raw` and guarantees exactly one trailing `/` is present.
fn normalize_base_url(raw: &str) -> Result<Url> {
    let invalid = |reason: &str| ArgoError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid("URL is empty"));
    }
    let mut url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;
    if url.cannot_be_a_base() || !url.has_host() {
        return Err(invalid("URL must be absolute"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("URL must not carry a query or fragment"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::api::options;
    use crate::api::transport::mock::MockTransport;
    use crate::api::v1::sessions::SessionResponse;

    /// Authenticator that records its calls and replays a fixed outcome.
    struct FakeAuthenticator {
        calls: AtomicUsize,
        credentials: Mutex<Vec<(String, String)>>,
        outcome: std::result::Result<String, String>,
    }

    impl FakeAuthenticator {
        fn returning(token: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                credentials: Mutex::new(Vec::new()),
                outcome: Ok(token.to_string()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                credentials: Mutex::new(Vec::new()),
                outcome: Err(message.to_string()),
            })
        }
    }

    #[async_trait]
    impl Authenticator for FakeAuthenticator {
        async fn create_user_jwt(
            &self,
            _client: &Client,
            username: &str,
            password: &str,
        ) -> Result<SessionResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.credentials
                .lock()
                .unwrap()
                .push((username.to_string(), password.to_string()));
            tokio::task::yield_now().await;
            match &self.outcome {
                Ok(token) => Ok(SessionResponse {
                    token: token.clone(),
                }),
                Err(message) => Err(ArgoError::Api {
                    status: 401,
                    code: Some(16),
                    message: message.clone(),
                }),
            }
        }
    }

    fn client_with(token: &str, auth: Arc<FakeAuthenticator>) -> Client {
        Client::new(
            "https://argocd.example.com",
            "admin",
            "secret",
            token,
            [options::authenticator(auth)],
        )
        .unwrap()
    }

    #[test]
    fn test_trailing_slash_added_once() {
        let client = Client::new("https://argocd.example.com", "", "", "", []).unwrap();
        assert_eq!(client.base_url().as_str(), "https://argocd.example.com/");

        let client = Client::new("https://argocd.example.com/", "", "", "", []).unwrap();
        assert_eq!(client.base_url().as_str(), "https://argocd.example.com/");

        let client = Client::new("http://gateway.local/argocd", "", "", "", []).unwrap();
        assert_eq!(client.base_url().as_str(), "http://gateway.local/argocd/");

        let client = Client::new("http://gateway.local/argocd/", "", "", "t", []).unwrap();
        let request = client
            .new_request(HttpMethod::Get, "api/v1/account")
            .build()
            .unwrap();
        assert_eq!(request.url, "http://gateway.local/argocd/api/v1/account");
    }

    #[test]
    fn test_invalid_base_url() {
        for raw in [
            "",
            "   ",
            "not a url",
            "argocd.example.com",
            "mailto:ops@example.com",
            "https://argocd.example.com?x=1",
            "https://argocd.example.com/#top",
        ] {
            let err = Client::new(raw, "", "", "", []).unwrap_err();
            assert!(
                matches!(err, ArgoError::InvalidBaseUrl { .. }),
                "{raw:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_failing_option_aborts_construction() {
        let failing = options::ClientOption::new(|_| Err(ArgoError::InvalidOption("boom".into())));
        let err = Client::new("http://localhost:8080", "", "", "", [failing]).unwrap_err();
        assert_eq!(err.to_string(), "invalid client option: boom");
    }

    #[test]
    fn test_options_applied_in_order() {
        let client = Client::new(
            "http://localhost:8080",
            "",
            "",
            "",
            [options::user_agent("first"), options::user_agent("second")],
        )
        .unwrap();
        assert_eq!(client.user_agent(), Some("second"));
    }

    #[test]
    fn test_https_is_insecure_by_default() {
        let client = Client::new("https://argocd.example.com", "", "", "", []).unwrap();
        assert_eq!(client.insecure_skip_verify(), Some(true));

        let client = Client::new("http://argocd.example.com", "", "", "", []).unwrap();
        assert_eq!(client.insecure_skip_verify(), Some(false));

        let client =
            Client::new("https://argocd.example.com", "", "", "", [options::strict_tls()]).unwrap();
        assert_eq!(client.insecure_skip_verify(), Some(false));
    }

    #[test]
    fn test_custom_transport_has_no_tls_policy() {
        let client = Client::new(
            "https://argocd.example.com",
            "",
            "",
            "",
            [options::transport(Arc::new(MockTransport::new()))],
        )
        .unwrap();
        assert_eq!(client.insecure_skip_verify(), None);
    }

    #[test]
    fn test_headers_for_get() {
        let client = Client::new("https://argocd.example.com", "", "", "abc123", []).unwrap();
        let request = client
            .new_request(HttpMethod::Get, "api/v1/account")
            .build()
            .unwrap();
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(request.header("User-Agent"), Some(crate::USER_AGENT));
        assert_eq!(request.header("Authorization"), Some("Bearer abc123"));
        assert_eq!(request.header("Content-Type"), None);
    }

    #[test]
    fn test_prefix_only_token_sends_no_authorization() {
        let client = Client::new("http://localhost:8080", "", "", "Bearer ", []).unwrap();
        assert!(!client.is_authenticated());
        let request = client
            .new_request(HttpMethod::Get, "api/v1/account")
            .build()
            .unwrap();
        assert_eq!(request.header("Authorization"), None);
    }

    #[test]
    fn test_content_type_only_for_put_and_post() {
        let client = Client::new("http://localhost:8080", "", "", "", []).unwrap();
        for method in [HttpMethod::Put, HttpMethod::Post] {
            let request = client.new_request(method, "api/v1/x").build().unwrap();
            assert_eq!(request.header("content-type"), Some("application/json"));
        }
        for method in [
            HttpMethod::Get,
            HttpMethod::Delete,
            HttpMethod::Head,
            HttpMethod::Patch,
            HttpMethod::Options,
        ] {
            let request = client.new_request(method, "api/v1/x").build().unwrap();
            assert_eq!(request.header("content-type"), None, "{method}");
        }
    }

    #[test]
    fn test_bearer_prefix_applied_once() {
        let client = Client::new("http://localhost:8080", "", "", "abc123", []).unwrap();
        let first = client.new_request(HttpMethod::Get, "api/v1/account").build().unwrap();
        let second = client.new_request(HttpMethod::Get, "api/v1/account").build().unwrap();
        assert_eq!(first.header("authorization"), Some("Bearer abc123"));
        assert_eq!(second.header("authorization"), Some("Bearer abc123"));

        let prefixed = Client::new("http://localhost:8080", "", "", "Bearer abc123", []).unwrap();
        let request = prefixed.new_request(HttpMethod::Get, "api/v1/account").build().unwrap();
        assert_eq!(request.header("authorization"), Some("Bearer abc123"));
        assert_eq!(prefixed.token(), Some("abc123"));
    }

    #[test]
    fn test_no_authorization_without_token() {
        let client = Client::new("http://localhost:8080", "admin", "pw", "", []).unwrap();
        let request = client.new_request(HttpMethod::Get, "api/v1/account").build().unwrap();
        assert_eq!(request.header("authorization"), None);
    }

    #[test]
    fn test_unauthenticated_request_skips_token() {
        let client = Client::new("http://localhost:8080", "", "", "abc123", []).unwrap();
        let request = client
            .new_unauthenticated_request(HttpMethod::Post, "api/v1/session")
            .build()
            .unwrap();
        assert_eq!(request.header("authorization"), None);
        assert_eq!(request.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_leading_slash_rejected() {
        let client = Client::new("http://localhost:8080", "", "", "", []).unwrap();
        let err = client.new_request(HttpMethod::Get, "/api/v1/account").build().unwrap_err();
        assert!(matches!(err, ArgoError::InvalidPath(_)));
    }

    #[test]
    fn test_user_agent_can_be_disabled() {
        let client =
            Client::new("http://localhost:8080", "", "", "", [options::user_agent("")]).unwrap();
        let request = client.new_request(HttpMethod::Get, "api/v1/account").build().unwrap();
        assert_eq!(request.header("user-agent"), None);
    }

    #[test]
    fn test_default_timeout_on_requests() {
        let client = Client::new(
            "http://localhost:8080",
            "",
            "",
            "",
            [options::timeout(Duration::from_secs(7))],
        )
        .unwrap();
        let request = client.new_request(HttpMethod::Get, "api/v1/account").build().unwrap();
        assert_eq!(request.timeout, Some(Duration::from_secs(7)));

        let request = client
            .new_request(HttpMethod::Get, "api/v1/account")
            .timeout(Duration::from_secs(1))
            .build()
            .unwrap();
        assert_eq!(request.timeout, Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_set_token_is_write_once() {
        let client = Client::new("http://localhost:8080", "", "", "", []).unwrap();
        client.set_token("first").unwrap();
        assert!(matches!(
            client.set_token("second"),
            Err(ArgoError::TokenAlreadySet)
        ));
        assert_eq!(client.token(), Some("first"));
    }

    #[test]
    fn test_debug_hides_credentials() {
        let client = Client::new("http://localhost:8080", "admin", "hunter2", "tok", []).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("tok\""));
    }

    #[tokio::test]
    async fn test_init_with_token_skips_authenticator() {
        let auth = FakeAuthenticator::returning("other");
        let client = client_with("preset", auth.clone());
        client.init().await.unwrap();
        assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
        assert_eq!(client.token(), Some("preset"));
    }

    #[tokio::test]
    async fn test_init_authenticates_once() {
        let auth = FakeAuthenticator::returning("abc123");
        let client = client_with("", auth.clone());
        client.init().await.unwrap();
        client.init().await.unwrap();

        assert_eq!(auth.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            auth.credentials.lock().unwrap().as_slice(),
            &[("admin".to_string(), "secret".to_string())]
        );
        assert_eq!(client.token(), Some("abc123"));

        let request = client.new_request(HttpMethod::Get, &v1("account")).build().unwrap();
        assert_eq!(request.url, "https://argocd.example.com/api/v1/account");
        assert_eq!(request.header("authorization"), Some("Bearer abc123"));
    }

    #[tokio::test]
    async fn test_init_empty_token() {
        let auth = FakeAuthenticator::returning("");
        let client = client_with("", auth.clone());
        let err = client.init().await.unwrap_err();
        assert!(matches!(err, ArgoError::EmptyToken));
        assert_eq!(auth.calls.load(Ordering::SeqCst), 1);
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_init_propagates_failure() {
        let auth = FakeAuthenticator::failing("invalid username or password");
        let client = client_with("", auth);
        let err = client.init().await.unwrap_err();
        match err {
            ArgoError::Api { status, message, .. } => {
                assert_eq!(status, 401);
                assert_eq!(message, "invalid username or password");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!client.is_authenticated());
        let request = client.new_request(HttpMethod::Get, &v1("account")).build().unwrap();
        assert_eq!(request.header("authorization"), None);
    }

    #[tokio::test]
    async fn test_concurrent_init_logs_in_once() {
        let auth = FakeAuthenticator::returning("shared");
        let client = client_with("", auth.clone());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move { client.init().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(auth.calls.load(Ordering::SeqCst), 1);
        assert_eq!(client.token(), Some("shared"));
    }

    #[tokio::test]
    async fn test_init_through_session_endpoint() {
        let transport = Arc::new(MockTransport::new().respond(200, r#"{"token":"jwt-from-server"}"#));
        let client = Client::new(
            "https://argocd.example.com",
            "admin",
            "secret",
            "",
            [options::transport(transport.clone())],
        )
        .unwrap();

        client.init().await.unwrap();

        let login = transport.last_request();
        assert_eq!(login.method, HttpMethod::Post);
        assert_eq!(login.url, "https://argocd.example.com/api/v1/session");
        assert_eq!(login.header("authorization"), None);
        let body: serde_json::Value = serde_json::from_str(login.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["username"], "admin");
        assert_eq!(body["password"], "secret");
        assert_eq!(client.token(), Some("jwt-from-server"));
    }

    #[tokio::test]
    async fn test_end_to_end_over_http() {
        let mut server = mockito::Server::new_async().await;
        let login = server
            .mock("POST", "/api/v1/session")
            .match_header("content-type", "application/json")
            .match_header("authorization", mockito::Matcher::Missing)
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "username": "admin",
                "password": "secret"
            })))
            .with_status(200)
            .with_body(r#"{"token":"abc123"}"#)
            .expect(1)
            .create_async()
            .await;
        let accounts = server
            .mock("GET", "/api/v1/account")
            .match_header("authorization", "Bearer abc123")
            .match_header("accept", "application/json")
            .with_status(200)
            .with_body(r#"{"items":[{"name":"admin","enabled":true,"capabilities":["login"]}]}"#)
            .expect(2)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "admin", "secret", "", []).unwrap();
        client.init().await.unwrap();
        let first = client.accounts().list_accounts().await.unwrap();
        let second = client.accounts().list_accounts().await.unwrap();

        login.assert_async().await;
        accounts.assert_async().await;
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.items[0].name, "admin");
        assert_eq!(second.items[0].capabilities, vec!["login".to_string()]);
    }

    #[tokio::test]
    async fn test_end_to_end_login_failure() {
        let mut server = mockito::Server::new_async().await;
        let _login = server
            .mock("POST", "/api/v1/session")
            .with_status(401)
            .with_body(r#"{"error":"Invalid username or password","code":16,"message":"Invalid username or password"}"#)
            .create_async()
            .await;

        let client = Client::new(&server.url(), "admin", "wrong", "", []).unwrap();
        let err = client.init().await.unwrap_err();
        assert!(matches!(err, ArgoError::Api { status: 401, code: Some(16), .. }));
        assert!(client.token().is_none());
    }
}
