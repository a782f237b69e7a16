//! Integration tests for the provider pipeline: interception, decoding,
//! and settlement semantics.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use assert2::let_assert;
use warrant::{
    Authenticator, BearerAuthenticator, BoxError, DecodeReason, Error, HyperClient, Method,
    Provider, Request, Result, Target,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, PartialEq, serde::Deserialize)]
struct User {
    id: u64,
    username: String,
    age: u32,
    weight: u32,
}

const USER_BODY: &str = r#"{"id":20,"username":"test","age":404,"weight":9001}"#;

/// Endpoints used by the tests; the base URL comes from the mock server.
#[derive(Debug, Clone)]
enum UserApi {
    User { base: url::Url, id: u64 },
    Users { base: url::Url },
    Broken,
}

impl Target for UserApi {
    fn try_request(&self) -> Result<Request> {
        match self {
            Self::User { base, id } => {
                let url = base
                    .join(&format!("users/{id}"))
                    .map_err(|e| Error::request_construction(e.to_string()))?;
                Ok(Request::builder(Method::Get, url).build())
            }
            Self::Users { base } => {
                let url = base
                    .join("users")
                    .map_err(|e| Error::request_construction(e.to_string()))?;
                Ok(Request::builder(Method::Get, url).build())
            }
            Self::Broken => Err(Error::request_construction(
                "no resolvable URL for endpoint",
            )),
        }
    }
}

fn base_url(server: &MockServer) -> url::Url {
    url::Url::parse(&format!("{}/", server.uri())).expect("server url")
}

/// Failure the failing authenticator reports; tests downcast to it to check
/// that the error's identity survives the pipeline.
#[derive(Debug)]
struct TokenExpired;

impl std::fmt::Display for TokenExpired {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "token expired")
    }
}

impl std::error::Error for TokenExpired {}

/// Authenticator double that counts invocations and optionally fails.
#[derive(Debug, Clone, Default)]
struct CountingAuthenticator {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl CountingAuthenticator {
    fn failing() -> Self {
        Self {
            calls: Arc::default(),
            fail: true,
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authenticator for CountingAuthenticator {
    async fn authenticate(&self, request: Request) -> std::result::Result<Request, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(Box::new(TokenExpired))
        } else {
            Ok(request)
        }
    }
}

// ============================================================================
// Success Path
// ============================================================================

/// A successful exchange resolves with a value matching the source JSON.
#[tokio::test]
async fn decodes_object_from_success_response() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/20"))
        .and(header("Authorization", "Bearer sekret"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(USER_BODY, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = Provider::with_client(BearerAuthenticator::new("sekret"), HyperClient::new());

    let user: User = provider
        .request_object(
            UserApi::User {
                base: base_url(&server),
                id: 20,
            },
            None,
        )
        .await
        .expect("user");

    assert_eq!(
        user,
        User {
            id: 20,
            username: "test".to_string(),
            age: 404,
            weight: 9001,
        }
    );
}

/// A key path scopes decoding to the value under that top-level key.
#[tokio::test]
async fn decodes_object_at_key_path() {
    let server = MockServer::start().await;

    let body = format!(r#"{{"data":{USER_BODY}}}"#);
    Mock::given(method("GET"))
        .and(path("/users/20"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let provider = Provider::with_client(BearerAuthenticator::new("sekret"), HyperClient::new());

    let user: User = provider
        .request_object(
            UserApi::User {
                base: base_url(&server),
                id: 20,
            },
            Some("data"),
        )
        .await
        .expect("user");

    assert_eq!(user.id, 20);
    assert_eq!(user.username, "test");
}

/// A collection of N objects decodes to N values in source order.
#[tokio::test]
async fn decodes_collection_preserving_order() {
    let server = MockServer::start().await;

    let body = r#"[
        {"id":1,"username":"a","age":1,"weight":1},
        {"id":2,"username":"b","age":2,"weight":2},
        {"id":3,"username":"c","age":3,"weight":3}
    ]"#;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let provider = Provider::with_client(BearerAuthenticator::new("sekret"), HyperClient::new());

    let users: Vec<User> = provider
        .request_collection(
            UserApi::Users {
                base: base_url(&server),
            },
            None,
        )
        .await
        .expect("users");

    let ids: Vec<u64> = users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

// ============================================================================
// Interception Ordering
// ============================================================================

/// An authenticator failure rejects before any transport call is made, and
/// the underlying error's identity is preserved.
#[tokio::test]
async fn auth_failure_rejects_before_transport() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let authenticator = CountingAuthenticator::failing();
    let provider = Provider::with_client(authenticator.clone(), HyperClient::new());

    let err = provider
        .request_object::<_, User>(
            UserApi::User {
                base: base_url(&server),
                id: 20,
            },
            None,
        )
        .await
        .expect_err("should reject");

    assert_eq!(authenticator.call_count(), 1);
    let_assert!(Error::Authentication(source) = err);
    assert!(source.is::<TokenExpired>());
}

/// A request construction failure rejects immediately; the authenticator is
/// never invoked.
#[tokio::test]
async fn construction_failure_skips_authenticator() {
    let authenticator = CountingAuthenticator::default();
    let provider = Provider::with_client(authenticator.clone(), HyperClient::new());

    let err = provider
        .request_object::<_, User>(UserApi::Broken, None)
        .await
        .expect_err("should reject");

    assert_eq!(authenticator.call_count(), 0);
    assert!(matches!(err, Error::RequestConstruction(_)));
}

// ============================================================================
// Response Validation
// ============================================================================

/// A status outside 200-399 rejects even when the body is valid JSON.
#[tokio::test]
async fn status_error_rejects_despite_valid_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/20"))
        .respond_with(ResponseTemplate::new(404).set_body_raw(USER_BODY, "application/json"))
        .mount(&server)
        .await;

    let provider = Provider::with_client(BearerAuthenticator::new("sekret"), HyperClient::new());

    let err = provider
        .request_object::<_, User>(
            UserApi::User {
                base: base_url(&server),
                id: 20,
            },
            None,
        )
        .await
        .expect_err("should reject");

    assert_eq!(err.status(), Some(404));
    // Raw body is kept for inspection
    let body = err.body().expect("body kept");
    assert_eq!(body.as_ref(), USER_BODY.as_bytes());
}

/// A missing key path rejects with a decoding error of the key-path kind.
#[tokio::test]
async fn missing_key_path_rejects() {
    let server = MockServer::start().await;

    let body = format!(r#"{{"user":{USER_BODY}}}"#);
    Mock::given(method("GET"))
        .and(path("/users/20"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/json"))
        .mount(&server)
        .await;

    let provider = Provider::with_client(BearerAuthenticator::new("sekret"), HyperClient::new());

    let err = provider
        .request_object::<_, User>(
            UserApi::User {
                base: base_url(&server),
                id: 20,
            },
            Some("data"),
        )
        .await
        .expect_err("should reject");

    let_assert!(Error::Decoding(DecodeReason::KeyPath(key)) = err);
    assert_eq!(key, "data");
}

// ============================================================================
// Settlement Semantics
// ============================================================================

/// Dropping every provider handle before the future runs settles it with a
/// cancellation error; no request is sent.
#[tokio::test]
async fn dropped_provider_cancels_pending_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let provider = Provider::with_client(BearerAuthenticator::new("sekret"), HyperClient::new());

    let pending = provider.request_object::<_, User>(
        UserApi::User {
            base: base_url(&server),
            id: 20,
        },
        None,
    );
    drop(provider);

    let err = pending.await.expect_err("should cancel");
    assert!(err.is_canceled());
}

/// A transport timeout surfaces unchanged through the future.
#[tokio::test]
async fn timeout_surfaces_as_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/20"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(USER_BODY, "application/json")
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = HyperClient::builder()
        .timeout(Duration::from_millis(50))
        .build();
    let provider = Provider::with_client(BearerAuthenticator::new("sekret"), client);

    let err = provider
        .request_object::<_, User>(
            UserApi::User {
                base: base_url(&server),
                id: 20,
            },
            None,
        )
        .await
        .expect_err("should time out");

    assert!(err.is_timeout());
}
