//! Authenticated request provider.
//!
//! [`Provider`] ties the pipeline together: a [`Target`] is rendered into a
//! request, the [`Authenticator`] produces its authenticated replacement,
//! the transport executes it, and the response is decoded into a typed
//! value. Each request method returns a future that settles exactly once.

use std::future::Future;
use std::sync::{Arc, Weak};

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::client::HyperClient;
use crate::{Authenticator, Error, HttpClient, Response, Result, Target};

/// Authenticated request provider with typed JSON responses.
///
/// The provider owns one authenticator and one transport client, shared by
/// every request it issues. Cloning is cheap (the state is reference
/// counted) and clones issue requests against the same shared state.
///
/// # Example
///
/// ```ignore
/// use warrant::{BearerAuthenticator, Provider};
///
/// let provider = Provider::new(BearerAuthenticator::new("my-secret-token"));
/// let user: User = provider.request_object(UserApi::GetUser { id: 42 }, None).await?;
/// let users: Vec<User> = provider.request_collection(UserApi::ListUsers, Some("data")).await?;
/// ```
#[derive(Debug)]
pub struct Provider<A, C = HyperClient> {
    inner: Arc<ProviderInner<A, C>>,
}

impl<A, C> Clone for Provider<A, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[derive(Debug)]
struct ProviderInner<A, C> {
    authenticator: A,
    client: C,
}

impl<A: Authenticator> Provider<A, HyperClient> {
    /// Create a provider over the default transport.
    ///
    /// The default transport is a [`HyperClient`] with request/response
    /// logging enabled.
    #[must_use]
    pub fn new(authenticator: A) -> Self {
        Self::with_client(authenticator, HyperClient::builder().with_logging().build())
    }
}

impl<A, C> Provider<A, C>
where
    A: Authenticator,
    C: HttpClient + 'static,
{
    /// Create a provider over a custom transport client.
    #[must_use]
    pub fn with_client(authenticator: A, client: C) -> Self {
        Self {
            inner: Arc::new(ProviderInner {
                authenticator,
                client,
            }),
        }
    }

    /// The authenticator shared by all requests of this provider.
    #[must_use]
    pub fn authenticator(&self) -> &A {
        &self.inner.authenticator
    }

    /// The transport client shared by all requests of this provider.
    #[must_use]
    pub fn client(&self) -> &C {
        &self.inner.client
    }

    /// Issue the request described by `target` and decode the response body
    /// into a single value of type `T`, optionally scoped to the top-level
    /// `key_path` of the response object.
    ///
    /// Issues exactly one underlying request; the returned future settles
    /// exactly once. The future holds only a weak reference to the provider
    /// state: if every provider handle is dropped before the future runs,
    /// it settles with [`Error::Canceled`] instead of hanging.
    pub fn request_object<Tg, T>(
        &self,
        target: Tg,
        key_path: Option<&str>,
    ) -> impl Future<Output = Result<T>> + Send + use<A, C, Tg, T>
    where
        Tg: Target + Send + Sync + 'static,
        T: DeserializeOwned,
    {
        let inner = Arc::downgrade(&self.inner);
        let key_path = key_path.map(str::to_owned);
        async move {
            let response = run(&inner, &target).await?;
            response.object(key_path.as_deref())
        }
    }

    /// Issue the request described by `target` and decode the response body
    /// into a sequence of values of type `T`, optionally scoped to the
    /// top-level `key_path` of the response object.
    ///
    /// Same settlement contract as [`Provider::request_object`]; element
    /// order is preserved from the source array.
    pub fn request_collection<Tg, T>(
        &self,
        target: Tg,
        key_path: Option<&str>,
    ) -> impl Future<Output = Result<Vec<T>>> + Send + use<A, C, Tg, T>
    where
        Tg: Target + Send + Sync + 'static,
        T: DeserializeOwned,
    {
        let inner = Arc::downgrade(&self.inner);
        let key_path = key_path.map(str::to_owned);
        async move {
            let response = run(&inner, &target).await?;
            response.collection(key_path.as_deref())
        }
    }
}

/// Upgrade the weak provider handle and run the send pipeline.
///
/// The upgrade happens when the future first runs, not when it is created;
/// a provider dropped in between cancels the request. Once upgraded, the
/// in-flight request keeps the provider state alive until settlement.
async fn run<A, C>(
    inner: &Weak<ProviderInner<A, C>>,
    target: &(impl Target + Send),
) -> Result<Response<Bytes>>
where
    A: Authenticator,
    C: HttpClient,
{
    let Some(inner) = inner.upgrade() else {
        return Err(Error::Canceled);
    };
    inner.send(target).await
}

impl<A, C> ProviderInner<A, C>
where
    A: Authenticator,
    C: HttpClient,
{
    /// The interception pipeline: construct, authenticate, execute.
    ///
    /// A construction failure surfaces before the authenticator is
    /// consulted; an authentication failure surfaces before the transport
    /// is invoked.
    async fn send(&self, target: &(impl Target + Send)) -> Result<Response<Bytes>> {
        let request = target.try_request()?;
        let request = self
            .authenticator
            .authenticate(request)
            .await
            .map_err(Error::Authentication)?;
        self.client.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::{BearerAuthenticator, Method, Request};

    /// Transport double that echoes a canned body.
    #[derive(Debug, Clone)]
    struct CannedClient {
        body: &'static str,
    }

    impl HttpClient for CannedClient {
        async fn execute(&self, _request: Request<Bytes>) -> Result<Response<Bytes>> {
            Ok(Response::new(200, HashMap::new(), Bytes::from(self.body)))
        }
    }

    struct Ping;

    impl Target for Ping {
        fn try_request(&self) -> Result<Request<Bytes>> {
            let url = url::Url::parse("https://api.example.com/ping").expect("valid URL");
            Ok(Request::builder(Method::Get, url).build())
        }
    }

    #[derive(Debug, PartialEq, serde::Deserialize)]
    struct Pong {
        ok: bool,
    }

    #[tokio::test]
    async fn provider_resolves_decoded_object() {
        let provider = Provider::with_client(
            BearerAuthenticator::new("sekret"),
            CannedClient { body: r#"{"ok":true}"# },
        );

        let pong: Pong = provider.request_object(Ping, None).await.expect("pong");
        assert!(pong.ok);
    }

    #[tokio::test]
    async fn dropped_provider_cancels_pending_future() {
        let provider = Provider::with_client(
            BearerAuthenticator::new("sekret"),
            CannedClient { body: r#"{"ok":true}"# },
        );

        let pending = provider.request_object::<_, Pong>(Ping, None);
        drop(provider);

        let err = pending.await.expect_err("should cancel");
        assert!(err.is_canceled());
    }

    #[tokio::test]
    async fn clone_keeps_state_alive() {
        let provider = Provider::with_client(
            BearerAuthenticator::new("sekret"),
            CannedClient { body: r#"{"ok":true}"# },
        );
        let clone = provider.clone();

        let pending = provider.request_object::<_, Pong>(Ping, None);
        drop(provider);

        // A surviving clone must keep the request alive
        let pong = pending.await.expect("pong");
        assert!(pong.ok);
        drop(clone);
    }
}
