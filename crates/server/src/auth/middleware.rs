use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use serde_json::Value;
use tower::{Layer, Service};

use medway_core::Caller;
use medway_store::DocumentStore;

use super::rehydrate;
use super::token::TokenCodec;

/// A fully-attached identity: the resolved caller plus its stored record.
#[derive(Debug, Clone)]
pub struct Identity {
    pub caller: Caller,
    /// The backing document, as stored (credentials included; the API
    /// layer sanitizes before returning it to a client).
    pub record: Value,
}

/// The per-request identity extension. Always present once the
/// [`IdentityLayer`] has run; `None` means the request is anonymous.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity(pub Option<Identity>);

impl RequestIdentity {
    /// The resolved caller, if any.
    pub fn caller(&self) -> Option<&Caller> {
        self.0.as_ref().map(|identity| &identity.caller)
    }
}

/// Tower layer that attaches the request identity.
#[derive(Clone)]
pub struct IdentityLayer {
    codec: Arc<TokenCodec>,
    store: Arc<dyn DocumentStore>,
}

impl IdentityLayer {
    pub fn new(codec: Arc<TokenCodec>, store: Arc<dyn DocumentStore>) -> Self {
        Self { codec, store }
    }
}

impl<S> Layer<S> for IdentityLayer {
    type Service = IdentityMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        IdentityMiddleware {
            inner,
            codec: Arc::clone(&self.codec),
            store: Arc::clone(&self.store),
        }
    }
}

/// Tower service that resolves and rehydrates the caller.
///
/// Requests are never rejected here; authorization is the policy layer's
/// decision. An identity attached by an upstream layer is preferred over
/// re-deriving one from cookies, so internally-invoked requests that
/// already carry a verified identity behave exactly like external ones.
#[derive(Clone)]
pub struct IdentityMiddleware<S> {
    inner: S,
    codec: Arc<TokenCodec>,
    store: Arc<dyn DocumentStore>,
}

impl<S> Service<Request<Body>> for IdentityMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let codec = Arc::clone(&self.codec);
        let store = Arc::clone(&self.store);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            if req.extensions().get::<RequestIdentity>().is_none() {
                let identity = rehydrate::rehydrate(req.headers(), &codec, &store).await;
                req.extensions_mut().insert(identity);
            }
            inner.call(req).await
        })
    }
}
