//! Type-erased request handlers.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::extract::Request;
use axum::response::{IntoResponse, Response};

use crate::routing::{NamedHandler, Params};

/// Boxed future returned by handlers.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

type HandlerFn = dyn Fn(Request, Params) -> BoxFuture<Response> + Send + Sync;

/// A named async function from `(Request, Params)` to a response.
///
/// Cheap to clone. The name doubles as the default endpoint.
#[derive(Clone)]
pub struct Handler {
    name: Arc<str>,
    func: Arc<HandlerFn>,
}

impl Handler {
    pub fn new<F, Fut, R>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(Request, Params) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse,
    {
        let func: Arc<HandlerFn> = Arc::new(move |request: Request, params: Params| {
            let fut = f(request, params);
            Box::pin(async move { fut.await.into_response() }) as BoxFuture<Response>
        });
        Self {
            name: Arc::from(name.into()),
            func,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the handler.
    pub async fn call(&self, request: Request, params: Params) -> Response {
        (self.func)(request, params).await
    }
}

impl NamedHandler for Handler {
    fn handler_name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler").field("name", &self.name).finish()
    }
}

/// Shorthand for [`Handler::new`].
pub fn handler<F, Fut, R>(name: impl Into<String>, f: F) -> Handler
where
    F: Fn(Request, Params) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    Handler::new(name, f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_call_converts_response() {
        let h = handler("user", |_req, params: Params| async move {
            format!("User {}", params.get_int("id").unwrap_or_default())
        });
        assert_eq!(h.name(), "user");
        assert_eq!(h.handler_name(), "user");

        let request = Request::new(Body::empty());
        let response = h.call(request, Params::new().with("id", 7)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"User 7");
    }

    #[tokio::test]
    async fn test_status_tuples() {
        let h = handler("created", |_req, _params| async { (StatusCode::CREATED, "ok") });
        let response = h.call(Request::new(Body::empty()), Params::new()).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
