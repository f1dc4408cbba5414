//! CORS response middleware
//!
//! [`Cors`] wraps any hyper service and stamps
//! `Access-Control-Allow-Origin: *` onto every response it produces,
//! success or error, before hyper serializes the headers.

use hyper::header::{HeaderMap, HeaderValue, ACCESS_CONTROL_ALLOW_ORIGIN};
use hyper::service::Service;
use hyper::Response;
use std::future::Future;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

/// Service wrapper that allows every origin
#[derive(Debug, Clone, Copy)]
pub struct Cors<S> {
    inner: S,
}

impl<S> Cors<S> {
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S, Req, B> Service<Req> for Cors<S>
where
    S: Service<Req, Response = Response<B>>,
{
    type Response = Response<B>;
    type Error = S::Error;
    type Future = CorsFuture<S::Future>;

    fn call(&self, req: Req) -> Self::Future {
        CorsFuture {
            inner: Box::pin(self.inner.call(req)),
        }
    }
}

/// Response future of [`Cors`]
pub struct CorsFuture<F> {
    inner: Pin<Box<F>>,
}

impl<F, B, E> Future for CorsFuture<F>
where
    F: Future<Output = Result<Response<B>, E>>,
{
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut response = ready!(self.inner.as_mut().poll(cx))?;
        allow_any_origin(response.headers_mut());
        Poll::Ready(Ok(response))
    }
}

/// Append the wildcard CORS header
pub fn allow_any_origin(headers: &mut HeaderMap) {
    headers.append(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
}
