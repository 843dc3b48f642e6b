//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler, and the handler gets a clone of the router's state.
//!
//! Requests that match nothing get the same answers the movie service has
//! always given:
//!
//! - no route for the path under any method → `404` with the text body
//!   `404 page not found\n`;
//! - a route for the path exists, but under another method → `405`, no body.
//!
//! Paths are percent-decoded before matching, so `/movies/a%20b` reaches the
//! record whose id is `a b`. An encoded slash decodes to a real one and no
//! longer fits inside a single `{id}` segment.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http::{Method, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use matchit::Router as MatchitRouter;
use tracing::{Instrument, debug, info, info_span};

use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Build it once at startup with [`Router::with_state`], register routes,
/// then pass it to [`Server::serve`](crate::Server::serve). Every
/// registration returns `self` so calls chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
}

/// Outcome of matching a method + path against the routing table.
pub(crate) enum Lookup<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    MethodNotAllowed,
    NotFound,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// An empty router whose handlers all receive clones of `state`.
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are fixed at startup, so this is a
    /// programming error.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler<S>) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    pub(crate) fn lookup(&self, method: &Method, path: &str) -> Lookup<S> {
        if let Some(matched) = self.routes.get(method).and_then(|tree| tree.at(path).ok()) {
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Lookup::Found(Arc::clone(matched.value), params);
        }

        let elsewhere = self.routes.iter()
            .any(|(m, tree)| m != method && tree.at(path).is_ok());
        if elsewhere { Lookup::MethodNotAllowed } else { Lookup::NotFound }
    }

    /// Routes one request and produces one response.
    ///
    /// This is the server's hot path, and also the entry point tests use to
    /// drive the whole service without a socket. Never fails: an unreadable
    /// body is treated as empty.
    pub async fn handle<B>(&self, req: http::Request<B>) -> http::Response<Full<Bytes>>
    where
        B: Body,
        B::Error: Display,
    {
        let (parts, body) = req.into_parts();
        let method = parts.method;
        let path = decoded_path(parts.uri.path());

        let span = info_span!("request", %method, %path);
        async move {
            let started = Instant::now();

            let response = match self.lookup(&method, &path) {
                Lookup::Found(handler, params) => {
                    let body = match body.collect().await {
                        Ok(collected) => collected.to_bytes(),
                        Err(e) => {
                            debug!("failed to read request body: {e}");
                            Bytes::new()
                        }
                    };
                    let req = Request::new(body, params);
                    handler.call(req, self.state.clone()).await
                }
                Lookup::MethodNotAllowed => Response::status(StatusCode::METHOD_NOT_ALLOWED),
                Lookup::NotFound => Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .header("x-content-type-options", "nosniff")
                    .text("404 page not found\n"),
            };

            info!(
                status = response.status_code().as_u16(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "request handled",
            );
            response.into_inner()
        }
        .instrument(span)
        .await
    }
}

/// Percent-decodes a request path. Invalid UTF-8 is replaced, not rejected.
fn decoded_path(raw: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned()
}
