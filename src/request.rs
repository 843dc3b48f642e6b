//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::codec;

/// An incoming HTTP request: its buffered body and the matched path parameters.
pub struct Request {
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(body: Bytes, params: HashMap<String, String>) -> Self {
        Self { body, params }
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/movies/{id}`, `req.param("id")` on `/movies/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Decodes the body as JSON, falling back to `T::default()`.
    ///
    /// Never fails: an empty, truncated or mistyped body yields the zero
    /// value. See [`codec::decode_or_default`].
    pub fn json_or_default<T: DeserializeOwned + Default>(&self) -> T {
        codec::decode_or_default(&self.body)
    }
}
