//! Runtime configuration.
//!
//! The service has a single knob: where to listen. It defaults to
//! `0.0.0.0:8080` and can be moved with the `MOVIES_ADDR` environment
//! variable. Log verbosity is controlled separately through `RUST_LOG`.

use std::net::SocketAddr;

use crate::error::Error;

/// Environment variable holding the listen address.
pub const ADDR_VAR: &str = "MOVIES_ADDR";

/// Listen address used when `MOVIES_ADDR` is unset.
pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// An unset or blank variable falls back to [`DEFAULT_ADDR`]; anything
    /// else must parse as `host:port`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let value = lookup(ADDR_VAR)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_ADDR.to_owned());

        match value.parse() {
            Ok(addr) => Ok(Self { addr }),
            Err(source) => Err(Error::Config { value, source }),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { addr: SocketAddr::from(([0, 0, 0, 0], 8080)) }
    }
}
