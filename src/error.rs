//! Unified error type.

use std::fmt;
use std::net::AddrParseError;

/// The error type returned by the service's fallible operations.
///
/// A missing movie is not an `Error`: handlers express it as a JSON
/// [`Response`](crate::Response) body. This type only surfaces startup and
/// infrastructure failures: a bad listen address or a socket that will not
/// bind.
#[derive(Debug)]
pub enum Error {
    /// The configured listen address could not be parsed.
    Config { value: String, source: AddrParseError },
    Io(std::io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config { value, source } => {
                write!(f, "config: invalid listen address `{value}`: {source}")
            }
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config { source, .. } => Some(source),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
