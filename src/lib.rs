//! # movies
//!
//! A small HTTP service holding a catalogue of movies in process memory.
//! Create, list, fetch, update and delete records by id; nothing is
//! persisted, and the catalogue starts over with two seed movies on every
//! restart.
//!
//! ## Layout
//!
//! - [`store`]: the ordered, lock-guarded record store and its CRUD contract
//! - [`api`]: the route table and the handlers behind it
//! - [`Router`], [`Server`], [`Request`], [`Response`]: the thin HTTP layer
//!   underneath, built on hyper with radix-tree routing via [`matchit`]
//! - [`codec`]: lenient JSON decoding and byte-stable JSON encoding
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use movies::{Config, MemoryStore, Server, api};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), movies::Error> {
//!     let config = Config::from_env()?;
//!     let app = api::routes(Arc::new(MemoryStore::seeded()));
//!     Server::bind(config.addr).serve(app).await
//! }
//! ```

mod config;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod api;
pub mod codec;
pub mod logging;
pub mod model;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use model::{Director, Movie};
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use store::{MemoryStore, SharedStore, Store};
