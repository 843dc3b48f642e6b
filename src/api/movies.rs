//! Movie CRUD handlers.
//!
//! Each handler is a thin adapter: read the `id` path parameter, call the
//! [`Store`](crate::store::Store), and wrap the result in one of the fixed
//! response shapes. Request bodies are decoded leniently, so a malformed body
//! acts like an empty movie rather than producing an error.

use serde::Serialize;
use tracing::info;

use crate::model::Movie;
use crate::request::Request;
use crate::response::Json;
use crate::store::SharedStore;

pub const WELCOME: &str = "Welcome to the movies server! Please use Postman to test the server.";

const INVALID_ID: &str = "Invalid Id";
const CREATED: &str = "Movie created";
const UPDATED: &str = "Movie updated";
const DELETED: &str = "Movie deleted";

/// Every JSON shape a movie route can answer with.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// The bare record, from a by-id lookup.
    Movie(Movie),
    /// `{"message":"…","movie":{…}}`
    Confirmed { message: &'static str, movie: Movie },
    /// `{"message":"…"}`
    Message { message: &'static str },
}

impl Reply {
    fn invalid_id() -> Self {
        Self::Message { message: INVALID_ID }
    }

    /// Confirmation on a hit, `Invalid Id` on a miss.
    fn confirm(message: &'static str, movie: Option<Movie>) -> Json<Self> {
        Json(match movie {
            Some(movie) => Self::Confirmed { message, movie },
            None => Self::invalid_id(),
        })
    }
}

fn id(req: &Request) -> &str {
    req.param("id").unwrap_or_default()
}

// GET /
pub async fn welcome(_req: Request, _store: SharedStore) -> &'static str {
    WELCOME
}

// GET /movies
pub async fn list(_req: Request, store: SharedStore) -> Json<Vec<Movie>> {
    let movies = store.list();
    info!(count = movies.len(), "fetching movies");
    Json(movies)
}

// GET /movies/{id}
//
// A hit returns the bare movie, not an envelope.
pub async fn get(req: Request, store: SharedStore) -> Json<Reply> {
    Json(store.get(id(&req)).map_or_else(Reply::invalid_id, Reply::Movie))
}

// POST /movies
pub async fn create(req: Request, store: SharedStore) -> Json<Reply> {
    let movie = store.create(req.json_or_default());
    info!(id = %movie.id, "movie created");
    Json(Reply::Confirmed { message: CREATED, movie })
}

// PUT /movies/{id}
//
// Echoes the decoded patch, not the stored record.
pub async fn update(req: Request, store: SharedStore) -> Json<Reply> {
    let patch: Movie = req.json_or_default();
    Reply::confirm(UPDATED, store.update(id(&req), patch))
}

// DELETE /movies/{id}
pub async fn delete(req: Request, store: SharedStore) -> Json<Reply> {
    Reply::confirm(DELETED, store.delete(id(&req)))
}
