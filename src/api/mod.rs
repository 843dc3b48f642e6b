//! The movie service's HTTP surface.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/` | [`movies::welcome`] |
//! | GET | `/movies` | [`movies::list`] |
//! | GET | `/movies/{id}` | [`movies::get`] |
//! | POST | `/movies` | [`movies::create`] |
//! | PUT | `/movies/{id}` | [`movies::update`] |
//! | DELETE | `/movies/{id}` | [`movies::delete`] |
//! | GET | `/healthz` | [`health::liveness`] |
//! | GET | `/readyz` | [`health::readiness`] |
//!
//! Every movie route answers `200 OK`, including when the id is unknown;
//! clients tell the cases apart by the JSON body.

pub mod health;
pub mod movies;

use crate::router::Router;
use crate::store::SharedStore;

/// Builds the full routing table over `store`.
pub fn routes(store: SharedStore) -> Router<SharedStore> {
    Router::with_state(store)
        .get("/", movies::welcome)
        .get("/movies", movies::list)
        .get("/movies/{id}", movies::get)
        .post("/movies", movies::create)
        .put("/movies/{id}", movies::update)
        .delete("/movies/{id}", movies::delete)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness)
}
