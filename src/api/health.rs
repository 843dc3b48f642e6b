//! Health-check handlers.
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can it serve traffic? Failure → pulled from the load balancer. |

use serde::Serialize;

use crate::request::Request;
use crate::response::Json;
use crate::store::SharedStore;

#[derive(Debug, Serialize)]
pub struct Readiness {
    pub status: &'static str,
    pub movies: usize,
}

/// Always `200 OK` with body `"ok"`. If the process answers HTTP at all, it
/// is alive.
pub async fn liveness(_req: Request, _store: SharedStore) -> &'static str {
    "ok"
}

/// `200 OK` with the number of movies currently held. Answering at all
/// proves the store lock can be taken.
pub async fn readiness(_req: Request, store: SharedStore) -> Json<Readiness> {
    Json(Readiness { status: "ready", movies: store.count() })
}
