use std::sync::Arc;

use movies::{Config, MemoryStore, Server, api, logging};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), movies::Error> {
    logging::init();

    let config = Config::from_env().inspect_err(|e| error!("{e}"))?;
    let app = api::routes(Arc::new(MemoryStore::seeded()));

    Server::bind(config.addr)
        .serve(app)
        .await
        .inspect_err(|e| error!("server failed: {e}"))
}
