use std::path::Path;

use catalog_app::{router, AppState, Settings};
use catalog_core::{init_tracing, serve, LogConfig};
use catalog_data::DocumentStore;

#[tokio::main]
async fn main() {
    let settings = match Settings::load(Path::new("."), "dev") {
        Ok(settings) => settings,
        Err(err) => {
            init_tracing(&LogConfig::default().filter);
            tracing::error!(%err, "invalid configuration");
            std::process::exit(1);
        }
    };
    init_tracing(&settings.log.filter);
    tracing::info!(profile = %settings.profile, "starting local library");

    let store = DocumentStore::new();
    let app = router(AppState::new(store.clone()));

    if let Err(err) = serve(app, &settings.server.bind_address()).await {
        tracing::error!(%err, "server error");
    }
    store.close();
}
