use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use digilogic::engine::Engine;
use digilogic::settings::{Settings, SETTINGS_FILE};
use digilogic::workbench::Workbench;
use digilogic::{server, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;

    // RUST_LOG takes precedence over the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    info!(?settings, "settings loaded");

    let workbench = Arc::new(Workbench::new(settings));

    if let Some(path) = workbench.settings().startup_script.clone() {
        match std::fs::read_to_string(&path) {
            Ok(script) => {
                info!(path = %path.display(), "running startup script");
                Engine::new(&workbench).execute(&script);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "could not read startup script"),
        }
    }

    let address = workbench.settings().listen_address.clone();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "listening");
    axum::serve(listener, server::router(workbench)).await?;
    Ok(())
}
