use std::sync::Arc;

use consultdesk::app::{App, Bootstrap};
use consultdesk::service::HttpPortalClient;
use consultdesk::storage::settings::load_settings;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let portal = match HttpPortalClient::new(&settings) {
        Ok(portal) => portal,
        Err(e) => {
            tracing::error!("Invalid portal address '{}': {}", settings.base_url, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting ConsultDesk against {}", settings.base_url);

    dioxus::LaunchBuilder::desktop()
        .with_context(Bootstrap {
            portal: Arc::new(portal),
            settings,
        })
        .launch(App);
}
