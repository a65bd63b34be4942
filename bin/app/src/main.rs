use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use zipfit_app::{
    app::{App, RouterCapability, StateCapability},
    config::AppConfig,
    document::HostDocument,
    routes,
};
use zipfit_state::StateRegistry;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("failed to load configuration");
    tracing::info!(base_path = %config.base_path, mount = %config.mount_id, "Loaded configuration");

    // The host page: one mount element plus the shared document title.
    let document = Arc::new(HostDocument::new().with_element(&config.mount_id));

    let state = Arc::new(StateRegistry::new());
    let router = routes::build_router(&config, document.title().clone(), state.clone())
        .expect("failed to build route table");

    // Explicit capability order: state store first, then the router.
    let mut app = App::compose(
        document.clone(),
        vec![
            Box::new(StateCapability::new(state)),
            Box::new(RouterCapability::new(router.clone())),
        ],
    )
    .expect("failed to install capabilities");

    app.mount(&config.mount_id).expect("mount target missing");

    // Visit the paths given on the command line, or walk the three views.
    let mut paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        paths = vec!["/".to_string(), "/ai".to_string(), "/list".to_string()];
    }

    for path in &paths {
        match router.navigate(path).await {
            Ok(outcome) => {
                tracing::info!(
                    route = %outcome.route.name,
                    title = %document.title().get(),
                    "navigated"
                );
                println!("{}", outcome.view.render());
            }
            Err(err) => {
                tracing::error!(path = %path, error = %err, "navigation failed");
            }
        }
    }
}
