use std::net::SocketAddr;
use std::sync::Arc;

use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};

use finbook_server::api::app_router;
use finbook_server::config::Config;
use finbook_server::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();
    init_tracing();
    let state = build_state(&config).await?;

    // Sync traffic is bursty when a device comes back online; allow a
    // burst but keep the sustained rate modest per client address.
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(30)
            .finish()
            .expect("static rate-limit configuration is valid"),
    );
    let router = app_router(state).layer(GovernorLayer::new(governor_config));

    tracing::info!("Listening on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
