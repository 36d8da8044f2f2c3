//! Application state and startup wiring.

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use finbook_core::sync::{SyncRegistry, SyncService, SyncServiceTrait};
use finbook_storage_sqlite::{
    account_descriptions::AccountDescriptionSyncRepository, account_types::AccountTypeSyncRepository,
    accounts::AccountSyncRepository, banks::BankSyncRepository, db,
    payment_methods::PaymentMethodSyncRepository, payments::PaymentSyncRepository,
};

use crate::auth::AuthManager;
use crate::config::Config;

pub struct AppState {
    pub sync_service: Arc<dyn SyncServiceTrait>,
    pub auth: Arc<AuthManager>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("FINBOOK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(pool.clone());

    let registry = Arc::new(SyncRegistry {
        account_types: Arc::new(AccountTypeSyncRepository::new(pool.clone(), writer.clone())),
        account_descriptions: Arc::new(AccountDescriptionSyncRepository::new(
            pool.clone(),
            writer.clone(),
        )),
        accounts: Arc::new(AccountSyncRepository::new(pool.clone(), writer.clone())),
        payment_methods: Arc::new(PaymentMethodSyncRepository::new(
            pool.clone(),
            writer.clone(),
        )),
        banks: Arc::new(BankSyncRepository::new(pool.clone(), writer.clone())),
        payments: Arc::new(PaymentSyncRepository::new(pool.clone(), writer.clone())),
    });

    let sync_service: Arc<dyn SyncServiceTrait> = Arc::new(SyncService::new(registry));
    let auth = Arc::new(AuthManager::new(&config.auth_secret)?);

    Ok(Arc::new(AppState {
        sync_service,
        auth,
        db_path,
    }))
}
