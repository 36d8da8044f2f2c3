//! Runtime configuration sourced from the environment.

/// Server configuration.
///
/// `FINBOOK_AUTH_SECRET` has no default on purpose: the server refuses
/// to start without a verification key (see `AuthManager::new`).
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub db_path: String,
    pub auth_secret: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("FINBOOK_LISTEN_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:8420".to_string()),
            db_path: std::env::var("FINBOOK_DB_PATH")
                .unwrap_or_else(|_| "finbook.db".to_string()),
            auth_secret: std::env::var("FINBOOK_AUTH_SECRET").unwrap_or_default(),
        }
    }
}
