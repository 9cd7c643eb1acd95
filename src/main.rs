//! Custodia entry point
//!
//! Startup order matters: configuration and secrets are resolved first and
//! any missing value aborts the process, then the store is opened, the
//! schema verified, the admin user provisioned, and only then does the
//! gateway start accepting requests.

use std::sync::Arc;

use custodia::account::ensure_admin;
use custodia::config::{AppConfig, Secrets};
use custodia::db::Database;
use custodia::gateway;
use custodia::gateway::state::AppState;
use custodia::logging::init_logging;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let config = AppConfig::load(&env)?;
    let secrets = Secrets::from_env()?;

    let _guard = init_logging(&config);
    tracing::info!(env = %env, "Starting custodia");

    let db = Arc::new(Database::connect(&secrets.database_url, &config.database).await?);
    db.init_schema().await?;

    ensure_admin(db.pool(), &secrets).await?;

    let state = Arc::new(AppState::new(db.clone(), secrets.jwt_secret.clone()));

    let result = gateway::serve(state, &config.gateway.host, config.gateway.port).await;

    db.close().await;
    result
}
