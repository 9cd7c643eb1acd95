use std::sync::Arc;

use crate::auth::AuthService;
use crate::db::Database;
use crate::transfer::TransferService;

/// Shared application state, built once at startup and handed to every
/// handler through axum's `State` extractor.
pub struct AppState {
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
    pub transfers: Arc<TransferService>,
}

impl AppState {
    pub fn new(db: Arc<Database>, jwt_secret: String) -> Self {
        let auth = Arc::new(AuthService::new(db.pool().clone(), jwt_secret));
        let transfers = Arc::new(TransferService::new(db.pool().clone()));
        Self {
            db,
            auth,
            transfers,
        }
    }
}
