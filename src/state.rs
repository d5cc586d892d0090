use std::sync::Arc;

use unidad_config::CorsConfig;
use unidad_db::Store;

/// Shared handler state. Cloning is cheap: the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: impl Store + 'static, cors_config: CorsConfig) -> Self {
        Self {
            store: Arc::new(store),
            cors_config,
        }
    }
}
