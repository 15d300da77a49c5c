use std::sync::Arc;

use crate::auth::jwt::TokenIssuer;
use crate::domain::repositories::Store;
use crate::infrastructure::metrics::PrometheusMetrics;
use crate::services::{
    AuthOperations, AuthService, ProductOperations, ProductService, PvzOperations, PvzService,
    ReceptionOperations, ReceptionService, ServiceConfig,
};

/// Shared state handed to every handler
///
/// Handlers only see the service traits, never the store.
#[derive(Clone)]
pub struct AppState {
    pub pvz: Arc<dyn PvzOperations>,
    pub receptions: Arc<dyn ReceptionOperations>,
    pub products: Arc<dyn ProductOperations>,
    pub auth: Arc<dyn AuthOperations>,
    pub tokens: Arc<TokenIssuer>,
    pub metrics: Arc<PrometheusMetrics>,
}

impl AppState {
    /// Wires every service to the same store
    pub fn new<S: Store>(
        store: Arc<S>,
        tokens: Arc<TokenIssuer>,
        metrics: Arc<PrometheusMetrics>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            pvz: Arc::new(PvzService::new(store.clone(), config)),
            receptions: Arc::new(ReceptionService::new(store.clone(), config)),
            products: Arc::new(ProductService::new(store.clone(), config)),
            auth: Arc::new(AuthService::new(store, tokens.clone(), config)),
            tokens,
            metrics,
        }
    }
}
