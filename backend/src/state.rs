//! Application state management
//!
//! Shared state passed to every handler via Axum's state extraction. All
//! fields are behind `Arc` (or are already cheap to clone) and read-only
//! once the server starts.

use crate::config::AppConfig;
use crate::repositories::FitnessStore;
use crate::services::NutritionClient;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Storage behind the repository traits
    pub store: Arc<dyn FitnessStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Nutrition database client, absent when no API key is configured
    pub nutrition: Option<NutritionClient>,
    /// Prometheus render handle, absent when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn FitnessStore>,
        config: AppConfig,
        nutrition: Option<NutritionClient>,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            store,
            config: Arc::new(config),
            nutrition,
            metrics,
        }
    }

    /// Get a reference to the store
    #[inline]
    pub fn store(&self) -> &dyn FitnessStore {
        self.store.as_ref()
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn nutrition(&self) -> Option<&NutritionClient> {
        self.nutrition.as_ref()
    }
}
