//! Health check types for AppContext components

use serde::{Deserialize, Serialize};

/// Fraction of healthy components required for the whole app to count as healthy.
const HEALTHY_THRESHOLD: f64 = 0.8;

/// Overall health status of the application
///
/// # Example
/// ```no_run
/// use flashback_lib::utils::health::{ComponentHealth, HealthStatus};
///
/// let mut status = HealthStatus::new()
///     .add_component(ComponentHealth::healthy("database"))
///     .add_component(ComponentHealth::unhealthy("study_service", "not constructed"));
/// status.calculate_score();
///
/// assert_eq!(status.score, 0.5);
/// assert!(!status.is_healthy);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// Healthy components over total components, from 0.0 to 1.0
    pub score: f64,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp when the check ran
    pub timestamp: i64,
}

impl HealthStatus {
    /// Healthy with score 1.0 and no components
    pub fn new() -> Self {
        Self {
            is_healthy: true,
            score: 1.0,
            components: Vec::new(),
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy` from the components added so far.
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy = self.components.iter().filter(|c| c.is_healthy).count();
        #[allow(clippy::cast_precision_loss)]
        let score = healthy as f64 / self.components.len() as f64;
        self.score = score;
        self.is_healthy = score >= HEALTHY_THRESHOLD;
    }

    /// Names of the components that failed their check
    pub fn failing(&self) -> impl Iterator<Item = &str> {
        self.components.iter().filter(|c| !c.is_healthy).map(|c| c.name.as_str())
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health status of an individual component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component identifier (e.g., "database")
    pub name: String,
    pub is_healthy: bool,
    /// Failure detail for unhealthy components
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}
