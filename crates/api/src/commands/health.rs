//! Health check command for frontend monitoring

use crate::context::AppContext;
use crate::utils::health::HealthStatus;

/// Get application health status
///
/// # Example Response
/// ```json
/// {
///   "is_healthy": true,
///   "score": 1.0,
///   "components": [
///     { "name": "database", "is_healthy": true, "message": null },
///     { "name": "study_service", "is_healthy": true, "message": null }
///   ],
///   "timestamp": 1698765432
/// }
/// ```
pub async fn get_app_health(context: &AppContext) -> HealthStatus {
    context.health_check().await
}
