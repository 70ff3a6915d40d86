use axum::Json;
use serde_json::{json, Value};

/// GET /api/health (also served at /health)
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "ok": true,
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "review-api"
    }))
}
