use crate::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = match &state.db {
        Some(pool) => {
            if sqlx::query("SELECT 1").execute(pool).await.is_ok() {
                "connected"
            } else {
                "disconnected"
            }
        }
        None => "in-memory",
    };

    Json(serde_json::json!({
        "status": "healthy",
        "database": database,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
