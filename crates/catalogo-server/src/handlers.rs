use crate::error::ApiError;
use crate::metrics::{self, USER_INSERTS_TOTAL};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use catalogo_core::{RegistrationRequest, UserRecord};
use serde_json::json;
use tracing::info;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn prometheus_metrics() -> impl IntoResponse {
    (StatusCode::OK, metrics::render())
}

/// Serves the static landing document as parsed from disk.
pub async fn index(State(app): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    catalogo_storage::read_json(&app.index_file)
        .await
        .map(Json)
        .map_err(ApiError::Index)
}

pub async fn register_user(
    State(app): State<AppState>,
    Json(req): Json<RegistrationRequest>,
) -> Result<impl IntoResponse, ApiError> {
    match app.store.insert(UserRecord::from(req)).await {
        Ok(ack) => {
            USER_INSERTS_TOTAL.with_label_values(&["ok"]).inc();
            info!(id = %ack.inserted_id, store = app.store.kind(), "user registered");
            Ok((
                StatusCode::OK,
                Json(json!({"message": "Usuario registrado", "result": ack})),
            ))
        }
        Err(e) => {
            USER_INSERTS_TOTAL.with_label_values(&["error"]).inc();
            Err(ApiError::Registration(e))
        }
    }
}
