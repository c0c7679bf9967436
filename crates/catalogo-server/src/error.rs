use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use catalogo_core::CatalogError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Handler failures, tagged with the surface they came from so the client
/// gets that surface's generic message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("dataset {dataset}: {source}")]
    Dataset {
        dataset: String,
        #[source]
        source: CatalogError,
    },
    #[error("index document: {0}")]
    Index(#[source] CatalogError),
    #[error("user registration: {0}")]
    Registration(#[source] CatalogError),
}

impl ApiError {
    pub fn dataset(dataset: &str, source: CatalogError) -> Self {
        ApiError::Dataset {
            dataset: dataset.to_string(),
            source,
        }
    }

    fn source_error(&self) -> &CatalogError {
        match self {
            ApiError::Dataset { source, .. } => source,
            ApiError::Index(e) | ApiError::Registration(e) => e,
        }
    }

    pub fn status(&self) -> StatusCode {
        if self.source_error().is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            warn!("{}", self);
        }
        match self {
            ApiError::Dataset { source, .. } if source.is_client_error() => {
                (status, Json(json!({"error": source.to_string()}))).into_response()
            }
            ApiError::Dataset { .. } => (
                status,
                Json(json!({"error": "Error leyendo archivo CSV"})),
            )
                .into_response(),
            ApiError::Index(_) => (status, "Error leyendo archivo JSON").into_response(),
            ApiError::Registration(_) => (
                status,
                Json(json!({"error": "Error registrando usuario"})),
            )
                .into_response(),
        }
    }
}
