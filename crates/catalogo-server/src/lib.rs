pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod routes;
pub mod state;

pub use config::Config;
pub use state::{open_store, AppState};

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, put},
    Router,
};
use catalogo_core::{validate_route_table, CatalogError, DatasetDescriptor, Result};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Builds the full HTTP surface for `datasets`, allowing `origins` cross-origin.
pub fn build_router(
    state: AppState,
    datasets: &[DatasetDescriptor],
    origins: &[String],
) -> Result<Router> {
    validate_route_table(datasets)?;

    let mut router = Router::new()
        .route("/", get(handlers::index))
        .route("/usuario", put(handlers::register_user))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::prometheus_metrics));
    for ds in datasets {
        router = routes::dataset_routes(router, ds.clone());
    }

    Ok(router
        .with_state(state)
        .layer(cors(origins)?)
        .layer(TraceLayer::new_for_http()))
}

fn cors(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o)
                .map_err(|e| CatalogError::Config(format!("bad cors origin {o:?}: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}
