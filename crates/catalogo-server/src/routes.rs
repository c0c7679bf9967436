//! Dataset endpoints.
//!
//! Every descriptor in the route table gets the same family of routes:
//! the full row list at its prefix plus one filtered view per `FilterKind`.

use crate::error::ApiError;
use crate::metrics::{CSV_READ_SECONDS, DATASET_REQUESTS_TOTAL};
use crate::state::AppState;
use axum::{extract::Path, routing::get, Json, Router};
use catalogo_core::{DatasetDescriptor, FilterKind, RowRecord};
use std::sync::Arc;
use tracing::{debug, info};

pub fn dataset_routes(router: Router<AppState>, ds: DatasetDescriptor) -> Router<AppState> {
    let ds = Arc::new(ds);
    info!(
        prefix = %ds.url_prefix,
        file = %ds.source_location.display(),
        "registering dataset"
    );
    let all = {
        let ds = ds.clone();
        move || list_rows(ds.clone())
    };
    let mut router = router.route(&ds.url_prefix, get(all));
    for kind in FilterKind::ALL {
        let ds_for_route = ds.clone();
        let path = format!("{}/{}/:value", ds.url_prefix, kind.segment());
        router = router.route(
            &path,
            get(move |Path(value): Path<String>| filter_rows(ds_for_route.clone(), kind, value)),
        );
    }
    router
}

async fn load(ds: &DatasetDescriptor) -> Result<Vec<RowRecord>, ApiError> {
    let sep = ds
        .separator_byte()
        .map_err(|e| ApiError::dataset(ds.name(), e))?;
    let _timer = CSV_READ_SECONDS
        .with_label_values(&[ds.name()])
        .start_timer();
    catalogo_storage::read_rows(ds.source_location.clone(), sep)
        .await
        .map_err(|e| ApiError::dataset(ds.name(), e))
}

async fn list_rows(ds: Arc<DatasetDescriptor>) -> Result<Json<Vec<RowRecord>>, ApiError> {
    DATASET_REQUESTS_TOTAL
        .with_label_values(&[ds.name(), "none"])
        .inc();
    let rows = load(&ds).await?;
    debug!(dataset = ds.name(), rows = rows.len(), "rows served");
    Ok(Json(rows))
}

async fn filter_rows(
    ds: Arc<DatasetDescriptor>,
    kind: FilterKind,
    value: String,
) -> Result<Json<Vec<RowRecord>>, ApiError> {
    DATASET_REQUESTS_TOTAL
        .with_label_values(&[ds.name(), kind.segment()])
        .inc();
    // Reject malformed input before touching the file.
    let criterion = kind
        .criterion(&value)
        .map_err(|e| ApiError::dataset(ds.name(), e))?;
    let rows = criterion.apply(load(&ds).await?);
    debug!(
        dataset = ds.name(),
        filter = kind.segment(),
        value = %value,
        rows = rows.len(),
        "filtered rows served"
    );
    Ok(Json(rows))
}
