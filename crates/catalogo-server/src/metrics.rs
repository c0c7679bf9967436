use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

pub static DATASET_REQUESTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "dataset_requests_total",
        "Dataset requests by dataset and filter",
        &["dataset", "filter"]
    )
    .unwrap()
});

pub static CSV_READ_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "csv_read_seconds",
        "Time to read and parse a dataset file",
        &["dataset"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .unwrap()
});

pub static USER_INSERTS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!("user_inserts_total", "User inserts by result", &["result"]).unwrap()
});

/// Prometheus text exposition of the default registry.
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buf = Vec::new();
    let _ = encoder.encode(&metric_families, &mut buf);
    String::from_utf8(buf).unwrap_or_default()
}
