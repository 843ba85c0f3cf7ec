use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static ENTRIES_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "guestbook_entries_created_total",
        "Guestbook entries persisted"
    )
    .expect("register entries_created_total")
});

pub static SUBMISSIONS_REJECTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "guestbook_submissions_rejected_total",
        "Submissions rejected for missing or blank fields"
    )
    .expect("register submissions_rejected_total")
});

pub static STORAGE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "guestbook_storage_errors_total",
        "List or append calls that failed in the entry store"
    )
    .expect("register storage_errors_total")
});

/// Force registration so every series shows up before its first increment.
pub fn init() {
    Lazy::force(&ENTRIES_CREATED_TOTAL);
    Lazy::force(&SUBMISSIONS_REJECTED_TOTAL);
    Lazy::force(&STORAGE_ERRORS_TOTAL);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
