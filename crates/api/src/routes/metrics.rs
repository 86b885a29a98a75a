//! Prometheus metrics endpoint and metric descriptions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use metrics::Unit;
use metrics_exporter_prometheus::PrometheusHandle;

/// Registers descriptions for the metrics emitted by the booking core.
pub fn describe() {
    metrics::describe_counter!(
        "bookings_total",
        "Booking attempts by outcome (confirmed, unavailable, failed)"
    );
    metrics::describe_counter!(
        "transactions_total",
        "Coordinated transactions by outcome"
    );
    metrics::describe_histogram!(
        "transaction_duration_seconds",
        Unit::Seconds,
        "Time from first snapshot to commit or rollback"
    );
}

/// GET /metrics — returns Prometheus-formatted metrics.
pub async fn get(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        handle.render(),
    )
}
