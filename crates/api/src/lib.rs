//! HTTP API server for the hotel booking service.
//!
//! Exposes order booking and room inventory endpoints over the booking core,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use domain::{InMemoryAvailabilityRepository, InMemoryBookingService, RoomAvailability};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/orders",
            get(routes::orders::list).post(routes::orders::create),
        )
        .route(
            "/availability",
            get(routes::availability::get).put(routes::availability::upsert),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over in-memory stores holding `inventory`.
pub fn create_default_state(inventory: Vec<RoomAvailability>) -> Arc<AppState> {
    let availability = InMemoryAvailabilityRepository::with_records(inventory);
    Arc::new(AppState {
        booking_service: InMemoryBookingService::in_memory(availability),
    })
}
