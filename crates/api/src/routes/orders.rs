//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use chrono::NaiveDate;
use domain::Order;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(default)]
    pub hotel_id: String,
    #[serde(default)]
    pub room_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(with = "super::day")]
    pub from: NaiveDate,
    #[serde(with = "super::day")]
    pub to: NaiveDate,
}

// -- Response types --

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub hotel_id: String,
    pub room_id: String,
    pub email: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            hotel_id: order.hotel_id().to_string(),
            room_id: order.room_id().to_string(),
            email: order.email().to_string(),
            from: order.from(),
            to: order.to(),
        }
    }
}

// -- Handlers --

/// POST /orders — book a room for every day of the requested stay.
#[tracing::instrument(skip(state, payload))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected request body");
        ApiError::BadRequest(format!("Invalid request body: {}", e.body_text()))
    })?;

    let order = Order::new(req.hotel_id, req.room_id, req.email, req.from, req.to)?;
    // run_in_transaction blocks on a std mutex
    let order = tokio::task::spawn_blocking(move || state.booking_service.create_order(order))
        .await??;

    Ok((StatusCode::CREATED, Json(OrderResponse::from(&order))))
}

/// GET /orders — list confirmed orders.
#[tracing::instrument(skip(state))]
pub async fn list(State(state): State<Arc<AppState>>) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.booking_service.orders()?;
    Ok(Json(orders.iter().map(OrderResponse::from).collect()))
}
