//! Room inventory endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use chrono::NaiveDate;
use common::{DateRange, HotelId, RoomId};
use domain::RoomAvailability;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub hotel_id: String,
    pub room_id: String,
    #[serde(with = "super::day")]
    pub from: NaiveDate,
    #[serde(with = "super::day")]
    pub to: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRecord {
    pub hotel_id: String,
    pub room_id: String,
    #[serde(with = "super::day")]
    pub date: NaiveDate,
    pub quota: u32,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityUpdated {
    pub updated: usize,
}

/// PUT /availability — upsert a batch of room-day quotas.
#[tracing::instrument(skip(state, payload))]
pub async fn upsert(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Vec<AvailabilityRecord>>, JsonRejection>,
) -> Result<Json<AvailabilityUpdated>, ApiError> {
    let Json(records) =
        payload.map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e.body_text())))?;

    if let Some(blank) = records
        .iter()
        .find(|r| r.hotel_id.trim().is_empty() || r.room_id.trim().is_empty())
    {
        return Err(ApiError::BadRequest(format!(
            "hotel_id and room_id are required (record for {})",
            blank.date
        )));
    }

    let records: Vec<RoomAvailability> = records
        .into_iter()
        .map(|r| RoomAvailability::new(r.hotel_id.into(), r.room_id.into(), r.date, r.quota))
        .collect();
    let updated = records.len();
    tokio::task::spawn_blocking(move || state.booking_service.set_availability(records)).await??;

    Ok(Json(AvailabilityUpdated { updated }))
}

/// GET /availability — one record per day of the range; days without
/// inventory report quota 0.
#[tracing::instrument(skip(state, query))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    query: Result<Query<AvailabilityQuery>, QueryRejection>,
) -> Result<Json<Vec<RoomAvailability>>, ApiError> {
    let Query(query) =
        query.map_err(|e| ApiError::BadRequest(format!("Invalid query: {}", e.body_text())))?;

    let range = DateRange::new(query.from, query.to).ok_or_else(|| {
        ApiError::BadRequest(format!(
            "'from' ({}) cannot be after 'to' ({})",
            query.from, query.to
        ))
    })?;

    let days = state.booking_service.availability(
        &HotelId::new(query.hotel_id),
        &RoomId::new(query.room_id),
        &range,
    )?;
    Ok(Json(days))
}
