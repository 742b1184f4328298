use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use busline_core::BookingSummary;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/bookings/trip/{trip_id}", get(list_by_trip))
        .route("/api/v1/bookings/user/{user_id}", get(list_by_user))
}

/// GET /api/v1/bookings/trip/{trip_id}
pub async fn list_by_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<i64>,
) -> Result<Json<Vec<BookingSummary>>, AppError> {
    let bookings = state
        .bookings
        .find_by_trip_id(trip_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(bookings))
}

/// GET /api/v1/bookings/user/{user_id}
pub async fn list_by_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<BookingSummary>>, AppError> {
    let bookings = state
        .bookings
        .find_by_user_id(user_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok(Json(bookings))
}
