use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use busline_ticket::RenderedTicket;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/pdf/{booking_id}/ticket", get(download_ticket))
}

/// GET /api/v1/pdf/{booking_id}/ticket
/// Streams a freshly rendered PDF; browsers show it inline.
pub async fn download_ticket(
    State(state): State<AppState>,
    Path(booking_id): Path<i64>,
) -> Result<Response, AppError> {
    let ticket = state.tickets.generate(booking_id).await?;

    let headers = [
        (header::CONTENT_TYPE, RenderedTicket::CONTENT_TYPE.to_string()),
        (header::CONTENT_DISPOSITION, ticket.content_disposition()),
        (header::CONTENT_LENGTH, ticket.len().to_string()),
    ];

    Ok((StatusCode::OK, headers, ticket.bytes).into_response())
}
