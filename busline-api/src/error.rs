use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use busline_core::TicketError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFoundError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<TicketError> for AppError {
    fn from(err: TicketError) -> Self {
        match err {
            TicketError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            TicketError::Encoding(_) | TicketError::Render(_) | TicketError::Store(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}
