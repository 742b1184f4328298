use anyhow::Context;
use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use busline_store::app_config::TicketConfig;
use busline_ticket::TicketStyle;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bookings;
pub mod error;
pub mod state;
pub mod tickets;

pub use state::AppState;

pub fn app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(tickets::routes())
        .merge(bookings::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Read-only API: browsers on `allowed_origin` may fetch and open tickets.
pub fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let origin: HeaderValue = allowed_origin
        .parse()
        .with_context(|| format!("Invalid CORS origin: {}", allowed_origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION]))
}

/// Applies the configured overrides on top of the default ticket look.
pub fn ticket_style(config: &TicketConfig) -> TicketStyle {
    let mut style = TicketStyle::default();
    if let Some(title) = &config.title {
        style.title = title.clone();
    }
    if let Some(footer) = &config.footer {
        style.footer = footer.clone();
    }
    if let Some(symbol) = &config.currency_symbol {
        style.currency_symbol = symbol.clone();
    }
    if let Some(size) = config.qr_source_size {
        style.qr_source_size = size;
    }
    if let Some(size) = config.qr_display_size {
        style.qr_display_size = size;
    }
    style.utc_offset_minutes = config.utc_offset_minutes;
    style.passenger_order = config.passenger_order;
    style
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use busline_core::NameOrder;

    #[test]
    fn test_empty_ticket_config_keeps_defaults() {
        let style = ticket_style(&TicketConfig::default());
        let default = TicketStyle::default();

        assert_eq!(style.title, default.title);
        assert_eq!(style.footer, default.footer);
        assert_eq!(style.currency_symbol, default.currency_symbol);
        assert_eq!(style.qr_display_size, default.qr_display_size);
    }

    #[test]
    fn test_ticket_config_overrides_style() {
        let config = TicketConfig {
            title: Some("Night Coach".to_string()),
            currency_symbol: Some("EUR".to_string()),
            utc_offset_minutes: 60,
            passenger_order: NameOrder::CaseInsensitive,
            qr_display_size: Some(90.0),
            ..TicketConfig::default()
        };
        let style = ticket_style(&config);

        assert_eq!(style.title, "Night Coach");
        assert_eq!(style.currency_symbol, "EUR");
        assert_eq!(style.utc_offset_minutes, 60);
        assert_eq!(style.passenger_order, NameOrder::CaseInsensitive);
        assert_eq!(style.qr_display_size, 90.0);
    }

    #[test]
    fn test_invalid_cors_origin_is_rejected() {
        assert!(cors_layer("http://localhost:3000").is_ok());
        assert!(cors_layer("bad\norigin").is_err());
    }
}
