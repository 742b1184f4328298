pub mod booking;
pub mod repository;

pub use booking::{Booking, BookingSummary, NameOrder, Passenger, Seat};
pub use repository::{BookingRepository, InMemoryBookingRepository, RepositoryError};

/// Everything that can abort a ticket request.
#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("Booking not found: {0}")]
    NotFound(i64),
    #[error("QR encoding failed: {0}")]
    Encoding(String),
    #[error("Ticket rendering failed: {0}")]
    Render(String),
    #[error("Booking lookup failed: {0}")]
    Store(String),
}

pub type TicketResult<T> = Result<T, TicketError>;
