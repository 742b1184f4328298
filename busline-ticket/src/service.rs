use std::sync::Arc;

use busline_core::{BookingRepository, TicketError, TicketResult};
use tracing::{info, warn};

use crate::renderer::{RenderedTicket, TicketRenderer};

/// Looks a booking up and renders its ticket, fresh on every call.
pub struct TicketService {
    bookings: Arc<dyn BookingRepository>,
    renderer: TicketRenderer,
}

impl TicketService {
    pub fn new(bookings: Arc<dyn BookingRepository>, renderer: TicketRenderer) -> Self {
        Self { bookings, renderer }
    }

    pub async fn generate(&self, booking_id: i64) -> TicketResult<RenderedTicket> {
        let booking = self
            .bookings
            .find_by_id_with_details(booking_id)
            .await
            .map_err(|e| TicketError::Store(e.to_string()))?
            .ok_or_else(|| {
                warn!("Ticket requested for unknown booking {}", booking_id);
                TicketError::NotFound(booking_id)
            })?;

        let bytes = self.renderer.render(&booking)?;

        info!(
            booking_id,
            seats = booking.seats.len(),
            passengers = booking.passengers.len(),
            size = bytes.len(),
            "Ticket rendered"
        );

        Ok(RenderedTicket { booking_id, bytes })
    }
}
