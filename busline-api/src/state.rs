use std::sync::Arc;
use busline_core::BookingRepository;
use busline_ticket::{TicketRenderer, TicketService};

#[derive(Clone)]
pub struct AppState {
    pub bookings: Arc<dyn BookingRepository>,
    pub tickets: Arc<TicketService>,
}

impl AppState {
    pub fn new(bookings: Arc<dyn BookingRepository>, renderer: TicketRenderer) -> Self {
        let tickets = Arc::new(TicketService::new(bookings.clone(), renderer));
        Self { bookings, tickets }
    }
}
