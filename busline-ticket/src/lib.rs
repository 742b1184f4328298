pub mod style;
pub mod fonts;
pub mod qr;
mod document;
pub mod renderer;
pub mod service;

pub use style::{FontSpec, Rgb, TicketStyle};
pub use renderer::{RenderedTicket, TicketRenderer};
pub use service::TicketService;
