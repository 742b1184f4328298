use busline_core::booking::{format_amount, format_booking_date};
use busline_core::{Booking, TicketError, TicketResult};
use pdf_gen::Document;

use crate::document::{Column, PlacedText, TicketDocument};
use crate::fonts;
use crate::qr;
use crate::style::TicketStyle;

const SEAT_COLUMNS: [Column<'static>; 3] = [
    Column { title: "Seat Number", width: 25.0 },
    Column { title: "Type", width: 25.0 },
    Column { title: "Booked", width: 50.0 },
];

const PASSENGER_COLUMNS: [Column<'static>; 4] = [
    Column { title: "Name", width: 35.0 },
    Column { title: "Age", width: 15.0 },
    Column { title: "Gender", width: 20.0 },
    Column { title: "Contact", width: 30.0 },
];

/// A finished PDF ticket. Built per request and never stored.
#[derive(Debug, Clone)]
pub struct RenderedTicket {
    pub booking_id: i64,
    pub bytes: Vec<u8>,
}

impl RenderedTicket {
    pub const CONTENT_TYPE: &'static str = "application/pdf";

    pub fn filename(&self) -> String {
        format!("booking-{}.pdf", self.booking_id)
    }

    pub fn content_disposition(&self) -> String {
        format!("inline; filename={}", self.filename())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Lays out a booking as a ticket. Output depends only on the booking and the style.
#[derive(Debug, Clone)]
pub struct TicketRenderer {
    style: TicketStyle,
}

impl TicketRenderer {
    /// Fails if the style is unusable or the embedded fonts cannot be parsed.
    pub fn new(style: TicketStyle) -> TicketResult<Self> {
        style.validate()?;
        fonts::load_all()?;
        Ok(Self { style })
    }

    pub fn style(&self) -> &TicketStyle {
        &self.style
    }

    pub fn render(&self, booking: &Booking) -> TicketResult<Vec<u8>> {
        let (mut document, _) = self.layout(booking)?;

        let mut bytes = Vec::new();
        document
            .write(&mut bytes)
            .map_err(|e| TicketError::Render(format!("Failed to write PDF: {}", e)))?;
        Ok(bytes)
    }

    /// The laid out document plus every text span it contains.
    fn layout(&self, booking: &Booking) -> TicketResult<(Document, Vec<PlacedText>)> {
        let style = &self.style;

        let booking_date = format_booking_date(&booking.booking_date, style.utc_offset_minutes)?;
        let total = format_amount(&style.currency_symbol, &booking.total_amount);
        let payload = booking.qr_payload(&style.currency_symbol);
        let qr = qr::encode_payload(&payload, style.qr_source_size)?;
        let blank = style.value_font.size;

        let mut doc = TicketDocument::new(style, fonts::load_all()?);
        let qr_index = doc.add_image(qr::to_image(qr));

        doc.centered_lines(&[style.title.clone()], &style.title_font, 10.0);

        doc.label_value("Booking ID:", &booking.booking_id.to_string(), 5.0);
        doc.label_value("User ID:", &booking.user_id.to_string(), 5.0);
        doc.label_value("Trip ID:", &booking.trip_id.to_string(), 5.0);
        doc.label_value("Booking Date:", &booking_date, 5.0);
        doc.label_value("Status:", &booking.status, 5.0);
        doc.label_value("Total Paid:", &total, 5.0);
        doc.label_value("Seats:", &booking.seat_summary(), 5.0);
        doc.space(blank);

        if !booking.seats.is_empty() {
            let rows: Vec<Vec<String>> = booking
                .sorted_seats()
                .iter()
                .map(|s| {
                    vec![
                        s.seat_number.to_string(),
                        s.type_label().to_string(),
                        s.booked_label().to_string(),
                    ]
                })
                .collect();

            doc.heading("Selected Seats", 0.0, 6.0);
            doc.table(&SEAT_COLUMNS, &rows);
        }

        if !booking.passengers.is_empty() {
            let rows: Vec<Vec<String>> = booking
                .sorted_passengers(style.passenger_order)
                .iter()
                .map(|p| {
                    vec![
                        p.name_label().to_string(),
                        p.age.to_string(),
                        p.gender_label().to_string(),
                        p.contact_label().to_string(),
                    ]
                })
                .collect();

            doc.heading("Passengers", 12.0, 6.0);
            doc.table(&PASSENGER_COLUMNS, &rows);
        }

        doc.space(blank);
        doc.centered_image(qr_index, style.qr_display_size, blank);
        doc.centered_lines(&style.footer, &style.footer_font, 0.0);

        Ok(doc.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use busline_core::{NameOrder, Passenger, Seat};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    fn sample_booking() -> Booking {
        Booking {
            booking_id: 42,
            user_id: 7,
            trip_id: 3,
            booking_date: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap(),
            status: "CONFIRMED".to_string(),
            total_amount: Decimal::new(5000, 1),
            seats: vec![
                Seat::new(12, Some("Window"), true),
                Seat::new(11, Some("Aisle"), true),
            ],
            passengers: vec![Passenger {
                name: Some("Asha".to_string()),
                age: 29,
                gender: Some("F".to_string()),
                contact: Some("9990001111".into()),
            }],
        }
    }

    fn passenger(name: &str) -> Passenger {
        Passenger {
            name: Some(name.to_string()),
            age: 40,
            gender: None,
            contact: None,
        }
    }

    fn renderer() -> TicketRenderer {
        TicketRenderer::new(TicketStyle::default()).unwrap()
    }

    fn spans(renderer: &TicketRenderer, booking: &Booking) -> Vec<PlacedText> {
        renderer.layout(booking).unwrap().1
    }

    fn find(spans: &[PlacedText], text: &str) -> Option<usize> {
        spans.iter().position(|s| s.text == text)
    }

    fn count(spans: &[PlacedText], text: &str) -> usize {
        spans.iter().filter(|s| s.text == text).count()
    }

    #[test]
    fn test_render_produces_pdf() {
        let pdf = renderer().render(&sample_booking()).unwrap();

        assert!(pdf.starts_with(b"%PDF-"));
        assert!(pdf.windows(5).any(|w| w == b"%%EOF"));
    }

    #[test]
    fn test_header_fields() {
        let spans = spans(&renderer(), &sample_booking());

        for text in [
            "Bus Booking Ticket",
            "Booking ID:",
            "42",
            "05 Mar 2024, 14:07",
            "CONFIRMED",
            "Rs 500.00",
            "11, 12",
            "Thank you for booking with us! Please carry a valid ID proof.",
            "For support, contact support@yourapp.com",
        ] {
            assert!(find(&spans, text).is_some(), "missing {:?}", text);
        }
    }

    #[test]
    fn test_seat_rows_sorted() {
        let spans = spans(&renderer(), &sample_booking());

        assert!(find(&spans, "11").unwrap() < find(&spans, "12").unwrap());
        assert_eq!(count(&spans, "Yes"), 2);
        assert!(find(&spans, "Aisle").unwrap() < find(&spans, "Window").unwrap());
    }

    #[test]
    fn test_passenger_rows_sorted() {
        let mut booking = sample_booking();
        booking.passengers = vec![passenger("Zoya"), passenger("Bharat"), passenger("Kiran")];
        let spans = spans(&renderer(), &booking);

        let b = find(&spans, "Bharat").unwrap();
        let k = find(&spans, "Kiran").unwrap();
        let z = find(&spans, "Zoya").unwrap();
        assert!(b < k && k < z);
        assert_eq!(count(&spans, "40"), 3);
    }

    #[test]
    fn test_empty_collections_omit_tables() {
        let mut booking = sample_booking();
        booking.seats.clear();
        booking.passengers.clear();
        let spans = spans(&renderer(), &booking);

        assert!(find(&spans, "Selected Seats").is_none());
        assert!(find(&spans, "Seat Number").is_none());
        assert!(find(&spans, "Passengers").is_none());
        assert!(find(&spans, "Contact").is_none());
        assert_eq!(count(&spans, "-"), 1);
    }

    #[test]
    fn test_missing_optional_fields_render_dash() {
        let mut booking = sample_booking();
        booking.seats = vec![Seat::new(5, None, false)];
        booking.passengers = vec![Passenger { name: None, age: 3, gender: None, contact: None }];
        let spans = spans(&renderer(), &booking);

        assert_eq!(count(&spans, "No"), 1);
        // seat type, then passenger name, gender and contact
        assert_eq!(count(&spans, "-"), 4);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let r = renderer();
        assert_eq!(spans(&r, &sample_booking()), spans(&r, &sample_booking()));
    }

    #[test]
    fn test_single_page_for_small_booking() {
        let (document, spans) = renderer().layout(&sample_booking()).unwrap();

        assert_eq!(document.pages.len(), 1);
        assert_eq!(document.images.len(), 1);
        assert!(spans.iter().all(|s| s.page == 0));
    }

    #[test]
    fn test_long_passenger_list_flows_onto_more_pages() {
        let mut booking = sample_booking();
        booking.passengers = (0..80).map(|i| passenger(&format!("Passenger {:02}", i))).collect();
        let (document, spans) = renderer().layout(&booking).unwrap();

        assert!(document.pages.len() > 1);
        assert_eq!(count(&spans, "Passenger 00"), 1);
        assert_eq!(count(&spans, "Passenger 79"), 1);
        // header row repeats on each page the table spans
        assert!(count(&spans, "Name") >= 2);
        assert!(spans.iter().any(|s| s.page > 0 && s.text == "Name"));
    }

    #[test]
    fn test_long_status_wraps_without_losing_words() {
        let mut booking = sample_booking();
        booking.status = "AWAITING CONFIRMATION FROM THE OPERATOR AFTER THE PAYMENT GATEWAY \
                          REPORTS A SETTLED TRANSACTION"
            .to_string();
        let style = TicketStyle::default();
        let right_edge = style.page_width - style.margin;
        let spans = spans(&renderer(), &booking);

        let start = find(&spans, "Status:").unwrap() + 1;
        let end = find(&spans, "Total Paid:").unwrap();
        let status_lines = &spans[start..end];

        assert!(status_lines.len() > 1);
        let rebuilt: Vec<&str> = status_lines.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rebuilt.join(" "), booking.status);
        assert!(status_lines.iter().all(|s| s.x + s.width <= right_edge + 0.01));
    }

    #[test]
    fn test_nothing_runs_past_the_right_margin() {
        let mut booking = sample_booking();
        booking.status = "PENDING".repeat(30);
        booking.passengers = vec![passenger(&"Very Long Passenger Name ".repeat(6))];
        let style = TicketStyle {
            title: "Overnight Express Coach Ticket For The Northern Route".repeat(2),
            footer: vec!["Please arrive fifteen minutes before departure. ".repeat(4)],
            ..TicketStyle::default()
        };
        let right_edge = style.page_width - style.margin;
        let spans = spans(&TicketRenderer::new(style).unwrap(), &booking);

        for span in &spans {
            assert!(
                span.x + span.width <= right_edge + 0.01,
                "{:?} ends at {}",
                span.text,
                span.x + span.width
            );
        }
    }

    #[test]
    fn test_case_insensitive_order_from_style() {
        let mut booking = sample_booking();
        booking.passengers = vec![passenger("bala"), passenger("Chitra")];
        let style = TicketStyle { passenger_order: NameOrder::CaseInsensitive, ..TicketStyle::default() };
        let spans = spans(&TicketRenderer::new(style).unwrap(), &booking);

        assert!(find(&spans, "bala").unwrap() < find(&spans, "Chitra").unwrap());
    }

    #[test]
    fn test_bad_offset_fails_whole_render() {
        let style = TicketStyle { utc_offset_minutes: 48 * 60, ..TicketStyle::default() };
        let result = TicketRenderer::new(style).unwrap().render(&sample_booking());
        assert!(matches!(result, Err(TicketError::Render(_))));
    }

    #[test]
    fn test_invalid_style_is_rejected() {
        let style = TicketStyle { qr_display_size: -1.0, ..TicketStyle::default() };
        assert!(matches!(TicketRenderer::new(style), Err(TicketError::Render(_))));
    }

    #[test]
    fn test_rendered_ticket_headers() {
        let ticket = RenderedTicket { booking_id: 42, bytes: vec![1, 2, 3] };
        assert_eq!(ticket.filename(), "booking-42.pdf");
        assert_eq!(ticket.content_disposition(), "inline; filename=booking-42.pdf");
        assert_eq!(ticket.len(), 3);
    }
}
