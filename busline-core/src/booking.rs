use busline_shared::Masked;
use chrono::{DateTime, FixedOffset, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::{TicketError, TicketResult};

/// Placeholder printed wherever an optional field is missing.
pub const EMPTY_FIELD: &str = "-";

/// `05 Mar 2024, 19:37`
pub const BOOKING_DATE_FORMAT: &str = "%d %b %Y, %H:%M";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub seat_number: i32,
    pub seat_type: Option<String>,
    pub is_booked: bool,
}

impl Seat {
    pub fn new(seat_number: i32, seat_type: Option<&str>, is_booked: bool) -> Self {
        Self {
            seat_number,
            seat_type: seat_type.map(str::to_string),
            is_booked,
        }
    }

    pub fn type_label(&self) -> &str {
        self.seat_type.as_deref().unwrap_or(EMPTY_FIELD)
    }

    pub fn booked_label(&self) -> &'static str {
        if self.is_booked { "Yes" } else { "No" }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Passenger {
    pub name: Option<String>,
    pub age: i32,
    pub gender: Option<String>,
    pub contact: Option<Masked<String>>,
}

impl Passenger {
    pub fn name_label(&self) -> &str {
        self.name.as_deref().unwrap_or(EMPTY_FIELD)
    }

    pub fn gender_label(&self) -> &str {
        self.gender.as_deref().unwrap_or(EMPTY_FIELD)
    }

    pub fn contact_label(&self) -> &str {
        self.contact
            .as_ref()
            .map(|c| c.expose().as_str())
            .unwrap_or(EMPTY_FIELD)
    }
}

/// How passenger names are compared when ordering the passenger table.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NameOrder {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

impl NameOrder {
    /// Named passengers first in ascending order, unnamed ones last.
    pub fn compare(self, a: &Passenger, b: &Passenger) -> Ordering {
        match (a.name.as_deref(), b.name.as_deref()) {
            (Some(x), Some(y)) => match self {
                NameOrder::CaseSensitive => x.cmp(y),
                NameOrder::CaseInsensitive => x
                    .to_lowercase()
                    .cmp(&y.to_lowercase())
                    .then_with(|| x.cmp(y)),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// A booking together with its seats and passengers, read as one snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub booking_id: i64,
    pub user_id: i64,
    pub trip_id: i64,
    pub booking_date: DateTime<Utc>,
    pub status: String,
    pub total_amount: Decimal,
    pub seats: Vec<Seat>,
    pub passengers: Vec<Passenger>,
}

/// Booking header without children, returned by listing queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingSummary {
    pub booking_id: i64,
    pub user_id: i64,
    pub trip_id: i64,
    pub booking_date: DateTime<Utc>,
    pub status: String,
    pub total_amount: Decimal,
}

impl Booking {
    pub fn sorted_seats(&self) -> Vec<&Seat> {
        let mut seats: Vec<&Seat> = self.seats.iter().collect();
        seats.sort_by_key(|s| s.seat_number);
        seats
    }

    pub fn sorted_passengers(&self, order: NameOrder) -> Vec<&Passenger> {
        let mut passengers: Vec<&Passenger> = self.passengers.iter().collect();
        passengers.sort_by(|a, b| order.compare(a, b));
        passengers
    }

    /// Ascending seat numbers joined by `, `, or `-` when nothing is booked.
    pub fn seat_summary(&self) -> String {
        if self.seats.is_empty() {
            return EMPTY_FIELD.to_string();
        }

        self.sorted_seats()
            .iter()
            .map(|s| s.seat_number.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    }

    /// Text encoded into the ticket's QR code.
    pub fn qr_payload(&self, currency_symbol: &str) -> String {
        format!(
            "Booking ID: {}\nUser ID: {}\nTrip ID: {}\nStatus: {}\nSeats: {}\nTotal: {}",
            self.booking_id,
            self.user_id,
            self.trip_id,
            self.status,
            self.seat_summary(),
            format_amount(currency_symbol, &self.total_amount),
        )
    }

    pub fn summary(&self) -> BookingSummary {
        BookingSummary {
            booking_id: self.booking_id,
            user_id: self.user_id,
            trip_id: self.trip_id,
            booking_date: self.booking_date,
            status: self.status.clone(),
            total_amount: self.total_amount,
        }
    }
}

/// Always two decimal places, half-up: `250` -> `Rs 250.00`.
pub fn format_amount(currency_symbol: &str, amount: &Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    format!("{} {}", currency_symbol, rounded)
}

pub fn format_booking_date(date: &DateTime<Utc>, utc_offset_minutes: i32) -> TicketResult<String> {
    let offset = utc_offset_minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            TicketError::Render(format!("UTC offset out of range: {} minutes", utc_offset_minutes))
        })?;

    Ok(date.with_timezone(&offset).format(BOOKING_DATE_FORMAT).to_string())
}
