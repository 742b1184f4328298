use async_trait::async_trait;
use std::collections::HashMap;

use crate::booking::{Booking, BookingSummary};

pub type RepositoryError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Load a booking with its seats and passengers from one consistent snapshot.
    async fn find_by_id_with_details(
        &self,
        booking_id: i64,
    ) -> Result<Option<Booking>, RepositoryError>;

    async fn find_by_trip_id(
        &self,
        trip_id: i64,
    ) -> Result<Vec<BookingSummary>, RepositoryError>;

    async fn find_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Vec<BookingSummary>, RepositoryError>;
}

/// Keeps whole aggregates in memory. Used by tests and local runs without Postgres.
#[derive(Debug, Default, Clone)]
pub struct InMemoryBookingRepository {
    bookings: HashMap<i64, Booking>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bookings(bookings: impl IntoIterator<Item = Booking>) -> Self {
        let mut repo = Self::new();
        for booking in bookings {
            repo.insert(booking);
        }
        repo
    }

    pub fn insert(&mut self, booking: Booking) {
        self.bookings.insert(booking.booking_id, booking);
    }

    fn summaries_where(&self, predicate: impl Fn(&Booking) -> bool) -> Vec<BookingSummary> {
        let mut summaries: Vec<BookingSummary> = self
            .bookings
            .values()
            .filter(|b| predicate(b))
            .map(Booking::summary)
            .collect();
        summaries.sort_by(|a, b| {
            a.booking_date
                .cmp(&b.booking_date)
                .then(a.booking_id.cmp(&b.booking_id))
        });
        summaries
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn find_by_id_with_details(
        &self,
        booking_id: i64,
    ) -> Result<Option<Booking>, RepositoryError> {
        Ok(self.bookings.get(&booking_id).cloned())
    }

    async fn find_by_trip_id(
        &self,
        trip_id: i64,
    ) -> Result<Vec<BookingSummary>, RepositoryError> {
        Ok(self.summaries_where(|b| b.trip_id == trip_id))
    }

    async fn find_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Vec<BookingSummary>, RepositoryError> {
        Ok(self.summaries_where(|b| b.user_id == user_id))
    }
}
