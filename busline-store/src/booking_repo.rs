use async_trait::async_trait;
use busline_core::repository::{BookingRepository, RepositoryError};
use busline_core::{Booking, BookingSummary, Passenger, Seat};
use busline_shared::Masked;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use tracing::debug;

pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct BookingRow {
    booking_id: i64,
    user_id: i64,
    trip_id: i64,
    booking_date: DateTime<Utc>,
    status: String,
    total_amount: Decimal,
}

#[derive(sqlx::FromRow)]
struct SeatRow {
    seat_number: i32,
    seat_type: Option<String>,
    is_booked: bool,
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    name: Option<String>,
    age: i32,
    gender: Option<String>,
    contact: Option<String>,
}

impl BookingRow {
    fn into_summary(self) -> BookingSummary {
        BookingSummary {
            booking_id: self.booking_id,
            user_id: self.user_id,
            trip_id: self.trip_id,
            booking_date: self.booking_date,
            status: self.status,
            total_amount: self.total_amount,
        }
    }

    fn into_booking(self, seats: Vec<SeatRow>, passengers: Vec<PassengerRow>) -> Booking {
        Booking {
            booking_id: self.booking_id,
            user_id: self.user_id,
            trip_id: self.trip_id,
            booking_date: self.booking_date,
            status: self.status,
            total_amount: self.total_amount,
            seats: seats.into_iter().map(Seat::from).collect(),
            passengers: passengers.into_iter().map(Passenger::from).collect(),
        }
    }
}

impl From<SeatRow> for Seat {
    fn from(row: SeatRow) -> Self {
        Seat {
            seat_number: row.seat_number,
            seat_type: row.seat_type,
            is_booked: row.is_booked,
        }
    }
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Passenger {
            name: row.name,
            age: row.age,
            gender: row.gender,
            contact: row.contact.map(Masked::new),
        }
    }
}

const BOOKING_COLUMNS: &str =
    "SELECT booking_id, user_id, trip_id, booking_date, status, total_amount FROM bookings";

const SNAPSHOT_ISOLATION: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// Transaction whose reads all see the snapshot taken by its first query.
async fn begin_snapshot(pool: &PgPool) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query(SNAPSHOT_ISOLATION).execute(&mut *tx).await?;
    Ok(tx)
}

async fn fetch_header(conn: &mut PgConnection, booking_id: i64) -> Result<Option<BookingRow>, sqlx::Error> {
    sqlx::query_as::<_, BookingRow>(&format!("{} WHERE booking_id = $1", BOOKING_COLUMNS))
        .bind(booking_id)
        .fetch_optional(conn)
        .await
}

async fn fetch_seats(conn: &mut PgConnection, booking_id: i64) -> Result<Vec<SeatRow>, sqlx::Error> {
    sqlx::query_as::<_, SeatRow>(
        r#"
        SELECT seat_number, seat_type, is_booked
        FROM seats
        WHERE booking_id = $1
        ORDER BY seat_id
        "#,
    )
    .bind(booking_id)
    .fetch_all(conn)
    .await
}

async fn fetch_passengers(conn: &mut PgConnection, booking_id: i64) -> Result<Vec<PassengerRow>, sqlx::Error> {
    sqlx::query_as::<_, PassengerRow>(
        r#"
        SELECT name, age, gender, contact
        FROM passengers
        WHERE booking_id = $1
        ORDER BY passenger_id
        "#,
    )
    .bind(booking_id)
    .fetch_all(conn)
    .await
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn find_by_id_with_details(
        &self,
        booking_id: i64,
    ) -> Result<Option<Booking>, RepositoryError> {
        // Header and children must come from the same snapshot.
        let mut tx = begin_snapshot(&self.pool).await?;

        let Some(row) = fetch_header(&mut tx, booking_id).await? else {
            tx.commit().await?;
            return Ok(None);
        };
        let seats = fetch_seats(&mut tx, booking_id).await?;
        let passengers = fetch_passengers(&mut tx, booking_id).await?;

        tx.commit().await?;

        debug!(
            booking_id,
            seats = seats.len(),
            passengers = passengers.len(),
            "Loaded booking aggregate"
        );

        Ok(Some(row.into_booking(seats, passengers)))
    }

    async fn find_by_trip_id(
        &self,
        trip_id: i64,
    ) -> Result<Vec<BookingSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{} WHERE trip_id = $1 ORDER BY booking_date, booking_id",
            BOOKING_COLUMNS
        ))
        .bind(trip_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookingRow::into_summary).collect())
    }

    async fn find_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Vec<BookingSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, BookingRow>(&format!(
            "{} WHERE user_id = $1 ORDER BY booking_date, booking_id",
            BOOKING_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(BookingRow::into_summary).collect())
    }
}
