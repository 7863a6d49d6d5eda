use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{Booking, BookingStatus};
use crate::pricing::Quote;

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &PgPool,
    turf_id: Uuid,
    user_id: Uuid,
    slot_id: Option<Uuid>,
    booking_date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    quote: Quote,
) -> Result<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO bookings (turf_id, user_id, slot_id, booking_date,
                                 start_time, end_time, hours,
                                 base_amount, premium_charges, total_amount)
           VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
           RETURNING id"#,
    )
    .bind(turf_id)
    .bind(user_id)
    .bind(slot_id)
    .bind(booking_date)
    .bind(start_time)
    .bind(end_time)
    .bind(quote.hours)
    .bind(quote.base_amount)
    .bind(quote.premium_charges)
    .bind(quote.total_amount)
    .fetch_one(db)
    .await
    .context("creating booking")
}

pub async fn find(db: &PgPool, id: Uuid) -> Result<Option<Booking>> {
    sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
        .context("fetching booking")
}

pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Booking>> {
    sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE user_id = $1 ORDER BY booking_date DESC, start_time DESC",
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("listing user bookings")
}

pub async fn list_for_turf(db: &PgPool, turf_id: Uuid) -> Result<Vec<Booking>> {
    sqlx::query_as::<_, Booking>(
        "SELECT * FROM bookings WHERE turf_id = $1 ORDER BY booking_date DESC, start_time DESC",
    )
    .bind(turf_id)
    .fetch_all(db)
    .await
    .context("listing turf bookings")
}

pub async fn set_status(db: &PgPool, id: Uuid, status: BookingStatus) -> Result<()> {
    sqlx::query("UPDATE bookings SET status = $2 WHERE id = $1")
        .bind(id)
        .bind(status)
        .execute(db)
        .await
        .context("updating booking status")?;
    Ok(())
}
