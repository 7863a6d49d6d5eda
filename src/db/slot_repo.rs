use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::models::TurfSlot;

/// A slot about to be inserted (preset expansion or the single-slot form).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewSlot {
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub price: f64,
}

/// One row of a preset template, before it is stamped onto concrete days.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetSlot {
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub price: f64,
}

/// Cross product of selected days and preset rows: one [`NewSlot`] per pair.
/// Pure, so the fan-out count is testable without a database.
pub fn expand_preset(days: &[i16], preset: &[PresetSlot]) -> Vec<NewSlot> {
    let mut out = Vec::with_capacity(days.len() * preset.len());
    for &day in days {
        for p in preset {
            out.push(NewSlot {
                day_of_week: day,
                start_time: p.start_time,
                duration_minutes: p.duration_minutes,
                price: p.price,
            });
        }
    }
    out
}

pub async fn list_for_turf(db: &PgPool, turf_id: Uuid) -> Result<Vec<TurfSlot>> {
    sqlx::query_as::<_, TurfSlot>(
        "SELECT * FROM turf_slots WHERE turf_id = $1 ORDER BY day_of_week, start_time",
    )
    .bind(turf_id)
    .fetch_all(db)
    .await
    .context("listing turf slots")
}

pub async fn find(db: &PgPool, id: Uuid) -> Result<Option<TurfSlot>> {
    sqlx::query_as::<_, TurfSlot>("SELECT * FROM turf_slots WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
        .context("fetching slot")
}

pub async fn create(db: &PgPool, turf_id: Uuid, slot: &NewSlot) -> Result<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO turf_slots (turf_id, day_of_week, start_time, duration_minutes, price)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id"#,
    )
    .bind(turf_id)
    .bind(slot.day_of_week)
    .bind(slot.start_time)
    .bind(slot.duration_minutes)
    .bind(slot.price)
    .fetch_one(db)
    .await
    .context("creating slot")
}

/// Mutations are scoped to the slot's turf as well as its id, so a slot id
/// belonging to a different turf matches zero rows.
pub async fn set_available(db: &PgPool, turf_id: Uuid, id: Uuid, available: bool) -> Result<()> {
    sqlx::query("UPDATE turf_slots SET is_available = $3 WHERE id = $1 AND turf_id = $2")
        .bind(id)
        .bind(turf_id)
        .bind(available)
        .execute(db)
        .await
        .context("updating slot availability")?;
    Ok(())
}

pub async fn delete(db: &PgPool, turf_id: Uuid, id: Uuid) -> Result<()> {
    sqlx::query("DELETE FROM turf_slots WHERE id = $1 AND turf_id = $2")
        .bind(id)
        .bind(turf_id)
        .execute(db)
        .await
        .context("deleting slot")?;
    Ok(())
}
