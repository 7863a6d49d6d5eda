use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::Review;

pub async fn create(
    db: &PgPool,
    booking_id: Uuid,
    turf_id: Uuid,
    user_id: Uuid,
    rating: i16,
    comment: Option<&str>,
) -> Result<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO reviews (booking_id, turf_id, user_id, rating, comment)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id"#,
    )
    .bind(booking_id)
    .bind(turf_id)
    .bind(user_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(db)
    .await
    .context("creating review")
}

pub async fn list_for_turf(db: &PgPool, turf_id: Uuid) -> Result<Vec<Review>> {
    sqlx::query_as::<_, Review>(
        "SELECT * FROM reviews WHERE turf_id = $1 ORDER BY created_at DESC LIMIT 100",
    )
    .bind(turf_id)
    .fetch_all(db)
    .await
    .context("listing turf reviews")
}
