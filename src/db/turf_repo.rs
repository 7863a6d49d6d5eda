use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{ApprovalStatus, Turf};

/// Public catalogue: approved, active turfs, optionally narrowed to a sport.
pub async fn list_public(db: &PgPool, sport: Option<&str>) -> Result<Vec<Turf>> {
    sqlx::query_as::<_, Turf>(
        r#"
        SELECT * FROM turfs
         WHERE approval_status = 'approved'
           AND is_active
           AND ($1::TEXT IS NULL OR $1 = ANY(sports))
         ORDER BY created_at DESC
        "#,
    )
    .bind(sport)
    .fetch_all(db)
    .await
    .context("listing public turfs")
}

pub async fn find(db: &PgPool, id: Uuid) -> Result<Option<Turf>> {
    sqlx::query_as::<_, Turf>("SELECT * FROM turfs WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
        .context("fetching turf")
}

pub async fn list_by_owner(db: &PgPool, owner_id: Uuid) -> Result<Vec<Turf>> {
    sqlx::query_as::<_, Turf>(
        "SELECT * FROM turfs WHERE owner_id = $1 ORDER BY created_at DESC",
    )
    .bind(owner_id)
    .fetch_all(db)
    .await
    .context("listing owner turfs")
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &PgPool,
    owner_id: Uuid,
    name: &str,
    description: Option<&str>,
    address: &str,
    hourly_rate: f64,
    sports: &[String],
    amenities: &[String],
) -> Result<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO turfs (owner_id, name, description, address, hourly_rate,
                              sports, amenities)
           VALUES ($1, $2, $3, $4, $5, $6, $7)
           RETURNING id"#,
    )
    .bind(owner_id)
    .bind(name)
    .bind(description)
    .bind(address)
    .bind(hourly_rate)
    .bind(sports)
    .bind(amenities)
    .fetch_one(db)
    .await
    .context("creating turf")
}

/// Claim an unowned turf. Single conditional update, so two owners racing
/// for the same venue cannot both win: the second update matches zero rows.
pub async fn claim(db: &PgPool, turf_id: Uuid, owner_id: Uuid) -> Result<bool> {
    let affected = sqlx::query(
        "UPDATE turfs SET owner_id = $2 WHERE id = $1 AND owner_id IS NULL",
    )
    .bind(turf_id)
    .bind(owner_id)
    .execute(db)
    .await
    .context("claiming turf")?
    .rows_affected();
    Ok(affected == 1)
}

/// Owner toggling a turf in/out of the public catalogue. Scoped to the
/// owner so one owner cannot flip another's venue.
pub async fn set_active(db: &PgPool, turf_id: Uuid, owner_id: Uuid, active: bool) -> Result<bool> {
    let affected = sqlx::query(
        "UPDATE turfs SET is_active = $3 WHERE id = $1 AND owner_id = $2",
    )
    .bind(turf_id)
    .bind(owner_id)
    .bind(active)
    .execute(db)
    .await
    .context("toggling turf active")?
    .rows_affected();
    Ok(affected == 1)
}

/// Admin approval decision.
pub async fn set_approval(db: &PgPool, turf_id: Uuid, status: ApprovalStatus) -> Result<()> {
    sqlx::query("UPDATE turfs SET approval_status = $2 WHERE id = $1")
        .bind(turf_id)
        .bind(status)
        .execute(db)
        .await
        .context("updating turf approval")?;
    Ok(())
}

/// Unclaimed venues (seeded listings waiting for an owner).
pub async fn list_unclaimed(db: &PgPool) -> Result<Vec<Turf>> {
    sqlx::query_as::<_, Turf>(
        "SELECT * FROM turfs WHERE owner_id IS NULL ORDER BY created_at DESC",
    )
    .fetch_all(db)
    .await
    .context("listing unclaimed turfs")
}
