use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::{TurfOwner, VerificationStatus};

/// Create (or refresh) the business record for an owner, keyed on the
/// profile. Runs inside the same transaction as the profile insert so an
/// owner account never exists without its business metadata.
pub async fn create_for_profile(
    tx: &mut sqlx::PgConnection,
    profile_id: Uuid,
    business_name: &str,
    business_address: &str,
    gst_number: Option<&str>,
) -> Result<Uuid> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO turf_owners (profile_id, business_name, business_address, gst_number)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (profile_id)
        DO UPDATE SET business_name    = EXCLUDED.business_name,
                      business_address = EXCLUDED.business_address,
                      gst_number       = EXCLUDED.gst_number
        RETURNING id
        "#,
    )
    .bind(profile_id)
    .bind(business_name)
    .bind(business_address)
    .bind(gst_number)
    .fetch_one(tx)
    .await
    .context("creating turf owner record")
}

pub async fn find_by_profile(db: &PgPool, profile_id: Uuid) -> Result<Option<TurfOwner>> {
    sqlx::query_as::<_, TurfOwner>("SELECT * FROM turf_owners WHERE profile_id = $1")
        .bind(profile_id)
        .fetch_optional(db)
        .await
        .context("fetching turf owner")
}

/// Admin decision on an owner application.
pub async fn set_verification(
    db: &PgPool,
    id: Uuid,
    status: VerificationStatus,
    rejection_reason: Option<&str>,
) -> Result<()> {
    sqlx::query(
        "UPDATE turf_owners SET verification_status = $2, rejection_reason = $3 WHERE id = $1",
    )
    .bind(id)
    .bind(status)
    .bind(rejection_reason)
    .execute(db)
    .await
    .context("updating owner verification")?;
    Ok(())
}
