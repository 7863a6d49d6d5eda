use anyhow::{Context, Result};
use sqlx::PgPool;
use uuid::Uuid;

use super::models::Profile;
use crate::resolver::{DiscoveryProfile, FetchError, ProfileSource};

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<Profile>> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE email = $1")
        .bind(email)
        .fetch_optional(db)
        .await
        .context("fetching profile by email")
}

pub async fn find_by_id(db: &PgPool, id: Uuid) -> Result<Option<Profile>> {
    sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await
        .context("fetching profile by id")
}

pub async fn set_email_verified(db: &PgPool, id: Uuid) -> Result<()> {
    sqlx::query("UPDATE profiles SET email_verified = TRUE WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("marking email verified")?;
    Ok(())
}

pub async fn set_phone_verified(db: &PgPool, id: Uuid) -> Result<()> {
    sqlx::query("UPDATE profiles SET phone_verified = TRUE WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .context("marking phone verified")?;
    Ok(())
}

/// Profile-setup form: discovery fields only.
pub async fn update_discovery(
    db: &PgPool,
    id: Uuid,
    age: i32,
    location: &str,
    preferred_sports: &[String],
) -> Result<()> {
    sqlx::query(
        "UPDATE profiles SET age = $2, location = $3, preferred_sports = $4 WHERE id = $1",
    )
    .bind(id)
    .bind(age)
    .bind(location)
    .bind(preferred_sports)
    .execute(db)
    .await
    .context("updating discovery profile")?;
    Ok(())
}

/// Customers with a complete discovery profile, excluding the requester.
/// Optional sport / location filters narrow the list.
pub async fn find_players(
    db: &PgPool,
    requester: Uuid,
    sport: Option<&str>,
    location: Option<&str>,
) -> Result<Vec<Profile>> {
    sqlx::query_as::<_, Profile>(
        r#"
        SELECT * FROM profiles
         WHERE role = 'customer'
           AND id <> $1
           AND age IS NOT NULL
           AND location IS NOT NULL
           AND ($2::TEXT IS NULL OR $2 = ANY(preferred_sports))
           AND ($3::TEXT IS NULL OR location ILIKE '%' || $3 || '%')
         ORDER BY created_at DESC
         LIMIT 100
        "#,
    )
    .bind(requester)
    .bind(sport)
    .bind(location)
    .fetch_all(db)
    .await
    .context("finding players")
}

/// Postgres-backed [`ProfileSource`] for the redirect resolver.
pub struct PgProfileSource<'a> {
    pub db: &'a PgPool,
}

impl ProfileSource for PgProfileSource<'_> {
    async fn phone_verified(&self, user: Uuid) -> Result<bool, FetchError> {
        let row = sqlx::query_scalar::<_, bool>(
            "SELECT phone_verified FROM profiles WHERE id = $1",
        )
        .bind(user)
        .fetch_optional(self.db)
        .await
        .map_err(|e| FetchError::Backend(e.into()))?;
        row.ok_or(FetchError::NotFound)
    }

    async fn discovery_profile(&self, user: Uuid) -> Result<DiscoveryProfile, FetchError> {
        let row = sqlx::query_as::<_, (Option<i32>, Option<String>)>(
            "SELECT age, location FROM profiles WHERE id = $1",
        )
        .bind(user)
        .fetch_optional(self.db)
        .await
        .map_err(|e| FetchError::Backend(e.into()))?;
        match row {
            Some((age, location)) => Ok(DiscoveryProfile { age, location }),
            None => Err(FetchError::NotFound),
        }
    }
}
