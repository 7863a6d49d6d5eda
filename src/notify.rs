//! Outbound notifications.
//!
//! Email dispatch is delegated to a worker listening on a Redis channel; the
//! server only publishes the payload. Callers treat dispatch as
//! fire-and-forget: a lost notification must never fail the primary write.

use redis::{AsyncCommands, Client as RedisClient};
use serde::Serialize;
use uuid::Uuid;

const MAIL_CHANNEL: &str = "notifications:email";

#[derive(Serialize)]
struct TurfSubmittedMail<'a> {
    kind: &'static str,
    turf_id: Uuid,
    turf_name: &'a str,
    owner_email: &'a str,
    owner_name: &'a str,
}

/// Tell the admins a new turf is waiting for approval, and echo a copy to
/// the owner. Returns the publish error to the caller, who is expected to
/// log and move on.
pub async fn send_turf_approval_email(
    redis: &RedisClient,
    turf_id: Uuid,
    turf_name: &str,
    owner_email: &str,
    owner_name: &str,
) -> anyhow::Result<()> {
    let payload = serde_json::to_string(&TurfSubmittedMail {
        kind: "turf_submitted",
        turf_id,
        turf_name,
        owner_email,
        owner_name,
    })?;

    let mut conn = redis.get_multiplexed_async_connection().await?;
    let _: () = conn.publish(MAIL_CHANNEL, payload).await?;
    log::info!("queued approval email for turf {turf_id} ({turf_name})");
    Ok(())
}
