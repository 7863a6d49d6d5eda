//! Player discovery: the matchmaking side of the app.

use actix_web::{error, get, put, web, HttpResponse};
use redis::{AsyncCommands, Client as RedisClient};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::settings;
use crate::db::models::Profile;
use crate::db::profile_repo;
use crate::http::auth::JwtAuth;

#[derive(Deserialize)]
pub struct FindQuery {
    pub sport: Option<String>,
    pub location: Option<String>,
}

#[derive(Serialize)]
pub struct PlayerCard {
    pub id: Uuid,
    pub full_name: String,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub preferred_sports: Option<Vec<String>>,
    pub available_now: bool,
}

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    pub available: bool,
}

/// PUT /api/players/availability — short-lived "looking for a game" flag,
/// kept in Redis with a TTL so stale flags expire on their own.
#[put("/players/availability")]
pub async fn set_availability(
    auth: JwtAuth,
    info: web::Json<AvailabilityRequest>,
    redis: web::Data<RedisClient>,
) -> Result<HttpResponse, actix_web::Error> {
    let mut conn = redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|_| error::ErrorInternalServerError("Redis unavailable"))?;

    let key = format!("available:{}", auth.user_id);
    if info.available {
        let _: () = conn
            .set_ex(&key, "1", settings().availability_ttl)
            .await
            .unwrap_or(());
    } else {
        let _: () = conn.del(&key).await.unwrap_or(());
    }
    Ok(HttpResponse::Ok().body("ok"))
}

/// GET /api/players — customers with a complete discovery profile, excluding
/// the requester, with optional sport/location filters.
#[get("/players")]
pub async fn find(
    auth: JwtAuth,
    query: web::Query<FindQuery>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> Result<HttpResponse, actix_web::Error> {
    let profiles = profile_repo::find_players(
        &db,
        auth.user_id,
        query.sport.as_deref(),
        query.location.as_deref(),
    )
    .await
    .map_err(error::ErrorInternalServerError)?;

    // Availability is best-effort decoration; Redis being down just means
    // every card shows unavailable.
    let mut cards: Vec<PlayerCard> = profiles.into_iter().map(card_from).collect();
    if let Ok(mut conn) = redis.get_multiplexed_async_connection().await {
        for card in &mut cards {
            let key = format!("available:{}", card.id);
            card.available_now = conn.exists::<_, bool>(&key).await.unwrap_or(false);
        }
    }

    Ok(HttpResponse::Ok().json(cards))
}

fn card_from(p: Profile) -> PlayerCard {
    PlayerCard {
        id: p.id,
        full_name: p.full_name,
        age: p.age,
        location: p.location,
        preferred_sports: p.preferred_sports,
        available_now: false,
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(set_availability).service(find);
}
