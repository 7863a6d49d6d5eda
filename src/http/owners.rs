//! Owner self-service: business record and profile-setup endpoints.

use actix_web::{error, get, post, web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::db::{owner_repo, profile_repo};
use crate::http::auth::JwtAuth;
use crate::validation::is_valid_phone;

#[derive(Deserialize)]
pub struct ProfileSetupRequest {
    pub age: i32,
    pub location: String,
    pub preferred_sports: Vec<String>,
}

/// GET /api/owners/me — verification banner data for the owner dashboard.
#[get("/owners/me")]
pub async fn me(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let owner = owner_repo::find_by_profile(&db, auth.user_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("owner record not found"))?;
    Ok(HttpResponse::Ok().json(owner))
}

/// GET /api/profiles/me
#[get("/profiles/me")]
pub async fn my_profile(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, actix_web::Error> {
    let profile = profile_repo::find_by_id(&db, auth.user_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("profile not found"))?;
    Ok(HttpResponse::Ok().json(profile))
}

/// POST /api/profiles/setup — discovery fields required before find-players.
#[post("/profiles/setup")]
pub async fn profile_setup(
    auth: JwtAuth,
    info: web::Json<ProfileSetupRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    if info.age <= 0 || info.age > 120 {
        return Err(error::ErrorBadRequest("age out of range"));
    }
    if info.location.trim().is_empty() {
        return Err(error::ErrorBadRequest("location is required"));
    }

    profile_repo::update_discovery(
        &db,
        auth.user_id,
        info.age,
        info.location.trim(),
        &info.preferred_sports,
    )
    .await
    .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().body("profile updated"))
}

#[derive(Deserialize)]
pub struct UpdatePhoneRequest {
    pub phone: String,
}

/// POST /api/profiles/phone — changing the phone resets verification.
#[post("/profiles/phone")]
pub async fn update_phone(
    auth: JwtAuth,
    info: web::Json<UpdatePhoneRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    if !is_valid_phone(&info.phone) {
        return Err(error::ErrorBadRequest("Please enter a valid phone number"));
    }

    sqlx::query("UPDATE profiles SET phone = $2, phone_verified = FALSE WHERE id = $1")
        .bind(auth.user_id)
        .bind(info.phone.trim())
        .execute(&**db)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().body("phone updated; verification required"))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(me)
        .service(my_profile)
        .service(profile_setup)
        .service(update_phone);
}
