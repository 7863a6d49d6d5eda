//! Owner-managed recurring weekly slots, including bulk preset application.

use actix_web::{delete, error, get, post, web, HttpResponse};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::slot_repo::{self, expand_preset, NewSlot, PresetSlot};
use crate::db::turf_repo;
use crate::http::auth::JwtAuth;

#[derive(Deserialize)]
pub struct CreateSlotRequest {
    #[serde(flatten)]
    pub slot: NewSlot,
}

#[derive(Deserialize)]
pub struct ApplyPresetRequest {
    /// 0 = Sunday … 6 = Saturday.
    pub days: Vec<i16>,
    pub preset: Vec<PresetSlot>,
}

#[derive(Serialize)]
pub struct ApplyPresetResponse {
    pub created: usize,
    pub failed: usize,
}

#[derive(Deserialize)]
pub struct AvailabilityRequest {
    pub is_available: bool,
}

/// Owner check shared by every mutating slot endpoint.
async fn owned_turf(db: &PgPool, turf_id: Uuid, owner_id: Uuid) -> Result<(), actix_web::Error> {
    let turf = turf_repo::find(db, turf_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("turf not found"))?;
    if turf.owner_id != Some(owner_id) {
        return Err(error::ErrorForbidden("not your turf"));
    }
    Ok(())
}

/// GET /api/turfs/{id}/slots — public, consumed by the booking form.
#[get("/turfs/{id}/slots")]
pub async fn list(path: web::Path<Uuid>, db: web::Data<PgPool>) -> Result<HttpResponse, actix_web::Error> {
    let rows = slot_repo::list_for_turf(&db, path.into_inner())
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/turfs/{id}/slots
#[post("/turfs/{id}/slots")]
pub async fn create(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<CreateSlotRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let turf_id = path.into_inner();
    owned_turf(&db, turf_id, auth.user_id).await?;

    if !(0..=6).contains(&info.slot.day_of_week) {
        return Err(error::ErrorBadRequest("day_of_week must be 0-6"));
    }
    if info.slot.duration_minutes <= 0 {
        return Err(error::ErrorBadRequest("duration must be positive"));
    }

    let id = slot_repo::create(&db, turf_id, &info.slot)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "slot_id": id })))
}

/// POST /api/turfs/{id}/slots/preset — stamp a preset template onto a set of
/// days. One insert per (day × preset row), issued concurrently; a failed
/// insert does not roll back the ones that succeeded, the response just
/// reports both counts.
#[post("/turfs/{id}/slots/preset")]
pub async fn apply_preset(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<ApplyPresetRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let turf_id = path.into_inner();
    owned_turf(&db, turf_id, auth.user_id).await?;

    if info.days.iter().any(|d| !(0..=6).contains(d)) {
        return Err(error::ErrorBadRequest("day_of_week must be 0-6"));
    }

    let slots = expand_preset(&info.days, &info.preset);
    let results = join_all(slots.iter().map(|s| slot_repo::create(&db, turf_id, s))).await;

    let created = results.iter().filter(|r| r.is_ok()).count();
    let failed = results.len() - created;
    if failed > 0 {
        log::warn!("preset application on turf {turf_id}: {failed} of {} inserts failed", results.len());
    }

    Ok(HttpResponse::Ok().json(ApplyPresetResponse { created, failed }))
}

/// The slot must exist and hang off the turf named in the path; otherwise a
/// caller could pass their own turf id plus a foreign slot id and mutate
/// another owner's schedule.
async fn slot_on_turf(
    db: &PgPool,
    turf_id: Uuid,
    slot_id: Uuid,
) -> Result<(), actix_web::Error> {
    let slot = slot_repo::find(db, slot_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("slot not found"))?;
    if !slot.belongs_to(turf_id) {
        return Err(error::ErrorNotFound("slot not found for this turf"));
    }
    Ok(())
}

/// POST /api/turfs/{turf_id}/slots/{slot_id}/availability
#[post("/turfs/{turf_id}/slots/{slot_id}/availability")]
pub async fn set_availability(
    auth: JwtAuth,
    path: web::Path<(Uuid, Uuid)>,
    info: web::Json<AvailabilityRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let (turf_id, slot_id) = path.into_inner();
    owned_turf(&db, turf_id, auth.user_id).await?;
    slot_on_turf(&db, turf_id, slot_id).await?;

    slot_repo::set_available(&db, turf_id, slot_id, info.is_available)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().body("updated"))
}

/// DELETE /api/turfs/{turf_id}/slots/{slot_id}
#[delete("/turfs/{turf_id}/slots/{slot_id}")]
pub async fn remove(
    auth: JwtAuth,
    path: web::Path<(Uuid, Uuid)>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let (turf_id, slot_id) = path.into_inner();
    owned_turf(&db, turf_id, auth.user_id).await?;
    slot_on_turf(&db, turf_id, slot_id).await?;

    slot_repo::delete(&db, turf_id, slot_id)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().body("deleted"))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(list)
        .service(apply_preset)
        .service(create)
        .service(set_availability)
        .service(remove);
}
