//! Turf catalogue, owner management and admin approval.

use actix_web::{error, get, post, web, HttpResponse, Responder};
use redis::Client as RedisClient;
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::{ApprovalStatus, VerificationStatus};
use crate::db::{owner_repo, profile_repo, turf_repo};
use crate::http::auth::JwtAuth;
use crate::notify;

#[derive(Deserialize)]
pub struct ListQuery {
    pub sport: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateTurfRequest {
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub hourly_rate: f64,
    pub sports: Vec<String>,
    pub amenities: Vec<String>,
}

#[derive(Deserialize)]
pub struct SetActiveRequest {
    pub is_active: bool,
}

#[derive(Deserialize)]
pub struct ApproveRequest {
    pub turf_id: Option<Uuid>,
    pub owner_id: Uuid,
    /// "approve" or "reject"
    pub action: String,
    pub rejection_reason: Option<String>,
}

/// GET /api/turfs — public catalogue.
#[get("/turfs")]
pub async fn list(query: web::Query<ListQuery>, db: web::Data<PgPool>) -> impl Responder {
    match turf_repo::list_public(&db, query.sport.as_deref()).await {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => {
            log::error!("turf list failed: {e:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// GET /api/turfs/{id}
#[get("/turfs/{id}")]
pub async fn detail(path: web::Path<Uuid>, db: web::Data<PgPool>) -> Result<HttpResponse, actix_web::Error> {
    let turf = turf_repo::find(&db, path.into_inner())
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("turf not found"))?;
    Ok(HttpResponse::Ok().json(turf))
}

/// GET /api/turfs/unclaimed — seeded venues waiting for an owner.
#[get("/turfs/unclaimed")]
pub async fn unclaimed(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let rows = turf_repo::list_unclaimed(&db)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/turfs/mine — the owner's own venues, any approval state.
#[get("/turfs/mine")]
pub async fn mine(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let rows = turf_repo::list_by_owner(&db, auth.user_id)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/turfs — owner submits a new venue (status: pending).
///
/// The approval notification is fire-and-forget: if the dispatch fails the
/// turf is still created and the caller still gets a success response.
#[post("/turfs")]
pub async fn create(
    auth: JwtAuth,
    info: web::Json<CreateTurfRequest>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    if info.hourly_rate <= 0.0 {
        return Err(error::ErrorBadRequest("hourly_rate must be > 0"));
    }

    let turf_id = turf_repo::create(
        &db,
        auth.user_id,
        &info.name,
        info.description.as_deref(),
        &info.address,
        info.hourly_rate,
        &info.sports,
        &info.amenities,
    )
    .await
    .map_err(error::ErrorInternalServerError)?;

    if let Ok(Some(profile)) = profile_repo::find_by_id(&db, auth.user_id).await {
        if let Err(e) = notify::send_turf_approval_email(
            &redis,
            turf_id,
            &info.name,
            &profile.email,
            &profile.full_name,
        )
        .await
        {
            log::warn!("approval email for turf {turf_id} not sent: {e:?}");
        }
    }

    Ok(HttpResponse::Ok().json(json!({ "turf_id": turf_id, "approval_status": "pending" })))
}

/// POST /api/turfs/{id}/claim — take over an unowned venue.
#[post("/turfs/{id}/claim")]
pub async fn claim(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let turf_id = path.into_inner();

    let won = turf_repo::claim(&db, turf_id, auth.user_id)
        .await
        .map_err(error::ErrorInternalServerError)?;
    if won {
        Ok(HttpResponse::Ok().json(json!({ "turf_id": turf_id })))
    } else {
        Ok(HttpResponse::Conflict().body("turf already claimed"))
    }
}

/// POST /api/turfs/{id}/active — owner toggles visibility.
#[post("/turfs/{id}/active")]
pub async fn set_active(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<SetActiveRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let updated = turf_repo::set_active(&db, path.into_inner(), auth.user_id, info.is_active)
        .await
        .map_err(error::ErrorInternalServerError)?;
    if updated {
        Ok(HttpResponse::Ok().body("updated"))
    } else {
        Err(error::ErrorNotFound("turf not found or not yours"))
    }
}

/// POST /api/admin/approve-turf — admin decision on a submission.
///
/// Approving also marks the owner's business record verified; rejecting
/// records the reason on the owner record.
#[post("/admin/approve-turf")]
pub async fn approve(
    auth: JwtAuth,
    info: web::Json<ApproveRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    auth.require_admin()?;

    let (approval, verification) = match info.action.as_str() {
        "approve" => (ApprovalStatus::Approved, VerificationStatus::Verified),
        "reject" => (ApprovalStatus::Rejected, VerificationStatus::Rejected),
        _ => return Err(error::ErrorBadRequest("action must be approve or reject")),
    };

    if let Some(turf_id) = info.turf_id {
        turf_repo::set_approval(&db, turf_id, approval)
            .await
            .map_err(error::ErrorInternalServerError)?;
    }

    owner_repo::set_verification(
        &db,
        info.owner_id,
        verification,
        info.rejection_reason.as_deref(),
    )
    .await
    .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().body("decision recorded"))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // Literal paths before `{id}` so "unclaimed"/"mine" don't parse as UUIDs.
    cfg.service(unclaimed)
        .service(mine)
        .service(list)
        .service(detail)
        .service(create)
        .service(claim)
        .service(set_active)
        .service(approve);
}
