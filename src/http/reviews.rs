//! Ratings tied to completed bookings.

use actix_web::{error, get, post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::BookingStatus;
use crate::db::{booking_repo, review_repo};
use crate::http::auth::JwtAuth;

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub booking_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
}

/// POST /api/reviews — one review per completed booking by convention; the
/// unique index on `booking_id` backs the convention up.
#[post("/reviews")]
pub async fn create(
    auth: JwtAuth,
    info: web::Json<CreateReviewRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    if !(1..=5).contains(&info.rating) {
        return Err(error::ErrorBadRequest("rating must be 1-5"));
    }

    let booking = booking_repo::find(&db, info.booking_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("booking not found"))?;
    if booking.user_id != auth.user_id {
        return Err(error::ErrorForbidden("not your booking"));
    }
    if booking.status != BookingStatus::Completed {
        return Err(error::ErrorBadRequest("only completed bookings can be reviewed"));
    }

    let review_id = review_repo::create(
        &db,
        booking.id,
        booking.turf_id,
        auth.user_id,
        info.rating,
        info.comment.as_deref(),
    )
    .await
    .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(json!({ "review_id": review_id })))
}

/// GET /api/turfs/{id}/reviews
#[get("/turfs/{id}/reviews")]
pub async fn for_turf(path: web::Path<Uuid>, db: web::Data<PgPool>) -> Result<HttpResponse, actix_web::Error> {
    let rows = review_repo::list_for_turf(&db, path.into_inner())
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(rows))
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(create).service(for_turf);
}
