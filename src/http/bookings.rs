//! Booking creation and lifecycle.

use actix_web::{error, get, post, web, HttpResponse};
use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::models::BookingStatus;
use crate::db::{booking_repo, slot_repo, turf_repo};
use crate::http::auth::JwtAuth;
use crate::pricing::{self, PricingInput};

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub turf_id: Uuid,
    pub booking_date: NaiveDate,
    /// Slot mode: the chosen predefined slot.
    pub slot_id: Option<Uuid>,
    /// Hourly mode: free-form same-day times, e.g. "10:00".
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Deserialize)]
pub struct QuoteQuery {
    pub turf_id: Uuid,
    pub booking_date: Option<NaiveDate>,
    pub slot_id: Option<Uuid>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

#[derive(Deserialize)]
pub struct StatusRequest {
    pub status: BookingStatus,
}

/// GET /api/bookings/quote — the synchronous recompute behind the booking
/// form. No quote means the submit button stays disabled.
#[get("/bookings/quote")]
pub async fn quote(
    query: web::Query<QuoteQuery>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    let q = compute_quote(
        &db,
        query.turf_id,
        query.booking_date,
        query.slot_id,
        query.start_time.as_deref(),
        query.end_time.as_deref(),
    )
    .await?;
    match q {
        Some((quoted, ..)) => Ok(HttpResponse::Ok().json(quoted)),
        None => Ok(HttpResponse::Ok().json(json!(null))),
    }
}

/// POST /api/bookings
#[post("/bookings")]
pub async fn create(
    auth: JwtAuth,
    info: web::Json<CreateBookingRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    let computed = compute_quote(
        &db,
        info.turf_id,
        Some(info.booking_date),
        info.slot_id,
        info.start_time.as_deref(),
        info.end_time.as_deref(),
    )
    .await?
    .ok_or_else(|| error::ErrorBadRequest("end time must be after start time"))?;
    let (quoted, start, end) = computed;

    let booking_id = booking_repo::create(
        &db,
        info.turf_id,
        auth.user_id,
        info.slot_id,
        info.booking_date,
        start,
        end,
        quoted,
    )
    .await
    .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().json(json!({
        "booking_id": booking_id,
        "total_amount": quoted.total_amount,
        "status": "pending",
    })))
}

/// GET /api/bookings/mine
#[get("/bookings/mine")]
pub async fn mine(auth: JwtAuth, db: web::Data<PgPool>) -> Result<HttpResponse, actix_web::Error> {
    let rows = booking_repo::list_for_user(&db, auth.user_id)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/turfs/{id}/bookings — owner view.
#[get("/turfs/{id}/bookings")]
pub async fn for_turf(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let turf_id = path.into_inner();
    let turf = turf_repo::find(&db, turf_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("turf not found"))?;
    if turf.owner_id != Some(auth.user_id) {
        return Err(error::ErrorForbidden("not your turf"));
    }

    let rows = booking_repo::list_for_turf(&db, turf_id)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().json(rows))
}

/// POST /api/bookings/{id}/status — owner transitions a booking.
#[post("/bookings/{id}/status")]
pub async fn set_status(
    auth: JwtAuth,
    path: web::Path<Uuid>,
    info: web::Json<StatusRequest>,
    db: web::Data<PgPool>,
) -> Result<HttpResponse, actix_web::Error> {
    auth.require_owner()?;
    let booking_id = path.into_inner();

    let booking = booking_repo::find(&db, booking_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("booking not found"))?;
    let turf = turf_repo::find(&db, booking.turf_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorNotFound("turf not found"))?;
    if turf.owner_id != Some(auth.user_id) {
        return Err(error::ErrorForbidden("not your turf"));
    }

    if !allowed_transition(booking.status, info.status) {
        return Err(error::ErrorBadRequest("invalid status transition"));
    }

    booking_repo::set_status(&db, booking_id, info.status)
        .await
        .map_err(error::ErrorInternalServerError)?;
    Ok(HttpResponse::Ok().body("updated"))
}

/// pending → confirmed → completed, with cancellation allowed until the
/// booking is completed.
fn allowed_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed) | (Confirmed, Completed) | (Pending, Cancelled) | (Confirmed, Cancelled)
    )
}

/// Shared pricing path for quote preview and booking creation. Returns the
/// quote plus the resolved start/end times, or `None` when the hourly range
/// is unusable.
async fn compute_quote(
    db: &PgPool,
    turf_id: Uuid,
    booking_date: Option<NaiveDate>,
    slot_id: Option<Uuid>,
    start: Option<&str>,
    end: Option<&str>,
) -> Result<Option<(pricing::Quote, chrono::NaiveTime, chrono::NaiveTime)>, actix_web::Error> {
    if let Some(slot_id) = slot_id {
        let slot = slot_repo::find(db, slot_id)
            .await
            .map_err(error::ErrorInternalServerError)?
            .ok_or_else(|| error::ErrorBadRequest("unknown slot"))?;
        if !slot.belongs_to(turf_id) {
            return Err(error::ErrorBadRequest("slot does not belong to this turf"));
        }
        if !slot.is_available {
            return Err(error::ErrorBadRequest("slot is unavailable"));
        }
        // A weekly slot only runs on dates falling on its weekday.
        if let Some(date) = booking_date {
            if !slot.occurs_on(date) {
                return Err(error::ErrorBadRequest("slot does not run on that date"));
            }
        }

        let quoted = pricing::slot_quote(slot.duration_minutes, slot.price);
        let end = slot.start_time + Duration::minutes(i64::from(slot.duration_minutes));
        return Ok(Some((quoted, slot.start_time, end)));
    }

    let (Some(start), Some(end)) = (start, end) else {
        return Err(error::ErrorBadRequest(
            "either slot_id or start_time/end_time is required",
        ));
    };

    let turf = turf_repo::find(db, turf_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorBadRequest("unknown turf"))?;

    let quoted = pricing::quote(PricingInput::Hourly {
        hourly_rate: turf.hourly_rate,
        start,
        end,
    });
    match quoted {
        Some(q) => {
            // Both parses succeeded if a quote came back.
            let start = pricing::parse_clock(start).expect("validated above");
            let end = pricing::parse_clock(end).expect("validated above");
            Ok(Some((q, start, end)))
        }
        None => Ok(None),
    }
}

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(quote)
        .service(mine)
        .service(create)
        .service(for_turf)
        .service(set_status);
}
