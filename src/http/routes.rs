use crate::http;
use actix_web::web;

/// Mount every HTTP sub-module under `/api`.
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(http::auth::init_routes)
            .configure(http::turfs::init_routes)
            .configure(http::slots::init_routes)
            .configure(http::bookings::init_routes)
            .configure(http::reviews::init_routes)
            .configure(http::players::init_routes)
            .configure(http::owners::init_routes)
            .configure(http::health::init_routes),
    );
}
