//! Email/password authentication, OTP verification and the signup flow.

use actix_web::{error, get, post, web, HttpResponse, Responder};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use jsonwebtoken::{encode, EncodingKey, Header};
use rand::Rng;
use redis::{AsyncCommands, Client as RedisClient};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use sqlx::PgPool;
use std::env;
use uuid::Uuid;

use crate::config::settings;
use crate::db::models::Role;
use crate::db::{owner_repo, profile_repo};
use crate::db::profile_repo::PgProfileSource;
use crate::resolver::resolve_destination;
use crate::signup::{
    NextStep, OwnerDetails, SignupEffect, SignupFlow, SignupMode, SignupRole,
};

type HmacSha256 = Hmac<Sha256>;

//////////////////////////////////////////////////
// Data structs
//////////////////////////////////////////////////

#[derive(Deserialize)]
pub struct OwnerDetailsBody {
    pub business_name: String,
    pub business_address: String,
    pub gst_number: Option<String>,
}

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    /// "customer" or "turf_owner"; absent until the role picker is answered.
    pub role: Option<String>,
    /// Present only on the owner-details submit.
    pub owner_details: Option<OwnerDetailsBody>,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub user_id: Option<Uuid>,
    /// "choose-role" | "owner-details" | "verify-email" | "complete"
    pub next_step: &'static str,
}

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub role: Role,
}

#[derive(Deserialize)]
pub struct EmailVerifyQuery {
    pub token: String,
}

#[derive(Deserialize)]
pub struct ResendEmailRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct PhoneVerifyRequest {
    pub code: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,  // user_id
    role: String, // profile role
    exp: usize,
}

//////////////////////////////////////////////////
// ─────────────  JwtAuth extractor  ─────────────
//////////////////////////////////////////////////

pub mod extractor {
    use super::Claims;
    use crate::db::models::Role;
    use actix_web::{
        dev::Payload, error::ErrorUnauthorized, FromRequest, HttpRequest, Result as ActixResult,
    };
    use futures_util::future::{ready, Ready};
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use std::env;
    use uuid::Uuid;

    /// Extracts and validates a Bearer-JWT, exposing the user id and role.
    #[derive(Debug, Clone)]
    pub struct JwtAuth {
        pub user_id: Uuid,
        pub role: Role,
    }

    impl JwtAuth {
        pub fn require_admin(&self) -> ActixResult<()> {
            if self.role == Role::Admin {
                Ok(())
            } else {
                Err(actix_web::error::ErrorForbidden("admin only"))
            }
        }

        pub fn require_owner(&self) -> ActixResult<()> {
            if self.role == Role::TurfOwner {
                Ok(())
            } else {
                Err(actix_web::error::ErrorForbidden("turf owners only"))
            }
        }
    }

    impl FromRequest for JwtAuth {
        type Error = actix_web::Error;
        type Future = Ready<ActixResult<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _pl: &mut Payload) -> Self::Future {
            let res = (|| {
                // Expect:  Authorization: Bearer <JWT>
                let hdr = req
                    .headers()
                    .get("Authorization")
                    .and_then(|v| v.to_str().ok())
                    .ok_or_else(|| ErrorUnauthorized("missing Authorization header"))?;

                let token = hdr
                    .strip_prefix("Bearer ")
                    .ok_or_else(|| ErrorUnauthorized("malformed Authorization header"))?;

                let secret =
                    env::var("JWT_SECRET").map_err(|_| ErrorUnauthorized("server mis-config"))?;
                let data = decode::<Claims>(
                    token,
                    &DecodingKey::from_secret(secret.as_bytes()),
                    &Validation::default(),
                )
                .map_err(|_| ErrorUnauthorized("invalid / expired token"))?;

                let user_id =
                    Uuid::parse_str(&data.claims.sub).map_err(|_| ErrorUnauthorized("bad sub"))?;
                let role = Role::parse(&data.claims.role)
                    .ok_or_else(|| ErrorUnauthorized("bad role"))?;

                Ok(JwtAuth { user_id, role })
            })();

            ready(res)
        }
    }
}
pub use extractor::JwtAuth; // <-- makes path crate::http::auth::JwtAuth work

//////////////////////////////////////////////////
// Helpers
//////////////////////////////////////////////////

/// HMAC-SHA256 password digest, hex-encoded.
pub fn digest_password(secret: &str, password: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(password.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Best-effort rewriting of known backend error text into something a user
/// can act on. Unknown errors pass through untouched.
pub fn friendly_auth_message(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("invalid login credentials") || lower.contains("invalid credentials") {
        "Invalid email or password.".to_owned()
    } else if lower.contains("email not confirmed") || lower.contains("not verified") {
        "Please verify your email address before signing in.".to_owned()
    } else if lower.contains("already registered")
        || lower.contains("duplicate")
        || lower.contains("23505")
    {
        "An account with this email already exists. Try signing in instead.".to_owned()
    } else {
        raw.to_owned()
    }
}

/// Submitted OTP codes arrive with whatever whitespace the paste brought
/// along; the stored code never has any.
pub fn otp_matches(stored: &str, submitted: &str) -> bool {
    stored == submitted.trim()
}

/// Mint an HS256 access token carrying the user id and role.
pub fn issue_access_token(user_id: Uuid, role: Role) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let exp = Utc::now()
        .checked_add_signed(Duration::minutes(settings().access_ttl_min))
        .expect("token expiry overflow")
        .timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        role: role.as_str().to_owned(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

async fn store_refresh_token(redis: &RedisClient, user_id: Uuid) -> Option<String> {
    let refresh_token = Uuid::new_v4().to_string();
    match redis.get_multiplexed_async_connection().await {
        Ok(mut conn) => {
            let key = format!("refresh:{refresh_token}");
            let _: () = conn
                .set_ex(&key, user_id.to_string(), settings().refresh_ttl)
                .await
                .unwrap_or(());
            Some(refresh_token)
        }
        Err(_) => None,
    }
}

/// Put a one-time email-verification token in Redis and "send" the link.
/// Delivery itself is the mail worker's problem; we log the link so local
/// runs can complete the flow.
async fn send_email_verification(redis: &RedisClient, user_id: Uuid, email: &str) {
    let token = Uuid::new_v4().to_string();
    if let Ok(mut conn) = redis.get_multiplexed_async_connection().await {
        let key = format!("email_verify:{token}");
        let _: () = conn
            .set_ex(&key, user_id.to_string(), settings().email_token_ttl)
            .await
            .unwrap_or(());
    }
    log::info!(
        "Verification link for {email}:\n  https://your-domain.com/api/auth/email/verify?token={token}"
    );
}

//////////////////////////////////////////////////
// POST /api/auth/signup
//////////////////////////////////////////////////

/// Drives the registration state machine. The client replays its steps on
/// each call: first submit returns `choose-role`, an owner submit without
/// business details returns `owner-details` (no account exists yet), and
/// only the commit transition writes to Postgres.
#[post("/auth/signup")]
pub async fn signup(
    info: web::Json<SignupRequest>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> Result<HttpResponse, actix_web::Error> {
    let mut flow = SignupFlow::new(SignupMode::SignUp);

    let first = flow
        .submit_credentials(&info.email, &info.password, &info.full_name, &info.phone)
        .map_err(|e| error::ErrorBadRequest(e.user_message()))?;
    debug_assert_eq!(first.next, NextStep::ChooseRole);

    let role = match info.role.as_deref() {
        None => {
            return Ok(HttpResponse::Ok().json(SignupResponse {
                user_id: None,
                next_step: "choose-role",
            }))
        }
        Some("customer") => SignupRole::Customer,
        Some("turf_owner") => SignupRole::TurfOwner,
        Some(_) => return Err(error::ErrorBadRequest("unknown role")),
    };

    flow.choose_role(role).map_err(error::ErrorBadRequest)?;

    let transition = match role {
        SignupRole::Customer => flow
            .submit_credentials(&info.email, &info.password, &info.full_name, &info.phone)
            .map_err(|e| error::ErrorBadRequest(e.user_message()))?,
        SignupRole::TurfOwner => {
            let Some(details) = info.owner_details.as_ref() else {
                // Credentials stay in memory only; nothing was persisted.
                return Ok(HttpResponse::Ok().json(SignupResponse {
                    user_id: None,
                    next_step: "owner-details",
                }));
            };
            flow.submit_owner_details(OwnerDetails {
                business_name: details.business_name.clone(),
                business_address: details.business_address.clone(),
                gst_number: details.gst_number.clone(),
            })
            .map_err(error::ErrorBadRequest)?
        }
    };

    let SignupEffect::CreateAccount {
        draft,
        role,
        business,
    } = transition.effect
    else {
        return Err(error::ErrorInternalServerError("signup flow out of sync"));
    };

    let auth_secret =
        env::var("AUTH_SECRET").map_err(|_| error::ErrorInternalServerError("server mis-config"))?;
    let digest = digest_password(&auth_secret, &draft.password);
    let profile_role = match role {
        SignupRole::Customer => Role::Customer,
        SignupRole::TurfOwner => Role::TurfOwner,
    };

    // One transaction: the profile and (for owners) the business record land
    // together or not at all.
    let mut tx = db.begin().await.map_err(error::ErrorInternalServerError)?;
    let user_id = match sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO profiles (email, full_name, phone, role, password_digest)
           VALUES ($1, $2, $3, $4, $5)
           RETURNING id"#,
    )
    .bind(&draft.email)
    .bind(&draft.full_name)
    .bind(&draft.phone)
    .bind(profile_role)
    .bind(&digest)
    .fetch_one(&mut *tx)
    .await
    {
        Ok(id) => id,
        Err(e) => {
            tx.rollback().await.ok();
            let duplicate = matches!(
                &e,
                sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
            );
            return if duplicate {
                Err(error::ErrorConflict(friendly_auth_message(
                    "already registered",
                )))
            } else {
                Err(error::ErrorInternalServerError(e))
            };
        }
    };

    if let Some(b) = business {
        owner_repo::create_for_profile(
            &mut *tx,
            user_id,
            &b.business_name,
            &b.business_address,
            b.gst_number.as_deref(),
        )
        .await
        .map_err(error::ErrorInternalServerError)?;
    }
    tx.commit().await.map_err(error::ErrorInternalServerError)?;

    send_email_verification(&redis, user_id, &draft.email).await;

    let next_step = match transition.next {
        NextStep::VerifyEmail => "verify-email",
        _ => "complete",
    };
    Ok(HttpResponse::Ok().json(SignupResponse {
        user_id: Some(user_id),
        next_step,
    }))
}

//////////////////////////////////////////////////
// POST /api/auth/signin
//////////////////////////////////////////////////
#[post("/auth/signin")]
pub async fn signin(
    info: web::Json<SignInRequest>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> Result<HttpResponse, actix_web::Error> {
    let profile = profile_repo::find_by_email(&db, &info.email)
        .await
        .map_err(error::ErrorInternalServerError)?;

    let auth_secret =
        env::var("AUTH_SECRET").map_err(|_| error::ErrorInternalServerError("server mis-config"))?;

    let Some(profile) = profile else {
        return Err(error::ErrorUnauthorized(friendly_auth_message(
            "invalid credentials",
        )));
    };
    if profile.password_digest != digest_password(&auth_secret, &info.password) {
        return Err(error::ErrorUnauthorized(friendly_auth_message(
            "invalid credentials",
        )));
    }
    if !profile.email_verified {
        return Err(error::ErrorUnauthorized(friendly_auth_message(
            "email not confirmed",
        )));
    }

    let access_token =
        issue_access_token(profile.id, profile.role).map_err(error::ErrorInternalServerError)?;
    let refresh_token = store_refresh_token(&redis, profile.id)
        .await
        .ok_or_else(|| error::ErrorInternalServerError("Redis unavailable"))?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token,
        expires_in: settings().access_ttl_min * 60,
        role: profile.role,
    }))
}

//////////////////////////////////////////////////
// POST /api/auth/refresh
//////////////////////////////////////////////////
#[post("/auth/refresh")]
pub async fn refresh(
    info: web::Json<RefreshRequest>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> Result<HttpResponse, actix_web::Error> {
    // 1) consume old refresh → user_id
    let user_id_str = match redis.get_multiplexed_async_connection().await {
        Ok(mut conn) => {
            let key = format!("refresh:{}", info.refresh_token);
            if let Ok(Some(uid)) = conn.get::<_, Option<String>>(&key).await {
                let _: () = conn.del(&key).await.unwrap_or(());
                uid
            } else {
                return Err(error::ErrorUnauthorized("invalid refresh"));
            }
        }
        Err(_) => return Err(error::ErrorInternalServerError("Redis unavailable")),
    };
    let user_id =
        Uuid::parse_str(&user_id_str).map_err(error::ErrorInternalServerError)?;

    // 2) role lookup (the claim must track role changes)
    let profile = profile_repo::find_by_id(&db, user_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorUnauthorized("unknown user"))?;

    // 3) new token pair
    let access_token =
        issue_access_token(profile.id, profile.role).map_err(error::ErrorInternalServerError)?;
    let refresh_token = store_refresh_token(&redis, profile.id)
        .await
        .ok_or_else(|| error::ErrorInternalServerError("Redis unavailable"))?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        refresh_token,
        expires_in: settings().access_ttl_min * 60,
        role: profile.role,
    }))
}

//////////////////////////////////////////////////
// POST /api/auth/signout
//////////////////////////////////////////////////
#[post("/auth/signout")]
pub async fn signout(
    info: web::Json<RefreshRequest>,
    redis: web::Data<RedisClient>,
) -> impl Responder {
    if let Ok(mut conn) = redis.get_multiplexed_async_connection().await {
        let key = format!("refresh:{}", info.refresh_token);
        let _: () = conn.del(&key).await.unwrap_or(());
    }
    HttpResponse::Ok().body("signed out")
}

//////////////////////////////////////////////////
// Email verification
//////////////////////////////////////////////////

/// Re-send the verification link for an unverified account. Responds 200
/// even for unknown emails so the endpoint cannot be used to probe accounts.
#[post("/auth/email/send")]
pub async fn resend_email(
    info: web::Json<ResendEmailRequest>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> Result<HttpResponse, actix_web::Error> {
    if let Some(profile) = profile_repo::find_by_email(&db, &info.email)
        .await
        .map_err(error::ErrorInternalServerError)?
    {
        if !profile.email_verified {
            send_email_verification(&redis, profile.id, &profile.email).await;
        }
    }
    Ok(HttpResponse::Ok().body("verification email sent"))
}

#[get("/auth/email/verify")]
pub async fn verify_email(
    query: web::Query<EmailVerifyQuery>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> Result<HttpResponse, actix_web::Error> {
    // 1) resolve token → user_id, consuming it
    let user_id_str = match redis.get_multiplexed_async_connection().await {
        Ok(mut conn) => {
            let key = format!("email_verify:{}", query.token);
            if let Ok(Some(uid)) = conn.get::<_, Option<String>>(&key).await {
                let _: () = conn.del(&key).await.unwrap_or(());
                uid
            } else {
                return Err(error::ErrorBadRequest("Invalid or expired token"));
            }
        }
        Err(_) => return Err(error::ErrorInternalServerError("Redis unavailable")),
    };
    let user_id =
        Uuid::parse_str(&user_id_str).map_err(error::ErrorInternalServerError)?;

    profile_repo::set_email_verified(&db, user_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().body("email verified; you can sign in now"))
}

//////////////////////////////////////////////////
// Phone verification
//////////////////////////////////////////////////

#[post("/auth/phone/send")]
pub async fn send_phone_otp(
    auth: JwtAuth,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> Result<HttpResponse, actix_web::Error> {
    let profile = profile_repo::find_by_id(&db, auth.user_id)
        .await
        .map_err(error::ErrorInternalServerError)?
        .ok_or_else(|| error::ErrorUnauthorized("unknown user"))?;

    let code: u32 = rand::rng().random_range(100_000..1_000_000);
    match redis.get_multiplexed_async_connection().await {
        Ok(mut conn) => {
            let key = format!("phone_otp:{}", auth.user_id);
            let _: () = conn
                .set_ex(&key, code.to_string(), settings().phone_otp_ttl)
                .await
                .unwrap_or(());
        }
        Err(_) => return Err(error::ErrorInternalServerError("Redis unavailable")),
    }
    // SMS delivery is out of scope; the code is logged for local runs.
    log::info!("Phone OTP for {} ({}): {code}", profile.phone, auth.user_id);

    Ok(HttpResponse::Ok().body("OTP sent"))
}

/// A mistyped code does not burn the OTP: the key is consumed only on a
/// successful match, and the TTL caps how long guessing stays possible.
#[post("/auth/phone/verify")]
pub async fn verify_phone_otp(
    auth: JwtAuth,
    info: web::Json<PhoneVerifyRequest>,
    db: web::Data<PgPool>,
    redis: web::Data<RedisClient>,
) -> Result<HttpResponse, actix_web::Error> {
    let mut conn = redis
        .get_multiplexed_async_connection()
        .await
        .map_err(|_| error::ErrorInternalServerError("Redis unavailable"))?;

    let key = format!("phone_otp:{}", auth.user_id);
    let stored = match conn.get::<_, Option<String>>(&key).await {
        Ok(Some(code)) => code,
        _ => return Err(error::ErrorBadRequest("Invalid or expired code")),
    };

    if !otp_matches(&stored, &info.code) {
        return Err(error::ErrorBadRequest("Invalid or expired code"));
    }
    let _: () = conn.del(&key).await.unwrap_or(());

    profile_repo::set_phone_verified(&db, auth.user_id)
        .await
        .map_err(error::ErrorInternalServerError)?;

    Ok(HttpResponse::Ok().body("phone verified"))
}

//////////////////////////////////////////////////
// GET /api/auth/destination
//////////////////////////////////////////////////

#[derive(Serialize)]
pub struct DestinationResponse {
    /// `None` when profile resolution failed; the client stays put.
    pub destination: Option<&'static str>,
}

#[get("/auth/destination")]
pub async fn destination(auth: JwtAuth, db: web::Data<PgPool>) -> impl Responder {
    let source = PgProfileSource { db: &db };
    let route = resolve_destination(auth.role, auth.user_id, &source).await;
    HttpResponse::Ok().json(DestinationResponse {
        destination: route.map(|r| r.as_path()),
    })
}

//////////////////////////////////////////////////
// Mount
//////////////////////////////////////////////////
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(signup)
        .service(signin)
        .service(refresh)
        .service(signout)
        .service(resend_email)
        .service(verify_email)
        .service(send_phone_otp)
        .service(verify_phone_otp)
        .service(destination);
}
