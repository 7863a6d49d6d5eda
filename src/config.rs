//! Runtime configuration for the TurfConnect server.

use once_cell::sync::Lazy;
use std::env;

#[derive(Debug)]
pub struct Settings {
    /// Access-token lifetime (minutes).
    pub access_ttl_min: i64,
    /// Refresh-token lifetime in Redis (seconds).
    pub refresh_ttl: u64,
    /// Email-verification token TTL (seconds).
    pub email_token_ttl: u64,
    /// Phone OTP TTL (seconds).
    pub phone_otp_ttl: u64,
    /// Player-availability key TTL (seconds).
    pub availability_ttl: u64,
}

impl Settings {
    fn from_env() -> Self {
        let access_ttl_min = env::var("ACCESS_TTL_MIN")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(15);

        let refresh_ttl = env::var("REFRESH_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(30 * 24 * 3_600);

        let email_token_ttl = env::var("EMAIL_TOKEN_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(15 * 60);

        let phone_otp_ttl = env::var("PHONE_OTP_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5 * 60);

        let availability_ttl = env::var("AVAILABILITY_TTL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(600);

        Settings {
            access_ttl_min,
            refresh_ttl,
            email_token_ttl,
            phone_otp_ttl,
            availability_ttl,
        }
    }
}

static SETTINGS: Lazy<Settings> = Lazy::new(Settings::from_env);

pub fn settings() -> &'static Settings {
    &SETTINGS
}
