use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    TurfOwner,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::TurfOwner => "turf_owner",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "customer" => Some(Role::Customer),
            "turf_owner" => Some(Role::TurfOwner),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "verification_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "approval_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "booking_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_digest: String,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub age: Option<i32>,
    pub location: Option<String>,
    pub preferred_sports: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TurfOwner {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub business_name: String,
    pub business_address: String,
    pub gst_number: Option<String>,
    pub verification_status: VerificationStatus,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Turf {
    pub id: Uuid,
    /// `None` until an owner claims the venue.
    pub owner_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub address: String,
    pub hourly_rate: f64,
    pub weekend_premium_pct: f64,
    pub peak_hour_premium_pct: f64,
    pub sports: Vec<String>,
    pub amenities: Vec<String>,
    pub approval_status: ApprovalStatus,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TurfSlot {
    pub id: Uuid,
    pub turf_id: Uuid,
    /// 0 = Sunday … 6 = Saturday.
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub duration_minutes: i32,
    pub price: f64,
    pub is_available: bool,
}

impl TurfSlot {
    /// Guard for every handler that takes a turf id and a slot id from the
    /// path: the slot must actually hang off that turf.
    pub fn belongs_to(&self, turf_id: Uuid) -> bool {
        self.turf_id == turf_id
    }

    /// Whether this weekly slot runs on the given calendar date.
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        i32::from(self.day_of_week) == date.weekday().num_days_from_sunday() as i32
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub turf_id: Uuid,
    pub user_id: Uuid,
    pub slot_id: Option<Uuid>,
    pub booking_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub hours: f64,
    pub base_amount: f64,
    pub premium_charges: f64,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub turf_id: Uuid,
    pub user_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}
