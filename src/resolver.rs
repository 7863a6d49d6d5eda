//! Post-login destination resolution.
//!
//! Runs on every auth event where the user and their role are known, and
//! decides which page the client should land on. Backed by a trait so the
//! routing rules test without Postgres.

use crate::db::models::Role;
use uuid::Uuid;

/// Client-side destinations the resolver can pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    OwnerDashboard,
    AdminDashboard,
    PhoneVerification,
    ProfileSetup,
    FindPlayers,
}

impl Route {
    pub fn as_path(self) -> &'static str {
        match self {
            Route::OwnerDashboard => "/owner-dashboard",
            Route::AdminDashboard => "/admin-dashboard",
            Route::PhoneVerification => "/verify-phone",
            Route::ProfileSetup => "/profile-setup",
            Route::FindPlayers => "/find-players",
        }
    }
}

/// Failure modes of a profile fetch. `NotFound` is an expected state (fresh
/// account, profile row not written yet); anything else is a backend fault.
#[derive(Debug)]
pub enum FetchError {
    NotFound,
    Backend(anyhow::Error),
}

/// Discovery-relevant subset of a customer profile.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryProfile {
    pub age: Option<i32>,
    pub location: Option<String>,
}

impl DiscoveryProfile {
    /// Both fields must be set before the user can browse other players.
    pub fn is_complete(&self) -> bool {
        self.age.is_some() && self.location.as_deref().is_some_and(|l| !l.is_empty())
    }
}

/// Profile reads the resolver needs.
pub trait ProfileSource {
    async fn phone_verified(&self, user: Uuid) -> Result<bool, FetchError>;
    async fn discovery_profile(&self, user: Uuid) -> Result<DiscoveryProfile, FetchError>;
}

/// Resolve where a just-authenticated user should go.
///
/// Owners always land on their dashboard. Customers are walked through phone
/// verification and profile setup before reaching player discovery. A fetch
/// failure other than not-found is logged and yields `None`: the caller
/// performs no redirect and the user stays where they are.
pub async fn resolve_destination<S: ProfileSource>(
    role: Role,
    user: Uuid,
    source: &S,
) -> Option<Route> {
    match role {
        Role::TurfOwner => return Some(Route::OwnerDashboard),
        Role::Admin => return Some(Route::AdminDashboard),
        Role::Customer => {}
    }

    let verified = match source.phone_verified(user).await {
        Ok(v) => v,
        // No row yet means verification never happened.
        Err(FetchError::NotFound) => false,
        Err(FetchError::Backend(e)) => {
            log::error!("resolver: phone_verified fetch failed for {user}: {e:?}");
            return None;
        }
    };
    if !verified {
        return Some(Route::PhoneVerification);
    }

    let profile = match source.discovery_profile(user).await {
        Ok(p) => p,
        Err(FetchError::NotFound) => DiscoveryProfile::default(),
        Err(FetchError::Backend(e)) => {
            log::error!("resolver: profile fetch failed for {user}: {e:?}");
            return None;
        }
    };

    if profile.is_complete() {
        Some(Route::FindPlayers)
    } else {
        Some(Route::ProfileSetup)
    }
}
