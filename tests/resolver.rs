//! Post-login routing rules against a scripted profile source.

use turfconnect_server::db::models::Role;
use turfconnect_server::resolver::{
    resolve_destination, DiscoveryProfile, FetchError, ProfileSource, Route,
};
use uuid::Uuid;

/// Scripted source: each call returns whatever the test staged.
struct Scripted {
    phone_verified: Result<bool, &'static str>,
    profile: Result<DiscoveryProfile, &'static str>,
}

impl Scripted {
    fn verified_with(age: Option<i32>, location: Option<&str>) -> Self {
        Scripted {
            phone_verified: Ok(true),
            profile: Ok(DiscoveryProfile {
                age,
                location: location.map(str::to_owned),
            }),
        }
    }
}

impl ProfileSource for Scripted {
    async fn phone_verified(&self, _user: Uuid) -> Result<bool, FetchError> {
        self.phone_verified
            .map_err(|m| FetchError::Backend(anyhow::anyhow!(m)))
    }

    async fn discovery_profile(&self, _user: Uuid) -> Result<DiscoveryProfile, FetchError> {
        match &self.profile {
            Ok(p) => Ok(p.clone()),
            Err(m) => Err(FetchError::Backend(anyhow::anyhow!(*m))),
        }
    }
}

#[actix_rt::test]
async fn owner_always_lands_on_dashboard() {
    // Phone/profile state must not matter for owners; a source that would
    // fail proves it is never consulted.
    let source = Scripted {
        phone_verified: Err("must not be called"),
        profile: Err("must not be called"),
    };
    let route = resolve_destination(Role::TurfOwner, Uuid::new_v4(), &source).await;
    assert_eq!(route, Some(Route::OwnerDashboard));
}

#[actix_rt::test]
async fn admin_lands_on_admin_dashboard() {
    let source = Scripted {
        phone_verified: Err("must not be called"),
        profile: Err("must not be called"),
    };
    let route = resolve_destination(Role::Admin, Uuid::new_v4(), &source).await;
    assert_eq!(route, Some(Route::AdminDashboard));
}

#[actix_rt::test]
async fn unverified_customer_goes_to_phone_verification() {
    let source = Scripted {
        phone_verified: Ok(false),
        profile: Ok(DiscoveryProfile::default()),
    };
    let route = resolve_destination(Role::Customer, Uuid::new_v4(), &source).await;
    assert_eq!(route, Some(Route::PhoneVerification));
}

#[actix_rt::test]
async fn verified_customer_without_discovery_profile_goes_to_setup() {
    let source = Scripted::verified_with(None, Some("Mumbai"));
    let route = resolve_destination(Role::Customer, Uuid::new_v4(), &source).await;
    assert_eq!(route, Some(Route::ProfileSetup));

    let source = Scripted::verified_with(Some(27), None);
    let route = resolve_destination(Role::Customer, Uuid::new_v4(), &source).await;
    assert_eq!(route, Some(Route::ProfileSetup));
}

#[actix_rt::test]
async fn complete_customer_goes_to_find_players() {
    let source = Scripted::verified_with(Some(27), Some("Mumbai"));
    let route = resolve_destination(Role::Customer, Uuid::new_v4(), &source).await;
    assert_eq!(route, Some(Route::FindPlayers));
}

#[actix_rt::test]
async fn backend_fault_yields_no_redirect() {
    let source = Scripted {
        phone_verified: Err("connection reset"),
        profile: Ok(DiscoveryProfile::default()),
    };
    let route = resolve_destination(Role::Customer, Uuid::new_v4(), &source).await;
    assert_eq!(route, None, "user stays on the current page");

    let source = Scripted {
        phone_verified: Ok(true),
        profile: Err("connection reset"),
    };
    let route = resolve_destination(Role::Customer, Uuid::new_v4(), &source).await;
    assert_eq!(route, None);
}

#[actix_rt::test]
async fn empty_location_counts_as_incomplete() {
    let source = Scripted::verified_with(Some(27), Some(""));
    let route = resolve_destination(Role::Customer, Uuid::new_v4(), &source).await;
    assert_eq!(route, Some(Route::ProfileSetup));
}
