//! Ordering guarantees of the registration state machine, in particular the
//! deferred account creation for turf owners.

use turfconnect_server::signup::{
    NextStep, OwnerDetails, SignupEffect, SignupFlow, SignupMode, SignupRole, Stage,
};
use turfconnect_server::validation::FieldError;

fn owner_details() -> OwnerDetails {
    OwnerDetails {
        business_name: "Green Fields Arena".into(),
        business_address: "12 MG Road".into(),
        gst_number: Some("29ABCDE1234F1Z5".into()),
    }
}

fn submit(flow: &mut SignupFlow) -> Result<turfconnect_server::signup::Transition, FieldError> {
    flow.submit_credentials("jane@example.com", "hunter22", "Jane Doe", "9876543210")
}

#[test]
fn invalid_fields_block_in_credentials_stage() {
    let mut flow = SignupFlow::new(SignupMode::SignUp);
    let err = flow
        .submit_credentials("jane@example.com", "hunter22", "", "9876543210")
        .unwrap_err();
    assert_eq!(err, FieldError::MissingName);
    assert_eq!(flow.stage(), Stage::Credentials);

    let err = flow
        .submit_credentials("jane@example.com", "hunter22", "Jane Doe", "123")
        .unwrap_err();
    assert_eq!(err, FieldError::InvalidPhone);
    assert_eq!(flow.stage(), Stage::Credentials);
}

#[test]
fn first_valid_submit_asks_for_role_without_side_effects() {
    let mut flow = SignupFlow::new(SignupMode::SignUp);
    let t = submit(&mut flow).unwrap();
    assert_eq!(t.effect, SignupEffect::None);
    assert_eq!(t.next, NextStep::ChooseRole);
    assert_eq!(flow.stage(), Stage::RolePicker);
}

#[test]
fn customer_path_commits_on_second_submit() {
    let mut flow = SignupFlow::new(SignupMode::SignUp);
    submit(&mut flow).unwrap();

    let t = flow.choose_role(SignupRole::Customer).unwrap();
    assert_eq!(t.effect, SignupEffect::None, "role pick must not create accounts");
    assert_eq!(flow.stage(), Stage::Credentials);

    let t = submit(&mut flow).unwrap();
    match t.effect {
        SignupEffect::CreateAccount {
            draft,
            role,
            business,
        } => {
            assert_eq!(role, SignupRole::Customer);
            assert_eq!(draft.email, "jane@example.com");
            assert!(business.is_none());
        }
        other => panic!("expected CreateAccount, got {other:?}"),
    }
    assert_eq!(t.next, NextStep::VerifyEmail);
    assert_eq!(flow.stage(), Stage::Complete);
}

#[test]
fn owner_path_defers_creation_until_details_submit() {
    let mut flow = SignupFlow::new(SignupMode::SignUp);
    submit(&mut flow).unwrap();

    // Role pick carries the draft forward but performs no external call.
    let t = flow.choose_role(SignupRole::TurfOwner).unwrap();
    assert_eq!(t.effect, SignupEffect::None);
    assert_eq!(t.next, NextStep::OwnerDetails);
    assert_eq!(flow.stage(), Stage::OwnerDetails);

    // The commit happens here and only here.
    let t = flow.submit_owner_details(owner_details()).unwrap();
    match t.effect {
        SignupEffect::CreateAccount {
            draft,
            role,
            business,
        } => {
            assert_eq!(role, SignupRole::TurfOwner);
            assert_eq!(draft.full_name, "Jane Doe");
            assert_eq!(business.unwrap().business_name, "Green Fields Arena");
        }
        other => panic!("expected CreateAccount, got {other:?}"),
    }
    assert_eq!(t.next, NextStep::Done);
    assert_eq!(flow.stage(), Stage::Complete);
}

#[test]
fn owner_details_out_of_order_is_rejected() {
    let mut flow = SignupFlow::new(SignupMode::SignUp);
    assert!(flow.submit_owner_details(owner_details()).is_err());

    submit(&mut flow).unwrap();
    // Still in RolePicker: no details accepted yet.
    assert!(flow.submit_owner_details(owner_details()).is_err());
}

#[test]
fn role_pick_requires_role_picker_stage() {
    let mut flow = SignupFlow::new(SignupMode::SignUp);
    assert!(flow.choose_role(SignupRole::Customer).is_err());
}

#[test]
fn mode_toggle_resets_transient_state() {
    let mut flow = SignupFlow::new(SignupMode::SignUp);
    submit(&mut flow).unwrap();
    flow.choose_role(SignupRole::TurfOwner).unwrap();
    assert_eq!(flow.stage(), Stage::OwnerDetails);

    flow.set_mode(SignupMode::SignIn);
    assert_eq!(flow.stage(), Stage::Credentials);
    assert_eq!(flow.chosen_role(), None);

    // Switching back does not resurrect the abandoned draft.
    flow.set_mode(SignupMode::SignUp);
    assert!(flow.submit_owner_details(owner_details()).is_err());
}
