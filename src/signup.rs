//! Multi-step registration flow.
//!
//! Owner sign-ups are deliberately two-phase: credentials are held in a
//! transient [`Draft`] and the account-creation side effect is deferred until
//! the business-details form is submitted, so an abandoned owner form never
//! leaves a dangling auth account behind. Transitions return a
//! [`SignupEffect`] instead of calling the backend directly; the HTTP layer
//! interprets effects, which keeps the ordering guarantee testable.

use crate::validation::{check_signup_fields, FieldError};
use std::fmt;

/// Sign-in vs sign-up toggle on the auth form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupMode {
    SignIn,
    SignUp,
}

/// Where the flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Email/password/name/phone form.
    Credentials,
    /// Role picker (sign-up only).
    RolePicker,
    /// Business-details form for turf owners.
    OwnerDetails,
    /// Terminal; a manual action returns the user home.
    Complete,
}

/// Role chosen during sign-up. Admins are never self-registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupRole {
    Customer,
    TurfOwner,
}

/// Credentials held in memory only, never persisted until commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
}

/// Business details captured on the owner form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerDetails {
    pub business_name: String,
    pub business_address: String,
    pub gst_number: Option<String>,
}

/// External side effect the caller must perform after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SignupEffect {
    None,
    /// The one irreversible call: create the auth account (and, for owners,
    /// the linked business record) in a single commit.
    CreateAccount {
        draft: Draft,
        role: SignupRole,
        business: Option<OwnerDetails>,
    },
}

/// Where the UI should take the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Stay on the credentials form (e.g. after picking "customer").
    Stay,
    ChooseRole,
    OwnerDetails,
    /// Account created; email OTP pending.
    VerifyEmail,
    Done,
}

/// One transition's outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub effect: SignupEffect,
    pub next: NextStep,
}

impl Transition {
    fn stay(next: NextStep) -> Self {
        Transition {
            effect: SignupEffect::None,
            next,
        }
    }
}

/// A transition was attempted from the wrong stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutOfOrder {
    pub stage: Stage,
}

impl fmt::Display for OutOfOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "signup step not valid from stage {:?}", self.stage)
    }
}

impl std::error::Error for OutOfOrder {}

/// The registration state machine.
#[derive(Debug, Clone)]
pub struct SignupFlow {
    mode: SignupMode,
    stage: Stage,
    draft: Option<Draft>,
    role: Option<SignupRole>,
}

impl SignupFlow {
    pub fn new(mode: SignupMode) -> Self {
        SignupFlow {
            mode,
            stage: Stage::Credentials,
            draft: None,
            role: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn mode(&self) -> SignupMode {
        self.mode
    }

    pub fn chosen_role(&self) -> Option<SignupRole> {
        self.role
    }

    /// Toggling sign-in/sign-up resets every piece of transient state.
    pub fn set_mode(&mut self, mode: SignupMode) {
        self.mode = mode;
        self.stage = Stage::Credentials;
        self.draft = None;
        self.role = None;
    }

    /// Sign-up submit from the credentials form. Validation failures keep the
    /// flow in `Credentials` and surface an inline message; nothing leaves
    /// the process.
    pub fn submit_credentials(
        &mut self,
        email: &str,
        password: &str,
        full_name: &str,
        phone: &str,
    ) -> Result<Transition, FieldError> {
        debug_assert_eq!(self.mode, SignupMode::SignUp);
        check_signup_fields(full_name, phone)?;

        let draft = Draft {
            email: email.trim().to_owned(),
            password: password.to_owned(),
            full_name: full_name.trim().to_owned(),
            phone: phone.trim().to_owned(),
        };

        match self.role {
            None => {
                // First valid submit: hold the draft and ask for a role.
                self.draft = Some(draft);
                self.stage = Stage::RolePicker;
                Ok(Transition::stay(NextStep::ChooseRole))
            }
            Some(SignupRole::Customer) => {
                // Role already picked; this submit commits the account.
                self.stage = Stage::Complete;
                self.draft = None;
                Ok(Transition {
                    effect: SignupEffect::CreateAccount {
                        draft,
                        role: SignupRole::Customer,
                        business: None,
                    },
                    next: NextStep::VerifyEmail,
                })
            }
            Some(SignupRole::TurfOwner) => {
                // Owners never commit from here; send them to the business form.
                self.draft = Some(draft);
                self.stage = Stage::OwnerDetails;
                Ok(Transition::stay(NextStep::OwnerDetails))
            }
        }
    }

    /// Role selection. Produces no effect in either branch.
    pub fn choose_role(&mut self, role: SignupRole) -> Result<Transition, OutOfOrder> {
        if self.stage != Stage::RolePicker {
            return Err(OutOfOrder { stage: self.stage });
        }
        self.role = Some(role);
        match role {
            SignupRole::Customer => {
                self.stage = Stage::Credentials;
                Ok(Transition::stay(NextStep::Stay))
            }
            SignupRole::TurfOwner => {
                self.stage = Stage::OwnerDetails;
                Ok(Transition::stay(NextStep::OwnerDetails))
            }
        }
    }

    /// Owner-form submit: the deferred commit happens here, with the draft
    /// and business payload in one effect.
    pub fn submit_owner_details(
        &mut self,
        details: OwnerDetails,
    ) -> Result<Transition, OutOfOrder> {
        if self.stage != Stage::OwnerDetails {
            return Err(OutOfOrder { stage: self.stage });
        }
        let draft = self.draft.take().ok_or(OutOfOrder { stage: self.stage })?;
        self.stage = Stage::Complete;
        Ok(Transition {
            effect: SignupEffect::CreateAccount {
                draft,
                role: SignupRole::TurfOwner,
                business: Some(details),
            },
            next: NextStep::Done,
        })
    }
}
