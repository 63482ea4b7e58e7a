//! The submit gate as an explicit state machine.
//!
//! ```text
//!            Loaded               Persisted / Skipped
//! Loading ──────────▶ Ready ─────────────────────────▶ Navigating
//!                     │  ▲                                  ▲
//!            Rejected │  │ Cancel                           │ ConfirmLeave
//!                     ▼  │                                  │
//!               ShowingLeaveConfirmation ───────────────────┘
//! ```
//!
//! `PersistFailed` keeps the machine in `Ready`. Every other pair is an
//! invalid transition.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{
    error::{DesignerError, Result},
    form::ValidationError,
};

/// Where the user asked to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Next,
    Back,
    /// A specific step, chosen from the side navigation
    Step(String),
}

impl FromStr for Destination {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "" => Err("Empty destination".to_string()),
            "next" => Ok(Destination::Next),
            "back" => Ok(Destination::Back),
            step => Ok(Destination::Step(step.to_string())),
        }
    }
}

/// A resolved route transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Target step id
    pub step_id: String,
    /// Target route without query
    pub route: String,
    /// Plan the wizard is editing, carried as the `plannerId` query parameter
    pub planner_id: String,
}

impl Navigation {
    /// Route with the `plannerId` query parameter.
    ///
    /// ```rust
    /// use designer_core::wizard::Navigation;
    ///
    /// let nav = Navigation {
    ///     step_id: "partners".to_string(),
    ///     route: "/partners".to_string(),
    ///     planner_id: "p 1".to_string(),
    /// };
    /// assert_eq!(nav.href(), "/partners?plannerId=p%201");
    /// ```
    pub fn href(&self) -> String {
        format!("{}?plannerId={}", self.route, urlencoding::encode(&self.planner_id))
    }
}

/// State of one wizard page visit.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardState {
    /// Waiting for the plan
    Loading,
    /// Form seeded and editable
    Ready,
    /// Leaving the page
    Navigating { to: Navigation, persisted: bool },
    /// Invalid form; asking whether to discard changes and leave anyway
    ShowingLeaveConfirmation {
        to: Navigation,
        errors: Vec<ValidationError>,
    },
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    /// The plan finished loading (or degraded to defaults)
    Loaded,
    /// A valid submit was stored by the backend
    Persisted { to: Navigation },
    /// A valid submit of an optional, all-empty form; nothing was stored
    Skipped { to: Navigation },
    /// Submit failed validation
    Rejected {
        to: Navigation,
        errors: Vec<ValidationError>,
    },
    /// The backend refused or failed the update
    PersistFailed,
    /// Discard changes and leave
    ConfirmLeave,
    /// Stay on the page
    Cancel,
}

impl WizardState {
    /// Short name of the state, for messages.
    pub fn name(&self) -> &'static str {
        match self {
            WizardState::Loading => "loading",
            WizardState::Ready => "ready",
            WizardState::Navigating { .. } => "navigating",
            WizardState::ShowingLeaveConfirmation { .. } => "showing_leave_confirmation",
        }
    }

    /// Where the page is headed, once navigating.
    pub fn navigation(&self) -> Option<&Navigation> {
        match self {
            WizardState::Navigating { to, .. } => Some(to),
            _ => None,
        }
    }
}

impl WizardEvent {
    /// Short name of the event, for messages.
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::Loaded => "loaded",
            WizardEvent::Persisted { .. } => "persisted",
            WizardEvent::Skipped { .. } => "skipped",
            WizardEvent::Rejected { .. } => "rejected",
            WizardEvent::PersistFailed => "persist_failed",
            WizardEvent::ConfirmLeave => "confirm_leave",
            WizardEvent::Cancel => "cancel",
        }
    }
}

/// Computes the state that follows `state` on `event`.
///
/// # Errors
///
/// `DesignerError::InvalidTransition` when the state does not accept the
/// event; the caller keeps its current state.
pub fn transition(state: &WizardState, event: WizardEvent) -> Result<WizardState> {
    use WizardEvent as E;
    use WizardState as S;

    match (state, event) {
        (S::Loading, E::Loaded) => Ok(S::Ready),
        (S::Ready, E::Persisted { to }) => Ok(S::Navigating {
            to,
            persisted: true,
        }),
        (S::Ready, E::Skipped { to }) => Ok(S::Navigating {
            to,
            persisted: false,
        }),
        (S::Ready, E::Rejected { to, errors }) => Ok(S::ShowingLeaveConfirmation { to, errors }),
        (S::Ready, E::PersistFailed) => Ok(S::Ready),
        (S::ShowingLeaveConfirmation { to, .. }, E::ConfirmLeave) => Ok(S::Navigating {
            to: to.clone(),
            persisted: false,
        }),
        (S::ShowingLeaveConfirmation { .. }, E::Cancel) => Ok(S::Ready),
        (state, event) => Err(DesignerError::InvalidTransition {
            state: state.name().to_string(),
            event: event.name().to_string(),
        }),
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardState::Loading => writeln!(f, "Loading plan..."),
            WizardState::Ready => writeln!(f, "Ready for input."),
            WizardState::Navigating { to, persisted } => {
                if *persisted {
                    writeln!(f, "Saved. Continue at {}", to.href())
                } else {
                    writeln!(f, "Continue at {} (nothing saved)", to.href())
                }
            }
            WizardState::ShowingLeaveConfirmation { to, errors } => {
                writeln!(f, "## Save before leaving?")?;
                writeln!(f)?;
                writeln!(f, "The form has errors and was not saved:")?;
                writeln!(f)?;
                for error in errors {
                    writeln!(f, "- {error}")?;
                }
                writeln!(f)?;
                writeln!(
                    f,
                    "Discard the changes and go to {}, or stay on this page.",
                    to.href()
                )
            }
        }
    }
}
