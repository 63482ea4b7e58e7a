//! The step wizard: submit gate state machine and page controller.

pub mod controller;
pub mod notice;
pub mod state;

pub use controller::WizardController;
pub use notice::Notice;
pub use state::{transition, Destination, Navigation, WizardEvent, WizardState};
