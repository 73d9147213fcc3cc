//! Wizard building blocks and the petition wizard.

pub mod navigation;
pub mod petition;
pub mod print_step;

pub use navigation::{NavAction, StepStatus, WizardNav, WizardStep};
pub use petition::{PetitionWizard, WizardEvent};
pub use print_step::PrintAction;
