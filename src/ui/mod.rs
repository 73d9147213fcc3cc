//! GUI panels and application state.

pub mod app;
pub mod components;
pub mod dashboard;
pub mod parish_panel;
pub mod petition_panel;
pub mod print_step;
pub mod setup_wizard;
pub mod wizard_nav;

pub use app::App;
pub use setup_wizard::{SetupApp, SetupWizard};
