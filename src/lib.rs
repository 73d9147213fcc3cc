pub mod config;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod models;
pub mod parish_settings;
pub mod service;
pub mod ui;
pub mod wizard;

pub use error::{AppError, Result};
