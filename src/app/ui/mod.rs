//! eframe user interface.
//!
//! - [`app`] - main window: search bar, profile dropdown and job list
//! - [`profile_dropdown`] - profile chooser, hidden with fewer than two profiles
//! - [`run_job_window`] - run-job form with inline validation

pub mod app;
pub mod profile_dropdown;
pub mod run_job_window;

pub use app::LauncherApp;
