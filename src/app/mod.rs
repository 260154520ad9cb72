//! Core application modules for Glue Launcher.
//!
//! # Module Organization
//!
//! ## AWS Integration
//! - [`profiles`] - Shared config reading, profile resolution, sticky selection and context publication
//! - [`glue`] - Job-run argument parsing, form validation and the Glue SDK collaborator
//!
//! ## UI and Infrastructure
//! - [`ui`] - eframe application, profile dropdown and run-job window
//! - [`notifications`] - Toast queue for user feedback
//! - [`settings`] - Launcher settings file
//! - [`error`] - Error taxonomy surfaced to the UI
//!
//! # Architecture
//!
//! - [`profiles`] turns the two AWS config files into a [`profiles::AwsContext`]
//! - [`glue`] takes that context explicitly on every call
//! - [`ui`] renders plain data returned by both and never touches AWS directly

pub mod error;
pub mod glue;
pub mod notifications;
pub mod profiles;
pub mod settings;
pub mod ui;

pub use ui::LauncherApp;
