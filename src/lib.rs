//! Glue Launcher - AWS Glue Job Browser and Quick Launcher
//!
//! Glue Launcher is a desktop application for browsing the AWS Glue jobs of an account and
//! starting job runs with custom sizing and arguments. Credentials come from the local AWS
//! shared configuration files; the operator picks one of the configured profiles and every
//! subsequent AWS call is made with that profile and its region.
//!
//! # Core Features
//!
//! - **Profile Resolution**: Named profiles from `~/.aws/config` and `~/.aws/credentials`,
//!   with region inheritance through `include_profile`
//! - **Sticky Selection**: The chosen profile survives restarts and heals itself when the
//!   configuration changes underneath it
//! - **Job Browser**: Fuzzy search over the jobs of the active account and region
//! - **Run Job Form**: Worker type, worker count and free-form `--flag value` arguments with
//!   inline validation
//!
//! # Architecture Overview
//!
//! - **Profiles** ([`app::profiles`]): shared config reader, resolver, sticky selection and the
//!   publisher that hands the active [`app::profiles::AwsContext`] to AWS callers
//! - **Glue** ([`app::glue`]): argument parsing, form validation and the Glue SDK collaborator
//! - **UI Layer** ([`app::ui`]): eframe application that renders whatever the layers above return
//!
//! Control flows one way: config files → resolver → publisher → Glue calls. The active profile
//! is never written to the process environment; it travels as an explicit context value into
//! every client constructor.

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod app;
pub use app::LauncherApp;
