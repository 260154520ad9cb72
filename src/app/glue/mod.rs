//! AWS Glue job runs.
//!
//! - [`job_arguments`] parses the free-form `--flag value` text of the run-job form
//! - [`run_form`] validates the form and produces a [`JobRunRequest`]
//! - [`service`] lists jobs and starts runs through the Glue SDK
//! - [`console_links`] and [`job_filter`] back the job list's actions and search box

pub mod console_links;
pub mod job_arguments;
pub mod job_filter;
pub mod run_form;
pub mod service;

pub use job_arguments::JobArguments;
pub use run_form::{FieldErrors, FormField, JobRunRequest, RunJobForm};
pub use service::{GlueJobService, GlueJobSummary, GlueJobs};
