//! Error taxonomy for Glue Launcher.
//!
//! Three kinds of failure reach the user, and none of them is fatal:
//!
//! - **Config read**: an AWS shared config file could not be read. Shown as an empty state
//!   until the operator reloads.
//! - **Validation**: one or more run-job form fields are invalid. Shown inline, blocks submission.
//! - **Service**: a Glue API call failed. Shown as a title and message, never retried automatically.

use crate::app::glue::run_form::{FieldErrors, FormField};
use aws_sdk_glue::error::{DisplayErrorContext, ProvideErrorMetadata};
use std::path::PathBuf;
use thiserror::Error;

/// Which shared config file a read failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFileKind {
    Config,
    Credentials,
}

impl ConfigFileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFileKind::Config => "config",
            ConfigFileKind::Credentials => "credentials",
        }
    }
}

impl std::fmt::Display for ConfigFileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Run-job form rejected before submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid job run: {}", .errors.summary())]
pub struct ValidationError {
    pub errors: FieldErrors,
}

impl ValidationError {
    pub fn new(errors: FieldErrors) -> Self {
        Self { errors }
    }

    /// Message for a single field, if that field failed
    pub fn field(&self, field: FormField) -> Option<&str> {
        self.errors.get(field)
    }
}

#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("Failed to read AWS {kind} file {}: {source}", .path.display())]
    ConfigRead {
        kind: ConfigFileKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{title}: {message}")]
    Service { title: String, message: String },
}

impl LauncherError {
    /// Build a service error from any AWS SDK error, preferring the service error code as title.
    pub fn from_sdk<E>(operation: &str, err: E) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error,
    {
        let title = err
            .code()
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} failed", operation));
        let message = err
            .message()
            .map(str::to_string)
            .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
        LauncherError::Service { title, message }
    }

    /// Short title for empty states and toasts
    pub fn title(&self) -> String {
        match self {
            LauncherError::ConfigRead { kind, .. } => format!("Cannot read AWS {} file", kind),
            LauncherError::Validation(_) => "Invalid job run".to_string(),
            LauncherError::Service { title, .. } => title.clone(),
        }
    }

    /// Longer description shown under the title
    pub fn message(&self) -> String {
        match self {
            LauncherError::ConfigRead { path, source, .. } => {
                format!("{}: {}", path.display(), source)
            }
            LauncherError::Validation(err) => err.errors.summary(),
            LauncherError::Service { message, .. } => message.clone(),
        }
    }
}
