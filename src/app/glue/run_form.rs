//! Run-job form validation and the resulting request.

use super::job_arguments::{invalid_flags, JobArguments};
use crate::app::error::ValidationError;
use aws_sdk_glue::types::WorkerType;
use std::collections::BTreeMap;

pub const FALLBACK_WORKER_TYPE: &str = "G.1X";
pub const FALLBACK_NUMBER_OF_WORKERS: i32 = 10;

/// Fields of the run-job form that can fail validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    JobName,
    WorkerType,
    NumberOfWorkers,
    Args,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::JobName => "Job Name",
            FormField::WorkerType => "Worker Type",
            FormField::NumberOfWorkers => "Number of Workers",
            FormField::Args => "Additional Arguments",
        }
    }
}

/// Per-field validation messages. Fields that passed have no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<FormField, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Record a failure; the first message recorded for a field is kept.
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// One line per failed field
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(field, message)| format!("{}: {}", field.label(), message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Every worker type Glue accepts
pub fn worker_type_values() -> &'static [&'static str] {
    WorkerType::values()
}

pub fn validate_number_of_workers(value: &str) -> Result<i32, String> {
    match value.trim().parse::<i32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err("Number of workers must be a positive number.".to_string()),
    }
}

pub fn validate_worker_type(value: &str) -> Result<WorkerType, String> {
    let values = worker_type_values();
    if values.contains(&value) {
        Ok(WorkerType::from(value))
    } else {
        Err(format!("Worker type must be one of {}", values.join(", ")))
    }
}

pub fn validate_args(value: &str) -> Result<(), String> {
    let offenders = invalid_flags(value);
    if offenders.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "Arguments must start with --, found: {}",
            offenders.join(", ")
        ))
    }
}

/// Raw values as typed into the run-job form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunJobForm {
    pub worker_type: String,
    pub number_of_workers: String,
    pub args: String,
}

impl RunJobForm {
    /// Form prefilled from a job's defaults, else the given fallbacks.
    pub fn with_defaults(
        job_worker_type: Option<&str>,
        job_number_of_workers: Option<i32>,
        fallback_worker_type: &str,
        fallback_number_of_workers: i32,
    ) -> Self {
        Self {
            worker_type: job_worker_type.unwrap_or(fallback_worker_type).to_string(),
            number_of_workers: job_number_of_workers
                .unwrap_or(fallback_number_of_workers)
                .to_string(),
            args: String::new(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if let Err(message) = validate_number_of_workers(&self.number_of_workers) {
            errors.insert(FormField::NumberOfWorkers, message);
        }
        if let Err(message) = validate_worker_type(&self.worker_type) {
            errors.insert(FormField::WorkerType, message);
        }
        if let Err(message) = validate_args(&self.args) {
            errors.insert(FormField::Args, message);
        }
        errors
    }

    /// Validate and build the request for `job_name`.
    pub fn to_request(&self, job_name: &str) -> Result<JobRunRequest, ValidationError> {
        let mut errors = self.validate();
        if job_name.trim().is_empty() {
            errors.insert(FormField::JobName, "Job name is required.");
        }

        match (
            validate_worker_type(&self.worker_type),
            validate_number_of_workers(&self.number_of_workers),
        ) {
            (Ok(worker_type), Ok(number_of_workers)) if errors.is_empty() => Ok(JobRunRequest {
                job_name: job_name.to_string(),
                worker_type,
                number_of_workers,
                arguments: JobArguments::parse(&self.args),
            }),
            _ => Err(ValidationError::new(errors)),
        }
    }
}

/// A validated job run, consumed once by the Glue collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct JobRunRequest {
    pub job_name: String,
    pub worker_type: WorkerType,
    pub number_of_workers: i32,
    pub arguments: JobArguments,
}
