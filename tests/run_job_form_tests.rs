//! Run-job form validation and argument parsing.

use glue_launcher::app::error::LauncherError;
use glue_launcher::app::glue::run_form::{
    validate_args, validate_number_of_workers, validate_worker_type,
};
use glue_launcher::app::glue::{FormField, JobArguments, RunJobForm};
use pretty_assertions::assert_eq;

fn form(worker_type: &str, number_of_workers: &str, args: &str) -> RunJobForm {
    RunJobForm {
        worker_type: worker_type.to_string(),
        number_of_workers: number_of_workers.to_string(),
        args: args.to_string(),
    }
}

#[test]
fn test_number_of_workers_must_be_positive() {
    let error = validate_number_of_workers("0").unwrap_err();
    assert!(error.contains("positive"), "unexpected message: {}", error);

    assert_eq!(validate_number_of_workers("5"), Ok(5));
    assert_eq!(validate_number_of_workers(" 12 "), Ok(12));
    assert!(validate_number_of_workers("-3").is_err());
    assert!(validate_number_of_workers("2.5").is_err());
    assert!(validate_number_of_workers("").is_err());
}

#[test]
fn test_unknown_worker_type_lists_valid_set() {
    let error = validate_worker_type("NotAType").unwrap_err();

    assert!(error.contains("G.1X"), "unexpected message: {}", error);
    assert!(error.contains("G.2X"), "unexpected message: {}", error);
    assert!(validate_worker_type("G.1X").is_ok());
}

#[test]
fn test_args_without_double_dash_name_the_offender() {
    let error = validate_args("arg1 value1").unwrap_err();
    assert!(error.contains("arg1"), "unexpected message: {}", error);

    assert!(validate_args("--arg1 value1\n\n--arg2 value2").is_ok());
    assert!(validate_args("").is_ok());
}

#[test]
fn test_parse_keeps_insertion_order() {
    let args = JobArguments::parse("--arg1 value1\n--arg2 value2");

    assert_eq!(
        args.iter().collect::<Vec<_>>(),
        vec![("--arg1", Some("value1")), ("--arg2", Some("value2"))]
    );
}

#[test]
fn test_every_failing_field_is_reported() {
    let errors = form("NotAType", "0", "oops").validate();

    assert_eq!(errors.len(), 3);
    assert!(errors.get(FormField::WorkerType).is_some());
    assert!(errors.get(FormField::NumberOfWorkers).is_some());
    assert!(errors.get(FormField::Args).is_some());
}

#[test]
fn test_valid_form_builds_request() {
    let request = form("G.2X", "4", "--env prod\n--dry-run")
        .to_request("nightly-etl")
        .unwrap();

    assert_eq!(request.job_name, "nightly-etl");
    assert_eq!(request.worker_type.as_str(), "G.2X");
    assert_eq!(request.number_of_workers, 4);
    assert_eq!(request.arguments.get("--dry-run"), Some(None));

    let sent = request.arguments.to_request_arguments();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent.get("--env").map(String::as_str), Some("prod"));
}

#[test]
fn test_blank_job_name_is_rejected() {
    let error = form("G.1X", "10", "").to_request("  ").unwrap_err();

    assert!(error.field(FormField::JobName).is_some());

    let launcher_error = LauncherError::from(error);
    assert_eq!(launcher_error.title(), "Invalid job run");
    assert!(launcher_error.message().contains("Job Name"));
}

#[test]
fn test_defaults_prefer_job_values() {
    let from_job = RunJobForm::with_defaults(Some("G.4X"), Some(2), "G.1X", 10);
    assert_eq!(from_job, form("G.4X", "2", ""));

    let fallback = RunJobForm::with_defaults(None, None, "G.1X", 10);
    assert_eq!(fallback, form("G.1X", "10", ""));
}
