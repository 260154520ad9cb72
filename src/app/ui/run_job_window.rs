//! Run Job Window
//!
//! Form for starting a Glue job run: additional arguments, worker count and worker type.
//! Validation messages are shown under each field; nothing is submitted until all pass.

use crate::app::glue::run_form::{worker_type_values, FieldErrors, FormField, RunJobForm};
use crate::app::glue::{GlueJobSummary, JobRunRequest};
use crate::app::settings::LauncherSettings;
use eframe::egui;
use egui::{Color32, Context, RichText, Ui};

const ARGS_PLACEHOLDER: &str = "--arg1 value1\n--arg2 value2\n--arg3 value3";
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 50, 50);

/// What the user did in the window this frame
#[derive(Debug, Clone, PartialEq)]
pub enum RunJobAction {
    Submit(JobRunRequest),
    OpenInConsole(String),
}

#[derive(Default)]
pub struct RunJobWindow {
    pub open: bool,
    job_name: String,
    form: Option<RunJobForm>,
    errors: FieldErrors,
}

impl RunJobWindow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open prefilled with the job's defaults
    pub fn open_for(&mut self, job: &GlueJobSummary, settings: &LauncherSettings) {
        self.job_name = job.name.clone();
        self.form = Some(RunJobForm::with_defaults(
            job.worker_type.as_deref(),
            job.number_of_workers,
            &settings.default_worker_type,
            settings.default_number_of_workers,
        ));
        self.errors = FieldErrors::new();
        self.open = true;
        log_info!("Opened run form for Glue job {}", self.job_name);
    }

    pub fn show(&mut self, ctx: &Context) -> Option<RunJobAction> {
        if !self.open {
            return None;
        }
        let Some(mut form) = self.form.take() else {
            self.open = false;
            return None;
        };

        let mut window_open = self.open;
        let mut action = None;

        egui::Window::new(format!("Run {}", self.job_name))
            .id(egui::Id::new("run_job_window"))
            .open(&mut window_open)
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                Self::form_fields(ui, &mut form, &self.errors);

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    if ui.button("Start Job").clicked() {
                        action = Some(Self::submit(&form, &self.job_name));
                    }
                    if ui.button("Open in Console").clicked() {
                        action = Some(Ok(RunJobAction::OpenInConsole(self.job_name.clone())));
                    }
                });
            });

        self.open = window_open;
        self.form = Some(form);

        match action {
            Some(Ok(RunJobAction::Submit(request))) => {
                self.open = false;
                self.errors = FieldErrors::new();
                Some(RunJobAction::Submit(request))
            }
            Some(Ok(other)) => Some(other),
            Some(Err(errors)) => {
                log_debug!(
                    "Run form for {} rejected: {}",
                    self.job_name,
                    errors.summary()
                );
                self.errors = errors;
                None
            }
            None => None,
        }
    }

    fn submit(form: &RunJobForm, job_name: &str) -> Result<RunJobAction, FieldErrors> {
        form.to_request(job_name)
            .map(RunJobAction::Submit)
            .map_err(|e| e.errors)
    }

    fn form_fields(ui: &mut Ui, form: &mut RunJobForm, errors: &FieldErrors) {
        egui::Grid::new("run_job_form_grid")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Additional Arguments:");
                ui.vertical(|ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut form.args)
                            .hint_text(ARGS_PLACEHOLDER)
                            .desired_rows(4)
                            .code_editor(),
                    );
                    field_error(ui, errors, FormField::Args);
                });
                ui.end_row();

                ui.label("Number of Workers:");
                ui.vertical(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut form.number_of_workers)
                            .desired_width(80.0),
                    );
                    field_error(ui, errors, FormField::NumberOfWorkers);
                });
                ui.end_row();

                ui.label("Worker Type:");
                ui.vertical(|ui| {
                    egui::ComboBox::from_id_salt("worker_type")
                        .selected_text(form.worker_type.clone())
                        .show_ui(ui, |ui| {
                            for value in worker_type_values() {
                                ui.selectable_value(
                                    &mut form.worker_type,
                                    value.to_string(),
                                    *value,
                                );
                            }
                        });
                    field_error(ui, errors, FormField::WorkerType);
                });
                ui.end_row();
            });

        field_error(ui, errors, FormField::JobName);
    }
}

fn field_error(ui: &mut Ui, errors: &FieldErrors, field: FormField) {
    if let Some(message) = errors.get(field) {
        ui.label(RichText::new(message).color(ERROR_COLOR));
    }
}
