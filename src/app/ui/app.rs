//! Main launcher window.
//!
//! The search bar holds the job filter and the profile dropdown; the body lists the jobs of
//! the active profile. Every AWS or file operation runs on the tokio runtime and reports back
//! over a channel that is drained at the start of each frame.

use super::profile_dropdown::show_profile_dropdown;
use super::run_job_window::{RunJobAction, RunJobWindow};
use crate::app::error::LauncherError;
use crate::app::glue::console_links::{job_runs_url, open_in_browser};
use crate::app::glue::job_filter::filter_jobs;
use crate::app::glue::{GlueJobService, GlueJobSummary, GlueJobs, JobRunRequest};
use crate::app::notifications::{Toast, ToastQueue, ToastStyle};
use crate::app::profiles::{
    CachedConfigSource, ConfigSource, FileConfigSource, FileSelectionStore,
    MemorySelectionStore, ProfileSession, SelectionStore, SharedConfigFiles,
};
use crate::app::settings::LauncherSettings;
use eframe::egui;
use egui::{Color32, Context, RichText};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

const WARNING_COLOR: Color32 = Color32::from_rgb(220, 50, 50);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(80, 170, 90);

/// Results sent back from background tasks
enum BackgroundResult {
    Config(Result<Arc<SharedConfigFiles>, LauncherError>),
    Jobs {
        generation: u64,
        result: Result<Vec<GlueJobSummary>, LauncherError>,
    },
    JobStarted {
        job_name: String,
        result: Result<String, LauncherError>,
    },
}

/// Title and message of an error shown in place of the job list
#[derive(Debug, Clone)]
struct EmptyState {
    title: String,
    message: String,
}

impl From<&LauncherError> for EmptyState {
    fn from(error: &LauncherError) -> Self {
        Self {
            title: error.title(),
            message: error.message(),
        }
    }
}

enum JobAction {
    Run(GlueJobSummary),
    OpenInConsole(String),
    CopyName(String),
}

pub struct LauncherApp {
    settings: LauncherSettings,
    runtime: Runtime,
    config_source: Arc<CachedConfigSource>,
    glue: Arc<dyn GlueJobs>,
    profiles: ProfileSession,

    config_error: Option<EmptyState>,
    jobs: Vec<GlueJobSummary>,
    jobs_error: Option<EmptyState>,
    jobs_loading: bool,
    // Bumped on every refresh so results for a previous profile are dropped
    jobs_generation: u64,

    search_filter: String,
    fuzzy_matcher: SkimMatcherV2,
    run_window: RunJobWindow,
    toasts: ToastQueue,

    sender: mpsc::Sender<BackgroundResult>,
    receiver: mpsc::Receiver<BackgroundResult>,
}

impl LauncherApp {
    /// Launcher backed by the local AWS config files and the Glue SDK
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Runtime,
        settings: LauncherSettings,
    ) -> Self {
        let store: Box<dyn SelectionStore> = match FileSelectionStore::in_config_dir() {
            Some(store) => {
                log_info!("Persisting profile selection in {:?}", store.path());
                Box::new(store)
            }
            None => {
                log_warn!("No config directory, profile selection will not persist");
                Box::new(MemorySelectionStore::default())
            }
        };

        Self::with_services(
            &cc.egui_ctx,
            runtime,
            settings,
            Arc::new(FileConfigSource::from_environment()),
            Arc::new(GlueJobService::new()),
            store,
        )
    }

    pub fn with_services(
        ctx: &Context,
        runtime: Runtime,
        settings: LauncherSettings,
        config_source: Arc<dyn ConfigSource>,
        glue: Arc<dyn GlueJobs>,
        store: Box<dyn SelectionStore>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel();
        let config_source = Arc::new(CachedConfigSource::new(
            config_source,
            settings.profile_cache_ttl(),
        ));

        let mut app = Self {
            settings,
            runtime,
            config_source,
            glue,
            profiles: ProfileSession::new(store),
            config_error: None,
            jobs: Vec::new(),
            jobs_error: None,
            jobs_loading: true,
            jobs_generation: 0,
            search_filter: String::new(),
            fuzzy_matcher: SkimMatcherV2::default(),
            run_window: RunJobWindow::new(),
            toasts: ToastQueue::new(),
            sender,
            receiver,
        };
        app.load_profiles(ctx, false);
        app
    }

    /// Read the shared config; `force` bypasses the cache.
    fn load_profiles(&mut self, ctx: &Context, force: bool) {
        let source = Arc::clone(&self.config_source);
        let sender = self.sender.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = if force {
                source.reload().await
            } else {
                source.load().await
            };
            let _ = sender.send(BackgroundResult::Config(result));
            ctx.request_repaint();
        });
    }

    /// Fetch jobs for the currently published context
    fn refresh_jobs(&mut self, ctx: &Context) {
        self.jobs_generation += 1;
        self.jobs_loading = true;
        self.jobs_error = None;

        let generation = self.jobs_generation;
        let glue = Arc::clone(&self.glue);
        let context = self.profiles.context().clone();
        let sender = self.sender.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let result = glue.list_jobs(&context).await;
            let _ = sender.send(BackgroundResult::Jobs { generation, result });
            ctx.request_repaint();
        });
    }

    fn start_job(&mut self, ctx: &Context, request: JobRunRequest) {
        let glue = Arc::clone(&self.glue);
        let context = self.profiles.context().clone();
        let sender = self.sender.clone();
        let ctx = ctx.clone();

        self.runtime.spawn(async move {
            let job_name = request.job_name.clone();
            let result = glue.start_job_run(&context, &request).await;
            let _ = sender.send(BackgroundResult::JobStarted { job_name, result });
            ctx.request_repaint();
        });
    }

    /// User picked a profile: publish it, refresh jobs, and re-read the config so that edits
    /// made since the last read are picked up.
    fn select_profile(&mut self, ctx: &Context, name: &str) {
        let mut refresh = false;
        self.profiles.select(name, |_| refresh = true);
        if refresh {
            self.refresh_jobs(ctx);
            self.load_profiles(ctx, true);
        }
    }

    fn process_background_results(&mut self, ctx: &Context) {
        while let Ok(result) = self.receiver.try_recv() {
            match result {
                BackgroundResult::Config(Ok(files)) => {
                    self.config_error = None;
                    let mut refresh = false;
                    self.profiles.apply_config(&files, |_| refresh = true);
                    if refresh {
                        self.refresh_jobs(ctx);
                    } else if self.jobs_generation == 0 {
                        self.jobs_loading = false;
                    }
                }
                BackgroundResult::Config(Err(e)) => {
                    self.config_error = Some(EmptyState::from(&e));
                    self.jobs_loading = false;
                }
                BackgroundResult::Jobs { generation, result } => {
                    if generation != self.jobs_generation {
                        trace_debug!("Dropping stale job list (generation {})", generation);
                        continue;
                    }
                    self.jobs_loading = false;
                    match result {
                        Ok(jobs) => {
                            self.jobs = jobs;
                            self.jobs_error = None;
                        }
                        Err(e) => {
                            log_error!("Failed to list Glue jobs: {}", e);
                            self.jobs.clear();
                            self.jobs_error = Some(EmptyState::from(&e));
                        }
                    }
                }
                BackgroundResult::JobStarted { job_name, result } => match result {
                    Ok(run_id) => {
                        self.toasts.push(Toast::success(
                            "Job Started",
                            format!("started {} ({})", job_name, run_id),
                        ));
                    }
                    Err(e) => {
                        log_error!("Failed to start Glue job {}: {}", job_name, e);
                        self.toasts.push(Toast::failure(e.title(), e.message()));
                    }
                },
            }
        }
    }

    fn show_search_bar(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("search_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            let mut chosen = None;
            let mut reload = false;
            ui.horizontal(|ui| {
                let filter_width = (ui.available_width() - 320.0).max(120.0);
                ui.add(
                    egui::TextEdit::singleline(&mut self.search_filter)
                        .hint_text("Filter jobs by name...")
                        .desired_width(filter_width),
                );
                chosen = show_profile_dropdown(
                    ui,
                    self.profiles.options(),
                    self.profiles.selected(),
                );
                if ui.button("⟳").on_hover_text("Reload AWS profiles").clicked() {
                    reload = true;
                }
            });
            ui.add_space(4.0);

            if let Some(name) = chosen {
                self.select_profile(ctx, &name);
            }
            if reload {
                log_info!("Reloading AWS profiles");
                self.load_profiles(ctx, true);
            }
        });
    }

    fn show_job_list(&mut self, ctx: &Context) {
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(state) = self.config_error.as_ref().or(self.jobs_error.as_ref()) {
                show_empty_state(ui, state);
                return;
            }
            if self.jobs_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.spinner();
                });
                return;
            }

            let jobs = filter_jobs(&self.fuzzy_matcher, &self.jobs, &self.search_filter);
            if jobs.is_empty() {
                show_empty_state(
                    ui,
                    &EmptyState {
                        title: "No jobs".to_string(),
                        message: "No Glue jobs match the current profile and filter.".to_string(),
                    },
                );
                return;
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                for job in jobs {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&job.name).strong());
                        if let (Some(worker_type), Some(workers)) =
                            (&job.worker_type, job.number_of_workers)
                        {
                            ui.label(
                                RichText::new(format!("{} × {}", workers, worker_type)).weak(),
                            );
                        }
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Copy Name").clicked() {
                                action = Some(JobAction::CopyName(job.name.clone()));
                            }
                            if ui.button("Open in Console").clicked() {
                                action = Some(JobAction::OpenInConsole(job.name.clone()));
                            }
                            if ui.button("Run Job").clicked() {
                                action = Some(JobAction::Run(job.clone()));
                            }
                        });
                    });
                    ui.separator();
                }
            });
        });

        match action {
            Some(JobAction::Run(job)) => self.run_window.open_for(&job, &self.settings),
            Some(JobAction::OpenInConsole(job_name)) => self.open_console(&job_name),
            Some(JobAction::CopyName(job_name)) => ctx.copy_text(job_name),
            None => {}
        }
    }

    fn open_console(&mut self, job_name: &str) {
        let url = job_runs_url(
            job_name,
            self.profiles.context(),
            &self.settings.console_fallback_region,
        );
        if let Err(e) = open_in_browser(&url) {
            log_warn!("{:#}", e);
            self.toasts.push(Toast::failure("Cannot open browser", e.to_string()));
        }
    }

    fn show_toasts(&mut self, ctx: &Context) {
        let mut dismissed = None;
        let toasts = self.toasts.visible(Instant::now());
        if toasts.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .show(ctx, |ui| {
                for (index, toast) in toasts.iter().enumerate() {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        let color = match toast.style {
                            ToastStyle::Success => SUCCESS_COLOR,
                            ToastStyle::Failure => WARNING_COLOR,
                        };
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(&toast.title).strong().color(color));
                            if ui.small_button("✕").clicked() {
                                dismissed = Some(index);
                            }
                        });
                        ui.label(&toast.message);
                    });
                }
            });

        if let Some(index) = dismissed {
            self.toasts.dismiss(index);
        }
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

fn show_empty_state(ui: &mut egui::Ui, state: &EmptyState) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            RichText::new(format!("⚠ {}", state.title))
                .strong()
                .color(WARNING_COLOR),
        );
        ui.add_space(6.0);
        ui.label(&state.message);
    });
}

impl eframe::App for LauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_background_results(ctx);

        self.show_search_bar(ctx);
        self.show_job_list(ctx);

        match self.run_window.show(ctx) {
            Some(RunJobAction::Submit(request)) => self.start_job(ctx, request),
            Some(RunJobAction::OpenInConsole(job_name)) => self.open_console(&job_name),
            None => {}
        }

        self.show_toasts(ctx);
    }
}
