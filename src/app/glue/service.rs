use super::run_form::JobRunRequest;
use crate::app::error::LauncherError;
use crate::app::profiles::AwsContext;
use async_trait::async_trait;
use aws_sdk_glue as glue;

/// Job as listed in the launcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlueJobSummary {
    pub name: String,
    pub description: Option<String>,
    pub worker_type: Option<String>,
    pub number_of_workers: Option<i32>,
    pub glue_version: Option<String>,
}

impl GlueJobSummary {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            worker_type: None,
            number_of_workers: None,
            glue_version: None,
        }
    }

    fn from_job(job: &glue::types::Job) -> Option<Self> {
        let name = job.name.clone()?;
        Some(Self {
            name,
            description: job.description.clone(),
            worker_type: job
                .worker_type
                .as_ref()
                .map(|worker_type| worker_type.as_str().to_string()),
            number_of_workers: job.number_of_workers,
            glue_version: job.glue_version.clone(),
        })
    }
}

/// Glue operations the launcher needs. Every call takes the published context.
#[async_trait]
pub trait GlueJobs: Send + Sync {
    async fn list_jobs(&self, context: &AwsContext) -> Result<Vec<GlueJobSummary>, LauncherError>;

    /// Start a run and return its id
    async fn start_job_run(
        &self,
        context: &AwsContext,
        request: &JobRunRequest,
    ) -> Result<String, LauncherError>;
}

/// [`GlueJobs`] backed by the AWS SDK. A client is built per call from the given context.
#[derive(Debug, Default, Clone)]
pub struct GlueJobService;

impl GlueJobService {
    pub fn new() -> Self {
        Self
    }

    async fn client(&self, context: &AwsContext) -> glue::Client {
        let config = context.sdk_config().await;
        glue::Client::new(&config)
    }
}

#[async_trait]
impl GlueJobs for GlueJobService {
    /// List Glue Jobs
    async fn list_jobs(&self, context: &AwsContext) -> Result<Vec<GlueJobSummary>, LauncherError> {
        let client = self.client(context).await;
        let mut paginator = client.get_jobs().into_paginator().send();

        let mut jobs = Vec::new();
        while let Some(page) = paginator.next().await {
            let page = page.map_err(|e| LauncherError::from_sdk("GetJobs", e))?;
            if let Some(job_list) = page.jobs {
                jobs.extend(job_list.iter().filter_map(GlueJobSummary::from_job));
            }
        }

        log_info!(
            "Listed {} Glue jobs for profile {:?} in {:?}",
            jobs.len(),
            context.profile,
            context.region
        );
        Ok(jobs)
    }

    async fn start_job_run(
        &self,
        context: &AwsContext,
        request: &JobRunRequest,
    ) -> Result<String, LauncherError> {
        let client = self.client(context).await;
        let arguments = request.arguments.to_request_arguments();

        log_info!(
            "Starting Glue job {} with {} x {} and {} arguments",
            request.job_name,
            request.number_of_workers,
            request.worker_type.as_str(),
            arguments.len()
        );

        let response = client
            .start_job_run()
            .job_name(&request.job_name)
            .worker_type(request.worker_type.clone())
            .number_of_workers(request.number_of_workers)
            .set_arguments(if arguments.is_empty() {
                None
            } else {
                Some(arguments)
            })
            .send()
            .await
            .map_err(|e| LauncherError::from_sdk("StartJobRun", e))?;

        let run_id = response.job_run_id.unwrap_or_default();
        log_info!("Glue job {} started as run {}", request.job_name, run_id);
        Ok(run_id)
    }
}
