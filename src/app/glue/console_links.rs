use crate::app::profiles::AwsContext;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

fn encode(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

/// Glue Studio run history of a job, in the active region or `fallback_region`.
pub fn job_runs_url(job_name: &str, context: &AwsContext, fallback_region: &str) -> String {
    let region = context.region_or(fallback_region);
    format!(
        "https://{region}.console.aws.amazon.com/gluestudio/home?region={region}#/editor/job/{}/runs",
        encode(job_name),
        region = region
    )
}

/// Open a URL in the system browser.
pub fn open_in_browser(url: &str) -> anyhow::Result<()> {
    open::that(url).map_err(|e| anyhow::anyhow!("Failed to open {}: {}", url, e))
}
