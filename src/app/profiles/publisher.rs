//! Hand-off of the active profile to AWS callers.
//!
//! The selected profile and its region are captured in an [`AwsContext`] value that every
//! Glue call receives explicitly. Nothing is written to the process environment, so a call can
//! only observe a profile once it has been handed the published context.

use super::resolver::ProfileOption;
use aws_config::BehaviorVersion;
use aws_types::region::Region;
use serde::{Deserialize, Serialize};

/// Profile and region that AWS clients are built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AwsContext {
    pub profile: Option<String>,
    pub region: Option<String>,
}

impl AwsContext {
    pub fn new(profile: Option<&str>, region: Option<&str>) -> Self {
        Self {
            profile: profile.map(str::to_string),
            region: region.map(str::to_string),
        }
    }

    /// Region to use for console links, falling back when none is published
    pub fn region_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.region.as_deref().unwrap_or(fallback)
    }

    /// Load an SDK config for this context. Unset fields fall back to the SDK's default chain.
    pub async fn sdk_config(&self) -> aws_config::SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        trace_debug!(
            "Loading SDK config for profile {:?} region {:?}",
            self.profile,
            self.region
        );
        loader.load().await
    }
}

/// Owns the published [`AwsContext`].
#[derive(Debug, Default)]
pub struct EnvironmentPublisher {
    active: AwsContext,
    publications: u64,
}

impl EnvironmentPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> &AwsContext {
        &self.active
    }

    /// Number of publications so far; zero means nothing has been handed out yet
    pub fn publications(&self) -> u64 {
        self.publications
    }

    /// Publish a selection.
    ///
    /// A selected name sets the profile and takes the matching option's region (unset when
    /// the option has none). No selection clears the profile and leaves the region as it was.
    /// `notify` runs after the new context is in place.
    pub fn publish<F>(&mut self, selected: Option<&str>, options: &[ProfileOption], notify: F)
    where
        F: FnOnce(&AwsContext),
    {
        match selected.filter(|name| !name.is_empty()) {
            Some(name) => {
                self.active.profile = Some(name.to_string());
                self.active.region = options
                    .iter()
                    .find(|option| option.name == name)
                    .and_then(|option| option.region.clone());
            }
            None => {
                self.active.profile = None;
            }
        }
        self.publications += 1;

        log_info!(
            "Published AWS context: profile={:?} region={:?}",
            self.active.profile,
            self.active.region
        );
        notify(&self.active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<ProfileOption> {
        vec![
            ProfileOption {
                name: "dev".to_string(),
                region: Some("eu-west-1".to_string()),
                source_profile: None,
            },
            ProfileOption {
                name: "bare".to_string(),
                region: None,
                source_profile: None,
            },
        ]
    }

    #[test]
    fn test_publish_sets_profile_and_region() {
        let mut publisher = EnvironmentPublisher::new();
        let mut seen = None;

        publisher.publish(Some("dev"), &options(), |ctx| seen = Some(ctx.clone()));

        let expected = AwsContext::new(Some("dev"), Some("eu-west-1"));
        assert_eq!(publisher.context(), &expected);
        assert_eq!(seen, Some(expected));
        assert_eq!(publisher.publications(), 1);
    }

    #[test]
    fn test_publish_option_without_region_unsets_region() {
        let mut publisher = EnvironmentPublisher::new();
        publisher.publish(Some("dev"), &options(), |_| {});
        publisher.publish(Some("bare"), &options(), |_| {});

        assert_eq!(publisher.context(), &AwsContext::new(Some("bare"), None));
    }

    #[test]
    fn test_publish_empty_clears_profile_keeps_region() {
        let mut publisher = EnvironmentPublisher::new();
        publisher.publish(Some("dev"), &options(), |_| {});
        publisher.publish(None, &options(), |_| {});

        assert_eq!(publisher.context(), &AwsContext::new(None, Some("eu-west-1")));
    }

    #[test]
    fn test_region_fallback_for_links() {
        assert_eq!(AwsContext::default().region_or("us-east-1"), "us-east-1");
        assert_eq!(
            AwsContext::new(None, Some("ap-south-1")).region_or("us-east-1"),
            "ap-south-1"
        );
    }
}
