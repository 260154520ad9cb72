//! Launcher settings loaded from `settings.json` in the config directory.
//!
//! # settings.json Format
//!
//! ```json
//! {
//!   "profile_cache_ttl_secs": 300,
//!   "default_worker_type": "G.1X",
//!   "default_number_of_workers": 10,
//!   "console_fallback_region": "us-east-1"
//! }
//! ```
//!
//! Every field is optional. A missing or unreadable file yields the defaults.

use crate::app::glue::run_form::{
    worker_type_values, FALLBACK_NUMBER_OF_WORKERS, FALLBACK_WORKER_TYPE,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherSettings {
    /// How long a shared config read is reused before the files are read again
    pub profile_cache_ttl_secs: u64,

    /// Worker type prefilled when a job has none
    pub default_worker_type: String,

    /// Worker count prefilled when a job has none
    pub default_number_of_workers: i32,

    /// Region for console links when the active profile has none
    pub console_fallback_region: String,
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            profile_cache_ttl_secs: 300,
            default_worker_type: FALLBACK_WORKER_TYPE.to_string(),
            default_number_of_workers: FALLBACK_NUMBER_OF_WORKERS,
            console_fallback_region: "us-east-1".to_string(),
        }
    }
}

impl LauncherSettings {
    /// Load from the launcher config directory.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from_path(path),
            None => {
                log_warn!("No config directory available, using default settings");
                Self::default()
            }
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "", "glue-launcher")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load from a specific path.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            trace_debug!("No settings.json found at {:?}", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<LauncherSettings>(&contents) {
                Ok(settings) => {
                    trace_debug!("Loaded settings from {:?}: {:?}", path, settings);
                    settings.sanitized()
                }
                Err(e) => {
                    log_warn!("Failed to parse {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log_warn!("Failed to read {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn profile_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_cache_ttl_secs)
    }

    /// Replace values the run-job form would reject with the built-in fallbacks
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.default_number_of_workers <= 0 {
            log_warn!(
                "Ignoring non-positive default_number_of_workers {}",
                self.default_number_of_workers
            );
            self.default_number_of_workers = defaults.default_number_of_workers;
        }
        if !worker_type_values().contains(&self.default_worker_type.as_str()) {
            log_warn!(
                "Ignoring unknown default_worker_type {:?}",
                self.default_worker_type
            );
            self.default_worker_type = defaults.default_worker_type;
        }
        if self.console_fallback_region.trim().is_empty() {
            self.console_fallback_region = defaults.console_fallback_region;
        }
        self
    }
}
