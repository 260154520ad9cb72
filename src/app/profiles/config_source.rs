//! Reader for the two AWS shared config mappings.
//!
//! [`FileConfigSource`] performs the actual reads; [`CachedConfigSource`] keeps the last
//! successful result for a time-to-live window so that repeated renders do not hit the disk.

use super::shared_config::{
    default_config_path, default_credentials_path, parse_profiles, RawProfileMap, SectionStyle,
    SharedConfigFiles,
};
use crate::app::error::{ConfigFileKind, LauncherError};
use async_trait::async_trait;
use moka::sync::Cache;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Anything that can produce the config and credentials mappings.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    async fn read(&self) -> Result<SharedConfigFiles, LauncherError>;
}

/// Reads `~/.aws/config` and `~/.aws/credentials` (or their environment overrides).
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    config_path: Option<PathBuf>,
    credentials_path: Option<PathBuf>,
}

impl FileConfigSource {
    pub fn new(config_path: impl Into<PathBuf>, credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(config_path.into()),
            credentials_path: Some(credentials_path.into()),
        }
    }

    /// Standard locations, honouring `AWS_CONFIG_FILE` and `AWS_SHARED_CREDENTIALS_FILE`
    pub fn from_environment() -> Self {
        Self {
            config_path: default_config_path(),
            credentials_path: default_credentials_path(),
        }
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub fn credentials_path(&self) -> Option<&Path> {
        self.credentials_path.as_deref()
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    async fn read(&self) -> Result<SharedConfigFiles, LauncherError> {
        let (config_file, credentials_file) = tokio::join!(
            read_profile_file(
                ConfigFileKind::Config,
                self.config_path.as_deref(),
                SectionStyle::Config
            ),
            read_profile_file(
                ConfigFileKind::Credentials,
                self.credentials_path.as_deref(),
                SectionStyle::Credentials
            ),
        );

        Ok(SharedConfigFiles {
            config_file: config_file?,
            credentials_file: credentials_file?,
        })
    }
}

/// A missing file is an empty mapping, not an error.
async fn read_profile_file(
    kind: ConfigFileKind,
    path: Option<&Path>,
    style: SectionStyle,
) -> Result<RawProfileMap, LauncherError> {
    let Some(path) = path else {
        log_warn!("No home directory, AWS {} file unavailable", kind);
        return Ok(RawProfileMap::new());
    };

    match tokio::fs::read_to_string(path).await {
        Ok(contents) => {
            let profiles = parse_profiles(&contents, style);
            trace_debug!(
                "Read {} profiles from AWS {} file {:?}",
                profiles.len(),
                kind,
                path
            );
            Ok(profiles)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            trace_debug!("AWS {} file {:?} does not exist", kind, path);
            Ok(RawProfileMap::new())
        }
        Err(source) => Err(LauncherError::ConfigRead {
            kind,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Single-slot cache in front of a [`ConfigSource`].
pub struct CachedConfigSource {
    inner: Arc<dyn ConfigSource>,
    cache: Cache<(), Arc<SharedConfigFiles>>,
}

impl CachedConfigSource {
    pub fn new(inner: Arc<dyn ConfigSource>, time_to_live: Duration) -> Self {
        let cache = Cache::builder().time_to_live(time_to_live).build();
        Self { inner, cache }
    }

    /// Cached result inside the window, otherwise a fresh read.
    pub async fn load(&self) -> Result<Arc<SharedConfigFiles>, LauncherError> {
        if let Some(files) = self.cache.get(&()) {
            trace_debug!("Shared config cache hit");
            return Ok(files);
        }
        trace_debug!("Shared config cache miss");
        self.reload().await
    }

    /// Always reads; replaces the cached value only on success.
    pub async fn reload(&self) -> Result<Arc<SharedConfigFiles>, LauncherError> {
        match self.inner.read().await {
            Ok(files) => {
                let files = Arc::new(files);
                self.cache.insert((), Arc::clone(&files));
                Ok(files)
            }
            Err(e) => {
                log_error!("Failed to read AWS shared config: {}", e);
                Err(e)
            }
        }
    }

    /// Last successful result, if still inside the window
    pub fn cached(&self) -> Option<Arc<SharedConfigFiles>> {
        self.cache.get(&())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::profiles::shared_config::ProfileSettings;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    struct CountingSource {
        reads: AtomicUsize,
        fail: AtomicBool,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                reads: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl ConfigSource for CountingSource {
        async fn read(&self) -> Result<SharedConfigFiles, LauncherError> {
            let count = self.reads.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail.load(Ordering::SeqCst) {
                return Err(LauncherError::ConfigRead {
                    kind: ConfigFileKind::Config,
                    path: PathBuf::from("/tmp/config"),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk gone"),
                });
            }
            let name = format!("read-{}", count);
            Ok(SharedConfigFiles {
                config_file: RawProfileMap::new().with(name, ProfileSettings::new()),
                credentials_file: RawProfileMap::new(),
            })
        }
    }

    #[tokio::test]
    async fn test_load_uses_cache_inside_window() {
        let source = Arc::new(CountingSource::new());
        let cached = CachedConfigSource::new(source.clone(), Duration::from_secs(60));

        let first = cached.load().await.unwrap();
        let second = cached.load().await.unwrap();

        assert_eq!(source.reads.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_reload_replaces_cache() {
        let source = Arc::new(CountingSource::new());
        let cached = CachedConfigSource::new(source.clone(), Duration::from_secs(60));

        cached.load().await.unwrap();
        let reloaded = cached.reload().await.unwrap();

        assert!(reloaded.config_file.contains("read-2"));
        assert!(cached.cached().unwrap().config_file.contains("read-2"));
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_value() {
        let source = Arc::new(CountingSource::new());
        let cached = CachedConfigSource::new(source.clone(), Duration::from_secs(60));

        cached.load().await.unwrap();
        source.fail.store(true, Ordering::SeqCst);

        assert!(matches!(
            cached.reload().await,
            Err(LauncherError::ConfigRead { .. })
        ));
        assert!(cached.cached().unwrap().config_file.contains("read-1"));
    }

    #[tokio::test]
    async fn test_cold_failure_reports_error() {
        let source = Arc::new(CountingSource::new());
        source.fail.store(true, Ordering::SeqCst);
        let cached = CachedConfigSource::new(source, Duration::from_secs(60));

        assert!(cached.load().await.is_err());
        assert!(cached.cached().is_none());
    }
}
