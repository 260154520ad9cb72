//! AWS shared config file model and parser.
//!
//! The config file (`~/.aws/config`) and the credentials file (`~/.aws/credentials`) use the
//! same INI dialect but name their sections differently: the config file writes
//! `[profile NAME]` (except for `[default]`), the credentials file writes `[NAME]`.
//! Both are parsed into a [`RawProfileMap`] that keeps profiles in first-appearance order.

use std::collections::BTreeMap;
use std::path::PathBuf;

const CONFIG_PROFILE_PREFIX: &str = "profile ";
const DEFAULT_PROFILE: &str = "default";

/// Opaque settings of a single profile section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSettings {
    values: BTreeMap<String, String>,
}

impl ProfileSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Region, treating an empty value as absent
    pub fn region(&self) -> Option<&str> {
        self.non_empty("region")
    }

    pub fn source_profile(&self) -> Option<&str> {
        self.non_empty("source_profile")
    }

    pub fn include_profile(&self) -> Option<&str> {
        self.non_empty("include_profile")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }
}

/// Profile name to settings, in the order profiles first appear in the file.
///
/// Names are unique: inserting an existing name merges into the existing entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProfileMap {
    entries: Vec<(String, ProfileSettings)>,
}

impl RawProfileMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, name: &str) -> Option<&ProfileSettings> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, settings)| settings)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ProfileSettings)> {
        self.entries.iter().map(|(name, settings)| (name.as_str(), settings))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Insert a profile, merging keys into an existing entry of the same name.
    pub fn insert(&mut self, name: impl Into<String>, settings: ProfileSettings) {
        let name = name.into();
        match self.entry_mut(&name) {
            Some(existing) => existing.values.extend(settings.values),
            None => self.entries.push((name, settings)),
        }
    }

    pub fn with(mut self, name: impl Into<String>, settings: ProfileSettings) -> Self {
        self.insert(name, settings);
        self
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut ProfileSettings> {
        self.entries
            .iter_mut()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, settings)| settings)
    }
}

/// Both shared config mappings read in one cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedConfigFiles {
    pub config_file: RawProfileMap,
    pub credentials_file: RawProfileMap,
}

/// How section headers map to profile names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStyle {
    /// `[default]` and `[profile NAME]`; other sections are not profiles
    Config,
    /// `[NAME]`
    Credentials,
}

impl SectionStyle {
    fn profile_name<'a>(&self, header: &'a str) -> Option<&'a str> {
        match self {
            SectionStyle::Config => {
                if header == DEFAULT_PROFILE {
                    Some(header)
                } else {
                    header
                        .strip_prefix(CONFIG_PROFILE_PREFIX)
                        .map(str::trim)
                        .filter(|name| !name.is_empty())
                }
            }
            SectionStyle::Credentials => Some(header).filter(|name| !name.is_empty()),
        }
    }
}

/// Parse the contents of a shared config or credentials file.
pub fn parse_profiles(contents: &str, style: SectionStyle) -> RawProfileMap {
    let mut profiles = RawProfileMap::new();
    // None while inside a non-profile section
    let mut current: Option<(String, ProfileSettings)> = None;
    let mut in_section = false;
    // Key whose value was empty, collecting indented sub-properties
    let mut parent_key: Option<String> = None;

    for raw_line in contents.lines() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if let Some(header) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            if let Some((name, settings)) = current.take() {
                profiles.insert(name, settings);
            }
            in_section = true;
            parent_key = None;
            current = style
                .profile_name(header.trim())
                .map(|name| (name.to_string(), ProfileSettings::new()));
            continue;
        }

        if !in_section {
            continue;
        }
        let Some((_, settings)) = current.as_mut() else {
            continue;
        };

        let indented = raw_line.starts_with(char::is_whitespace);
        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());

        match parent_key.clone().filter(|_| indented) {
            Some(parent) => {
                settings.insert(format!("{}.{}", parent, key), value);
            }
            None => {
                parent_key = value.is_empty().then(|| key.to_string());
                settings.insert(key, value);
            }
        }
    }

    if let Some((name, settings)) = current.take() {
        profiles.insert(name, settings);
    }

    profiles
}

/// Location of the shared config file: `AWS_CONFIG_FILE`, else `~/.aws/config`.
pub fn default_config_path() -> Option<PathBuf> {
    path_from_env_or_home("AWS_CONFIG_FILE", "config")
}

/// Location of the credentials file: `AWS_SHARED_CREDENTIALS_FILE`, else `~/.aws/credentials`.
pub fn default_credentials_path() -> Option<PathBuf> {
    path_from_env_or_home("AWS_SHARED_CREDENTIALS_FILE", "credentials")
}

fn path_from_env_or_home(var: &str, file_name: &str) -> Option<PathBuf> {
    match std::env::var_os(var) {
        Some(value) if !value.is_empty() => Some(expand_home(PathBuf::from(value))),
        _ => dirs::home_dir().map(|home| home.join(".aws").join(file_name)),
    }
}

fn expand_home(path: PathBuf) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path,
    }
}
