//! Profile resolution over the config and credentials mappings.

use super::shared_config::RawProfileMap;
use serde::{Deserialize, Serialize};

/// A selectable profile, recomputed on every config reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileOption {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_profile: Option<String>,
}

/// Resolve the selectable profiles.
///
/// The config mapping is authoritative when it has any entry; otherwise the credentials
/// mapping is used. The two are never merged entry by entry. Regions fall back from the
/// config entry, to the credentials entry, to the config entry named by `include_profile`
/// (one hop only).
pub fn resolve_profiles(config: &RawProfileMap, credentials: &RawProfileMap) -> Vec<ProfileOption> {
    let source = if config.is_empty() { credentials } else { config };

    source
        .iter()
        .map(|(name, settings)| ProfileOption {
            name: name.to_string(),
            region: resolve_region(name, config, credentials),
            source_profile: settings.source_profile().map(str::to_string),
        })
        .collect()
}

fn resolve_region(
    name: &str,
    config: &RawProfileMap,
    credentials: &RawProfileMap,
) -> Option<String> {
    let own = config.get(name);

    own.and_then(|settings| settings.region())
        .or_else(|| credentials.get(name).and_then(|settings| settings.region()))
        .or_else(|| {
            own.and_then(|settings| settings.include_profile())
                .and_then(|included| config.get(included))
                .and_then(|settings| settings.region())
        })
        .map(str::to_string)
}

/// Sticky selection policy: keep the current name while it still resolves, else the first
/// option, else nothing.
pub fn reconcile_selection(current: Option<&str>, options: &[ProfileOption]) -> Option<String> {
    match current {
        Some(name) if !name.is_empty() && options.iter().any(|option| option.name == name) => {
            Some(name.to_string())
        }
        _ => options.first().map(|option| option.name.clone()),
    }
}

/// A chooser is only worth showing when there is something to choose between.
pub fn should_show_chooser(options: &[ProfileOption]) -> bool {
    options.len() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::profiles::shared_config::ProfileSettings;

    fn option(name: &str) -> ProfileOption {
        ProfileOption {
            name: name.to_string(),
            region: None,
            source_profile: None,
        }
    }

    #[test]
    fn test_config_region_wins_over_credentials() {
        let config = RawProfileMap::new()
            .with("dev", ProfileSettings::new().with("region", "eu-west-1"));
        let credentials = RawProfileMap::new()
            .with("dev", ProfileSettings::new().with("region", "us-west-2"));

        let options = resolve_profiles(&config, &credentials);

        assert_eq!(options[0].region.as_deref(), Some("eu-west-1"));
    }

    #[test]
    fn test_credentials_region_fills_gap() {
        let config = RawProfileMap::new().with("dev", ProfileSettings::new());
        let credentials = RawProfileMap::new()
            .with("dev", ProfileSettings::new().with("region", "us-west-2"));

        let options = resolve_profiles(&config, &credentials);

        assert_eq!(options[0].region.as_deref(), Some("us-west-2"));
    }

    #[test]
    fn test_credentials_only_profiles_are_ignored_when_config_has_entries() {
        let config = RawProfileMap::new().with("dev", ProfileSettings::new());
        let credentials = RawProfileMap::new()
            .with("dev", ProfileSettings::new())
            .with("ci", ProfileSettings::new());

        let names: Vec<_> = resolve_profiles(&config, &credentials)
            .into_iter()
            .map(|option| option.name)
            .collect();

        assert_eq!(names, vec!["dev"]);
    }

    #[test]
    fn test_source_profile_comes_from_chosen_mapping() {
        let config = RawProfileMap::new().with(
            "admin",
            ProfileSettings::new()
                .with("source_profile", "default")
                .with("role_arn", "arn:aws:iam::123456789012:role/Admin"),
        );

        let options = resolve_profiles(&config, &RawProfileMap::new());

        assert_eq!(options[0].source_profile.as_deref(), Some("default"));
    }

    #[test]
    fn test_reconcile_keeps_valid_selection() {
        let options = vec![option("a"), option("b")];
        assert_eq!(reconcile_selection(Some("b"), &options).as_deref(), Some("b"));
    }

    #[test]
    fn test_reconcile_empty_selection_takes_first() {
        let options = vec![option("a"), option("b")];
        assert_eq!(reconcile_selection(None, &options).as_deref(), Some("a"));
        assert_eq!(reconcile_selection(Some(""), &options).as_deref(), Some("a"));
    }

    #[test]
    fn test_chooser_threshold() {
        assert!(!should_show_chooser(&[]));
        assert!(!should_show_chooser(&[option("a")]));
        assert!(should_show_chooser(&[option("a"), option("b")]));
    }
}
