//! Resolve, heal and publish in one place.
//!
//! [`ProfileSession`] is the synchronous half of the profile pipeline: the UI reads the shared
//! config asynchronously through [`super::CachedConfigSource`] and hands each result to
//! [`ProfileSession::apply_config`].

use super::publisher::{AwsContext, EnvironmentPublisher};
use super::resolver::{resolve_profiles, should_show_chooser, ProfileOption};
use super::selection::{ProfileSelection, SelectionStore};
use super::shared_config::SharedConfigFiles;

pub struct ProfileSession {
    options: Vec<ProfileOption>,
    selection: ProfileSelection,
    publisher: EnvironmentPublisher,
}

impl ProfileSession {
    pub fn new(store: Box<dyn SelectionStore>) -> Self {
        Self {
            options: Vec::new(),
            selection: ProfileSelection::new(store),
            publisher: EnvironmentPublisher::new(),
        }
    }

    pub fn options(&self) -> &[ProfileOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<&str> {
        self.selection.selected()
    }

    pub fn context(&self) -> &AwsContext {
        self.publisher.context()
    }

    pub fn show_chooser(&self) -> bool {
        should_show_chooser(&self.options)
    }

    /// Take a freshly read config. Publishes (and notifies) when the selection changed or
    /// nothing has been published yet.
    pub fn apply_config<F>(&mut self, files: &SharedConfigFiles, notify: F)
    where
        F: FnOnce(&AwsContext),
    {
        let options = resolve_profiles(&files.config_file, &files.credentials_file);
        let mut selection_changed = false;

        if options != self.options || self.publisher.publications() == 0 {
            log_info!("Resolved {} AWS profiles", options.len());
            self.options = options;
            selection_changed = self.selection.reconcile(&self.options);
        }

        if selection_changed || self.publisher.publications() == 0 {
            self.publisher
                .publish(self.selection.selected(), &self.options, notify);
        }
    }

    /// User picked a profile. Names outside the resolved list are ignored.
    pub fn select<F>(&mut self, name: &str, notify: F) -> bool
    where
        F: FnOnce(&AwsContext),
    {
        if !self.options.iter().any(|option| option.name == name) {
            log_warn!("Ignoring selection of unknown profile {:?}", name);
            return false;
        }
        if !self.selection.set(Some(name.to_string())) {
            return false;
        }
        self.publisher
            .publish(self.selection.selected(), &self.options, notify);
        true
    }
}
