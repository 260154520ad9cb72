//! AWS profile pipeline.
//!
//! ```text
//! config_source ──▶ resolver ──▶ selection ──▶ publisher ──▶ AwsContext ──▶ glue
//! ```
//!
//! - [`config_source`] reads `~/.aws/config` and `~/.aws/credentials` into two
//!   [`RawProfileMap`]s, with a time-to-live cache in front
//! - [`resolver`] derives the ordered [`ProfileOption`] list and the sticky-selection policy
//! - [`selection`] persists the chosen profile name
//! - [`publisher`] turns the selection into the [`AwsContext`] handed to AWS calls
//! - [`session`] wires the last three together for the UI

pub mod config_source;
pub mod publisher;
pub mod resolver;
pub mod selection;
pub mod session;
pub mod shared_config;

pub use config_source::{CachedConfigSource, ConfigSource, FileConfigSource};
pub use publisher::{AwsContext, EnvironmentPublisher};
pub use resolver::{reconcile_selection, resolve_profiles, should_show_chooser, ProfileOption};
pub use selection::{
    FileSelectionStore, MemorySelectionStore, ProfileSelection, SelectionStore, SELECTION_KEY,
};
pub use session::ProfileSession;
pub use shared_config::{ProfileSettings, RawProfileMap, SectionStyle, SharedConfigFiles};
