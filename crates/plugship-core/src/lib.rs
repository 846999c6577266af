//! Core library for Plugship.
//!
//! This crate holds the release workflow: version conflict resolution,
//! release-note and compatibility assembly, and the review state machine.
//! The marketplace itself is reached through the [`StoreClient`] contract.

mod descriptor;
mod error;
mod locale;
mod notes;
mod release;
mod store;
mod version;

pub use descriptor::PluginDescriptor;
pub use error::{CoreError, CoreResult, StoreError};
pub use locale::language_code;
pub use notes::{RELEASE_NOTES_PADDING, pad_release_notes};
pub use release::{
    Publisher, ReleaseOptions, ReleaseOutcome, ReleaseReport, ReleaseWarning, UploadPlan,
    resolve_conflict,
};
pub use store::{
    APPROVED_STATUS, BinaryRecord, ChangelogEntry, Expand, PlatformVersion, PluginRecord,
    ReviewRecord, StoreClient,
};
pub use version::{CompatibilityRule, parse_lenient, versions_equal};
