//! Store-side entities and the client contract the release workflow drives.

use std::path::Path;

use crate::error::StoreError;

/// Review status the store reports for an accepted binary.
///
/// Matched literally; any other status is treated as a rejection.
pub const APPROVED_STATUS: &str = "approved";

/// Related entities that can be expanded on a plugin lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expand {
    /// Existing binary records.
    Binaries,
    /// Past review records.
    Reviews,
}

impl Expand {
    /// Query-parameter name of the expanded entity.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binaries => "binaries",
            Self::Reviews => "reviews",
        }
    }
}

/// A plugin's store record with its expanded relations.
///
/// Fetched fresh at the start of a release attempt. Every mutating store call
/// returns a new authoritative snapshot which callers thread into the next
/// step; nothing is aliased across calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Plugin name as registered in the store.
    pub name: String,
    /// Existing binary records, one per uploaded version.
    pub binaries: Vec<BinaryRecord>,
    /// Review records, oldest first; the last one is authoritative.
    pub reviews: Vec<ReviewRecord>,
    /// The binary touched by the most recent upload or update.
    pub latest_binary: Option<BinaryRecord>,
}

/// One uploaded artifact version with its release metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryRecord {
    /// Store-assigned identifier.
    pub id: String,
    /// Semantic version string; empty for a store-created placeholder.
    pub version: String,
    /// Release notes, one entry per store-defined locale.
    pub changelogs: Vec<ChangelogEntry>,
    /// Names of the platform versions this binary is compatible with.
    pub compatible_versions: Vec<String>,
}

impl BinaryRecord {
    /// Whether this record is a placeholder for a not-yet-released binary.
    ///
    /// Placeholders never count as existing versions for conflict purposes.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.version.is_empty()
    }
}

/// Release notes for one store locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogEntry {
    /// Region-qualified locale identifier, e.g. `de_DE`.
    pub locale: String,
    /// Free text shown to users of that locale.
    pub text: String,
}

/// Outcome of one review of a submitted binary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRecord {
    /// Literal status name reported by the store.
    pub status: String,
    /// Reviewer comment, may be empty.
    pub comment: String,
}

/// A target platform version the store offers as a compatibility option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformVersion {
    /// Semantic-version-like name, e.g. `2024.2`.
    pub name: String,
    /// Whether the store currently offers it as a compatibility target.
    pub selectable: bool,
}

/// Operations the marketplace exposes to the release workflow.
///
/// All calls are awaited to completion before the next begins; the workflow
/// never has two store mutations in flight. Timeouts belong to the
/// implementation, not the callers.
#[allow(async_fn_in_trait)]
pub trait StoreClient {
    /// Looks up a plugin by name, expanding the requested relations.
    ///
    /// Returns `None` when the store does not know the plugin.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup request fails.
    async fn find_plugin(
        &self,
        name: &str,
        expand: &[Expand],
    ) -> Result<Option<PluginRecord>, StoreError>;

    /// Pass-through mutation enabling partial encryption on the record.
    ///
    /// Opaque to the release logic; the returned snapshot replaces the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the request.
    async fn enable_partial_encryption(
        &self,
        plugin: PluginRecord,
    ) -> Result<PluginRecord, StoreError>;

    /// Creates a new binary record from the archive content.
    ///
    /// The returned snapshot carries the staged record as `latest_binary`.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    async fn upload_binary(
        &self,
        plugin: PluginRecord,
        archive: &Path,
    ) -> Result<PluginRecord, StoreError>;

    /// Overwrites an existing binary record's payload, keeping its identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    async fn update_binary(
        &self,
        plugin: PluginRecord,
        target: &BinaryRecord,
        archive: &Path,
    ) -> Result<PluginRecord, StoreError>;

    /// Commits the assembled binary metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the metadata.
    async fn save_plugin_binary(
        &self,
        plugin: PluginRecord,
        binary: BinaryRecord,
    ) -> Result<PluginRecord, StoreError>;

    /// Submits the committed binary for review.
    ///
    /// The returned snapshot's last review record carries the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    async fn request_binary_review(
        &self,
        plugin: PluginRecord,
    ) -> Result<PluginRecord, StoreError>;

    /// Platform versions the store knows, with their selectability flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference data cannot be fetched.
    async fn platform_versions(&self) -> Result<Vec<PlatformVersion>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_as_str() {
        assert_eq!(Expand::Binaries.as_str(), "binaries");
        assert_eq!(Expand::Reviews.as_str(), "reviews");
    }

    #[test]
    fn test_placeholder_detection() {
        let placeholder = BinaryRecord::default();
        assert!(placeholder.is_placeholder());

        let released = BinaryRecord {
            version: "1.0.0".to_string(),
            ..BinaryRecord::default()
        };
        assert!(!released.is_placeholder());
    }

    #[test]
    fn test_approved_status_name() {
        assert_eq!(APPROVED_STATUS, "approved");
    }
}
