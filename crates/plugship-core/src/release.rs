//! Release orchestration.
//!
//! Turns a plugin archive plus store-side state into a single committed
//! binary record and, when asked, drives it through review to publication.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::descriptor::PluginDescriptor;
use crate::error::{CoreError, CoreResult, StoreError};
use crate::locale::language_code;
use crate::notes::pad_release_notes;
use crate::store::{APPROVED_STATUS, BinaryRecord, Expand, PlatformVersion, StoreClient};
use crate::version::versions_equal;

/// Caller choices for one release attempt.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseOptions {
    /// Replace an existing binary carrying the same version.
    pub force: bool,
    /// Submit the committed binary for review.
    pub request_review: bool,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            force: false,
            request_review: true,
        }
    }
}

/// Terminal success state of a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// The binary passed review and is live.
    Published { name: String, version: String },
    /// The binary is committed but waits for a manual release in the store.
    AwaitingManualRelease { name: String, version: String },
}

/// Non-fatal conditions surfaced alongside a successful release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseWarning {
    /// The archive carries no release notes for a store locale.
    MissingReleaseNotes { locale: String, language: String },
    /// No selectable platform version matched the compatibility rule.
    EmptyCompatibility,
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingReleaseNotes { locale, language } => write!(
                f,
                "no release notes for language \"{language}\"; locale {locale} will be empty"
            ),
            Self::EmptyCompatibility => write!(
                f,
                "no selectable platform version matches the compatibility rule; the binary will be compatible with nothing"
            ),
        }
    }
}

/// Result of a completed release attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    pub outcome: ReleaseOutcome,
    pub warnings: Vec<ReleaseWarning>,
}

/// How the archive payload reaches the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPlan {
    /// No binary with this version exists yet; stage a new record.
    Fresh,
    /// Re-upload into the existing record, keeping its identity.
    Replace(BinaryRecord),
}

/// Decides between a fresh upload and a forced replacement.
///
/// Pure decision over already-fetched data; it runs before any mutating call
/// so a conflict that is going to be rejected never leaves a partial upload
/// behind. Placeholder records (empty version) are skipped.
///
/// # Errors
///
/// Returns [`CoreError::VersionConflict`] when a binary with a semantically
/// equal version exists and `force` is not set.
pub fn resolve_conflict(
    binaries: &[BinaryRecord],
    name: &str,
    version: &str,
    force: bool,
) -> CoreResult<UploadPlan> {
    let existing = binaries
        .iter()
        .find(|binary| !binary.is_placeholder() && versions_equal(&binary.version, version));

    match existing {
        None => Ok(UploadPlan::Fresh),
        Some(binary) if force => Ok(UploadPlan::Replace(binary.clone())),
        Some(_) => Err(CoreError::VersionConflict {
            name: name.to_string(),
            version: version.to_string(),
        }),
    }
}

/// Builds the final binary record metadata from the descriptor.
///
/// The set of changelog locales is store-defined; the archive only supplies
/// text per language. Missing languages and an empty compatibility set are
/// collected as warnings, never failures.
fn assemble_binary(
    mut binary: BinaryRecord,
    descriptor: &PluginDescriptor,
    platform_versions: &[PlatformVersion],
    warnings: &mut Vec<ReleaseWarning>,
) -> BinaryRecord {
    binary.version = descriptor.version.clone();

    for entry in &mut binary.changelogs {
        let language = language_code(&entry.locale).to_string();
        let text = match descriptor.notes_for(&language) {
            Some(text) => text.to_string(),
            None => {
                warnings.push(ReleaseWarning::MissingReleaseNotes {
                    locale: entry.locale.clone(),
                    language,
                });
                String::new()
            }
        };
        entry.text = pad_release_notes(&text);
    }

    binary.compatible_versions = platform_versions
        .iter()
        .filter(|platform| platform.selectable && descriptor.compatibility.matches(&platform.name))
        .map(|platform| platform.name.clone())
        .collect();
    if binary.compatible_versions.is_empty() {
        warnings.push(ReleaseWarning::EmptyCompatibility);
    }

    binary
}

/// Drives one plugin release against a marketplace.
pub struct Publisher<C> {
    store: C,
}

impl<C: StoreClient> Publisher<C> {
    /// Creates a publisher on top of a store client.
    #[must_use]
    pub fn new(store: C) -> Self {
        Self { store }
    }

    /// Releases the archive described by `descriptor` to the store.
    ///
    /// Locates the plugin record, resolves version conflicts, stages the
    /// payload, assembles and commits the binary metadata, and optionally
    /// submits the result for review. Any step's failure aborts the rest; a
    /// binary already saved stays saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the plugin is unknown, the version conflicts
    /// without `force`, the review ends in anything but approval, or any
    /// store call fails.
    pub async fn publish(
        &self,
        descriptor: &PluginDescriptor,
        archive: &Path,
        options: &ReleaseOptions,
    ) -> CoreResult<ReleaseReport> {
        info!(
            plugin = %descriptor.name,
            version = %descriptor.version,
            "starting release"
        );

        let plugin = self
            .store
            .find_plugin(&descriptor.name, &[Expand::Binaries, Expand::Reviews])
            .await?
            .ok_or_else(|| CoreError::PluginNotFound {
                name: descriptor.name.clone(),
            })?;
        debug!(
            id = %plugin.id,
            binaries = plugin.binaries.len(),
            "found plugin record"
        );

        let plan = resolve_conflict(
            &plugin.binaries,
            &plugin.name,
            &descriptor.version,
            options.force,
        )?;

        let plugin = self.store.enable_partial_encryption(plugin).await?;

        let plugin = match plan {
            UploadPlan::Fresh => {
                info!("uploading new binary");
                self.store.upload_binary(plugin, archive).await?
            }
            UploadPlan::Replace(existing) => {
                info!(binary = %existing.id, "replacing existing binary");
                self.store.update_binary(plugin, &existing, archive).await?
            }
        };

        let staged = plugin
            .latest_binary
            .clone()
            .ok_or_else(|| StoreError::Malformed {
                reason: "upload response carried no binary record".to_string(),
            })?;

        let platform_versions = self.store.platform_versions().await?;
        let mut warnings = Vec::new();
        let binary = assemble_binary(staged, descriptor, &platform_versions, &mut warnings);
        for warning in &warnings {
            warn!(%warning, "release warning");
        }

        let plugin = self.store.save_plugin_binary(plugin, binary).await?;
        info!(version = %descriptor.version, "binary record saved");

        if !options.request_review {
            return Ok(ReleaseReport {
                outcome: ReleaseOutcome::AwaitingManualRelease {
                    name: plugin.name,
                    version: descriptor.version.clone(),
                },
                warnings,
            });
        }

        let plugin = self.store.request_binary_review(plugin).await?;
        let review = plugin.reviews.last().ok_or_else(|| StoreError::Malformed {
            reason: "review request returned no review record".to_string(),
        })?;

        if review.status == APPROVED_STATUS {
            info!(version = %descriptor.version, "binary approved and published");
            Ok(ReleaseReport {
                outcome: ReleaseOutcome::Published {
                    name: plugin.name.clone(),
                    version: descriptor.version.clone(),
                },
                warnings,
            })
        } else {
            Err(CoreError::ReviewRejected {
                name: plugin.name.clone(),
                version: descriptor.version.clone(),
                status: review.status.clone(),
                comment: review.comment.clone(),
            })
        }
    }
}
