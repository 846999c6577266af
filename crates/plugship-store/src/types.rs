//! Wire types for the marketplace API.

use serde::{Deserialize, Serialize};

use plugship_core::{BinaryRecord, ChangelogEntry, PlatformVersion, PluginRecord, ReviewRecord};

#[derive(Debug, Serialize)]
pub(crate) struct AuthRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PluginDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub binaries: Vec<BinaryDto>,
    #[serde(default)]
    pub reviews: Vec<ReviewDto>,
    #[serde(default)]
    pub latest_binary: Option<BinaryDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BinaryDto {
    pub id: String,
    /// Absent for placeholder records the store created itself.
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub changelogs: Vec<ChangelogDto>,
    #[serde(default)]
    pub compatible_versions: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangelogDto {
    pub locale: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewDto {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlatformVersionDto {
    pub name: String,
    #[serde(default)]
    pub selectable: bool,
}

/// Body of the metadata commit call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaveBinaryBody<'a> {
    pub version: &'a str,
    pub changelogs: Vec<ChangelogBody<'a>>,
    pub compatible_versions: &'a [String],
}

#[derive(Debug, Serialize)]
pub(crate) struct ChangelogBody<'a> {
    pub locale: &'a str,
    pub text: &'a str,
}

impl<'a> SaveBinaryBody<'a> {
    pub fn from_record(binary: &'a BinaryRecord) -> Self {
        Self {
            version: &binary.version,
            changelogs: binary
                .changelogs
                .iter()
                .map(|entry| ChangelogBody {
                    locale: &entry.locale,
                    text: &entry.text,
                })
                .collect(),
            compatible_versions: &binary.compatible_versions,
        }
    }
}

impl From<PluginDto> for PluginRecord {
    fn from(dto: PluginDto) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            binaries: dto.binaries.into_iter().map(Into::into).collect(),
            reviews: dto.reviews.into_iter().map(Into::into).collect(),
            latest_binary: dto.latest_binary.map(Into::into),
        }
    }
}

impl From<BinaryDto> for BinaryRecord {
    fn from(dto: BinaryDto) -> Self {
        Self {
            id: dto.id,
            version: dto.version,
            changelogs: dto.changelogs.into_iter().map(Into::into).collect(),
            compatible_versions: dto.compatible_versions,
        }
    }
}

impl From<ChangelogDto> for ChangelogEntry {
    fn from(dto: ChangelogDto) -> Self {
        Self {
            locale: dto.locale,
            text: dto.text,
        }
    }
}

impl From<ReviewDto> for ReviewRecord {
    fn from(dto: ReviewDto) -> Self {
        Self {
            status: dto.status,
            comment: dto.comment,
        }
    }
}

impl From<PlatformVersionDto> for PlatformVersion {
    fn from(dto: PlatformVersionDto) -> Self {
        Self {
            name: dto.name,
            selectable: dto.selectable,
        }
    }
}
