//! Changelog document extraction.

use std::collections::HashMap;
use std::io::{Read, Seek};

use serde::Deserialize;
use zip::ZipArchive;
use zip::result::ZipError;

use plugship_core::versions_equal;

use crate::error::{ArchiveError, ArchiveResult};

/// Changelog file name inside the archive.
pub const CHANGELOG_FILE: &str = "changelog.toml";

/// `changelog.toml` holds one table per released version, each mapping a
/// language code to the note text for that release.
#[derive(Debug, Deserialize)]
struct ChangelogDoc {
    #[serde(default)]
    notes: HashMap<String, HashMap<String, String>>,
}

/// Reads the release notes for one version from the open archive.
///
/// The version key is matched semantically, so a `1.0` table serves a
/// `1.0.0` release.
pub(crate) fn read_release_notes<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    version: &str,
) -> ArchiveResult<HashMap<String, String>> {
    let raw = match zip.by_name(CHANGELOG_FILE) {
        Ok(mut entry) => {
            let mut raw = String::new();
            entry.read_to_string(&mut raw)?;
            raw
        }
        // No changelog document at all means no entry for this version either.
        Err(ZipError::FileNotFound) => {
            return Err(ArchiveError::MissingChangelogForVersion {
                version: version.to_string(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    let doc: ChangelogDoc = toml::from_str(&raw).map_err(ArchiveError::InvalidChangelog)?;

    doc.notes
        .iter()
        .find(|(key, _)| versions_equal(key, version))
        .map(|(_, notes)| notes.clone())
        .ok_or_else(|| ArchiveError::MissingChangelogForVersion {
            version: version.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn archive_with_changelog(content: &str) -> ZipArchive<Cursor<Vec<u8>>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(CHANGELOG_FILE, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
        let cursor = writer.finish().unwrap();
        ZipArchive::new(cursor).unwrap()
    }

    #[test]
    fn test_read_notes_for_version() {
        let mut zip = archive_with_changelog(
            r#"
            [notes."1.2.0"]
            en = "Fixed bug"
            de = "Fehler behoben"

            [notes."1.1.0"]
            en = "Older release"
            "#,
        );

        let notes = read_release_notes(&mut zip, "1.2.0").unwrap();
        assert_eq!(notes.get("en").map(String::as_str), Some("Fixed bug"));
        assert_eq!(notes.get("de").map(String::as_str), Some("Fehler behoben"));
        assert_eq!(notes.len(), 2);
    }

    #[test]
    fn test_read_notes_matches_version_semantically() {
        let mut zip = archive_with_changelog(
            r#"
            [notes."1.2"]
            en = "Fixed bug"
            "#,
        );

        let notes = read_release_notes(&mut zip, "1.2.0").unwrap();
        assert_eq!(notes.get("en").map(String::as_str), Some("Fixed bug"));
    }

    #[test]
    fn test_read_notes_missing_version() {
        let mut zip = archive_with_changelog(
            r#"
            [notes."1.1.0"]
            en = "Older release"
            "#,
        );

        let err = read_release_notes(&mut zip, "1.2.0").unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::MissingChangelogForVersion { version } if version == "1.2.0"
        ));
    }

    #[test]
    fn test_read_notes_missing_document() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("plugin.toml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"[plugin]").unwrap();
        let cursor = writer.finish().unwrap();
        let mut zip = ZipArchive::new(cursor).unwrap();

        let err = read_release_notes(&mut zip, "1.2.0").unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::MissingChangelogForVersion { .. }
        ));
    }

    #[test]
    fn test_read_notes_invalid_toml() {
        let mut zip = archive_with_changelog("broken [[[");

        let err = read_release_notes(&mut zip, "1.2.0").unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidChangelog(_)));
    }
}
