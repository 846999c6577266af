//! Descriptor assembly from an archive path.

use std::fs::File;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use plugship_core::PluginDescriptor;

use crate::changelog::read_release_notes;
use crate::error::{ArchiveError, ArchiveResult};
use crate::manifest::read_manifest;

/// Reads the plugin descriptor out of a zip archive.
///
/// Extracts the manifest and the changelog entry for the manifest's release
/// version.
///
/// # Errors
///
/// Returns an error if the archive does not exist, is not a readable zip,
/// carries no manifest, or its changelog lacks an entry for the release
/// version.
pub fn read_descriptor(archive_path: impl AsRef<Path>) -> ArchiveResult<PluginDescriptor> {
    let archive_path = archive_path.as_ref();
    debug!(?archive_path, "reading plugin archive");

    if !archive_path.exists() {
        return Err(ArchiveError::MissingArchive(archive_path.to_path_buf()));
    }

    let file = File::open(archive_path)?;
    let mut zip = ZipArchive::new(file)?;

    let manifest = read_manifest(&mut zip, archive_path)?;
    let release_notes = read_release_notes(&mut zip, &manifest.version)?;

    Ok(PluginDescriptor {
        name: manifest.name,
        version: manifest.version,
        compatibility: manifest.compatibility,
        release_notes,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use tempfile::TempDir;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    use super::*;
    use crate::{CHANGELOG_FILE, MANIFEST_FILE};

    const MANIFEST: &str = r#"
        [plugin]
        name = "rainbow-brackets"
        version = "1.2.0"
        compatibility = ">=5.0, <6.0"
    "#;

    const CHANGELOG: &str = r#"
        [notes."1.2.0"]
        en = "Fixed bug"
        de = "Fehler behoben"
    "#;

    fn write_archive(dir: &TempDir, entries: &[(&str, &str)]) -> PathBuf {
        let path = dir.path().join("plugin.zip");
        let file = File::create(&path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    #[test]
    fn test_read_descriptor_complete_archive() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(&dir, &[(MANIFEST_FILE, MANIFEST), (CHANGELOG_FILE, CHANGELOG)]);

        let descriptor = read_descriptor(&path).unwrap();
        assert_eq!(descriptor.name, "rainbow-brackets");
        assert_eq!(descriptor.version, "1.2.0");
        assert_eq!(descriptor.notes_for("de"), Some("Fehler behoben"));
        assert!(descriptor.compatibility.matches("5.2"));
    }

    #[test]
    fn test_read_descriptor_missing_archive() {
        let err = read_descriptor("/nonexistent/plugin.zip").unwrap_err();
        assert!(matches!(err, ArchiveError::MissingArchive(_)));
    }

    #[test]
    fn test_read_descriptor_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(&dir, &[(CHANGELOG_FILE, CHANGELOG)]);

        let err = read_descriptor(&path).unwrap_err();
        assert!(matches!(err, ArchiveError::MissingManifest { .. }));
    }

    #[test]
    fn test_read_descriptor_missing_changelog_entry() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(
            &dir,
            &[
                (MANIFEST_FILE, MANIFEST),
                (CHANGELOG_FILE, "[notes.\"0.9.0\"]\nen = \"old\""),
            ],
        );

        let err = read_descriptor(&path).unwrap_err();
        assert!(matches!(
            err,
            ArchiveError::MissingChangelogForVersion { version } if version == "1.2.0"
        ));
    }

    #[test]
    fn test_read_descriptor_not_a_zip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plugin.zip");
        std::fs::write(&path, "plain text, not an archive").unwrap();

        let err = read_descriptor(&path).unwrap_err();
        assert!(matches!(err, ArchiveError::Zip(_)));
    }
}
