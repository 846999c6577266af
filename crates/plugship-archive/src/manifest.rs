//! Plugin manifest extraction.

use std::io::{Read, Seek};
use std::path::Path;

use serde::Deserialize;
use zip::ZipArchive;
use zip::result::ZipError;

use plugship_core::CompatibilityRule;

use crate::error::{ArchiveError, ArchiveResult};

/// Manifest file name inside the archive.
pub const MANIFEST_FILE: &str = "plugin.toml";

#[derive(Debug, Deserialize)]
struct ManifestDoc {
    plugin: ManifestPlugin,
}

#[derive(Debug, Deserialize)]
struct ManifestPlugin {
    name: String,
    version: String,
    compatibility: Option<String>,
}

/// Validated manifest content.
#[derive(Debug)]
pub(crate) struct Manifest {
    pub name: String,
    pub version: String,
    pub compatibility: CompatibilityRule,
}

/// Reads and validates `plugin.toml` from the open archive.
pub(crate) fn read_manifest<R: Read + Seek>(
    zip: &mut ZipArchive<R>,
    archive_path: &Path,
) -> ArchiveResult<Manifest> {
    let raw = match zip.by_name(MANIFEST_FILE) {
        Ok(mut entry) => {
            let mut raw = String::new();
            entry.read_to_string(&mut raw)?;
            raw
        }
        Err(ZipError::FileNotFound) => {
            return Err(ArchiveError::MissingManifest {
                path: archive_path.to_path_buf(),
            });
        }
        Err(err) => return Err(err.into()),
    };

    let doc: ManifestDoc = toml::from_str(&raw).map_err(|err| ArchiveError::InvalidManifest {
        reason: err.to_string(),
    })?;

    if doc.plugin.name.trim().is_empty() {
        return Err(ArchiveError::InvalidManifest {
            reason: "plugin name is empty".to_string(),
        });
    }
    if doc.plugin.version.trim().is_empty() {
        return Err(ArchiveError::InvalidManifest {
            reason: "plugin version is empty".to_string(),
        });
    }

    let compatibility = match doc.plugin.compatibility {
        Some(rule) => {
            CompatibilityRule::parse(&rule).map_err(|err| ArchiveError::InvalidManifest {
                reason: format!("bad compatibility rule \"{rule}\": {err}"),
            })?
        }
        None => CompatibilityRule::any(),
    };

    Ok(Manifest {
        name: doc.plugin.name,
        version: doc.plugin.version,
        compatibility,
    })
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};
    use std::path::PathBuf;

    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    use super::*;

    fn archive_with(entries: &[(&str, &str)]) -> ZipArchive<Cursor<Vec<u8>>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        let cursor = writer.finish().unwrap();
        ZipArchive::new(cursor).unwrap()
    }

    #[test]
    fn test_read_manifest_valid() {
        let mut zip = archive_with(&[(
            MANIFEST_FILE,
            r#"
            [plugin]
            name = "rainbow-brackets"
            version = "1.2.0"
            compatibility = ">=5.0, <6.0"
            "#,
        )]);

        let manifest = read_manifest(&mut zip, &PathBuf::from("p.zip")).unwrap();
        assert_eq!(manifest.name, "rainbow-brackets");
        assert_eq!(manifest.version, "1.2.0");
        assert!(manifest.compatibility.matches("5.1"));
        assert!(!manifest.compatibility.matches("6.0"));
    }

    #[test]
    fn test_read_manifest_defaults_to_open_compatibility() {
        let mut zip = archive_with(&[(
            MANIFEST_FILE,
            r#"
            [plugin]
            name = "rainbow-brackets"
            version = "1.2.0"
            "#,
        )]);

        let manifest = read_manifest(&mut zip, &PathBuf::from("p.zip")).unwrap();
        assert!(manifest.compatibility.matches("1.0"));
        assert!(manifest.compatibility.matches("2024.2"));
    }

    #[test]
    fn test_read_manifest_missing_entry() {
        let mut zip = archive_with(&[("readme.txt", "hello")]);

        let err = read_manifest(&mut zip, &PathBuf::from("p.zip")).unwrap_err();
        assert!(matches!(err, ArchiveError::MissingManifest { .. }));
    }

    #[test]
    fn test_read_manifest_rejects_empty_name() {
        let mut zip = archive_with(&[(
            MANIFEST_FILE,
            r#"
            [plugin]
            name = ""
            version = "1.2.0"
            "#,
        )]);

        let err = read_manifest(&mut zip, &PathBuf::from("p.zip")).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidManifest { .. }));
    }

    #[test]
    fn test_read_manifest_rejects_bad_rule() {
        let mut zip = archive_with(&[(
            MANIFEST_FILE,
            r#"
            [plugin]
            name = "rainbow-brackets"
            version = "1.2.0"
            compatibility = ">=>nonsense"
            "#,
        )]);

        let err = read_manifest(&mut zip, &PathBuf::from("p.zip")).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidManifest { .. }));
    }

    #[test]
    fn test_read_manifest_rejects_invalid_toml() {
        let mut zip = archive_with(&[(MANIFEST_FILE, "not toml [[[")]);

        let err = read_manifest(&mut zip, &PathBuf::from("p.zip")).unwrap_err();
        assert!(matches!(err, ArchiveError::InvalidManifest { .. }));
    }
}
