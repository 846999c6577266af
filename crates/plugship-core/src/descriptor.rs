//! Parsed plugin manifest data.

use std::collections::HashMap;

use crate::version::CompatibilityRule;

/// Manifest and changelog data for the archive being released.
///
/// Loaded once at the CLI boundary and read-only to the release workflow.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    /// Plugin identity as registered in the store.
    pub name: String,
    /// Release version declared by the archive.
    pub version: String,
    /// Which platform versions the plugin supports.
    pub compatibility: CompatibilityRule,
    /// Release notes per language code.
    pub release_notes: HashMap<String, String>,
}

impl PluginDescriptor {
    /// Returns the release notes for a language, if the archive shipped any.
    #[must_use]
    pub fn notes_for(&self, language: &str) -> Option<&str> {
        self.release_notes.get(language).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notes_lookup() {
        let descriptor = PluginDescriptor {
            name: "rainbow-brackets".to_string(),
            version: "1.2.0".to_string(),
            compatibility: CompatibilityRule::any(),
            release_notes: HashMap::from([("de".to_string(), "Fehler behoben".to_string())]),
        };

        assert_eq!(descriptor.notes_for("de"), Some("Fehler behoben"));
        assert_eq!(descriptor.notes_for("fr"), None);
    }
}
