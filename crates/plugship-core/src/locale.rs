//! Locale handling.

/// Derives the language code from a region-qualified locale identifier.
///
/// The store names changelog locales with a region suffix (`de_DE`, `en-US`);
/// the archive's release notes are keyed by bare language code. Everything up
/// to the first region separator selects the note text.
#[must_use]
pub fn language_code(locale: &str) -> &str {
    locale.split(['_', '-']).next().unwrap_or(locale)
}
