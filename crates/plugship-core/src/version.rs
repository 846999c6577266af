//! Version parsing and comparison.
//!
//! Store version names are semantic-version-like but frequently partial
//! (`1.0`, `2024.2`), which the strict `semver` grammar rejects. The helpers
//! here pad missing components before comparing.

use std::fmt;
use std::str::FromStr;

use semver::{Version, VersionReq};

/// Parses a version string, padding missing minor/patch components.
///
/// `1.0` parses as `1.0.0`, `2024.2-eap` as `2024.2.0-eap`. Returns `None`
/// for strings that are not versions at all.
#[must_use]
pub fn parse_lenient(input: &str) -> Option<Version> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(version) = Version::parse(input) {
        return Some(version);
    }

    // Pre-release and build metadata stay behind the padded numeric core.
    let (core, suffix) = match input.find(['-', '+']) {
        Some(at) => input.split_at(at),
        None => (input, ""),
    };
    let components = core.split('.').count();
    if components >= 3 {
        return None;
    }
    let padded = format!("{core}{}{suffix}", ".0".repeat(3 - components));
    Version::parse(&padded).ok()
}

/// Semantic-version equality, not string equality.
///
/// `"1.0"` equals `"1.0.0"`. Strings that do not parse as versions fall back
/// to literal comparison.
#[must_use]
pub fn versions_equal(a: &str, b: &str) -> bool {
    match (parse_lenient(a), parse_lenient(b)) {
        (Some(a), Some(b)) => a == b,
        _ => a.trim() == b.trim(),
    }
}

/// A plugin's compatibility constraint over platform version names.
#[derive(Debug, Clone)]
pub struct CompatibilityRule(VersionReq);

impl CompatibilityRule {
    /// Parses a requirement string such as `>=2024.1, <2025.2`.
    ///
    /// # Errors
    ///
    /// Returns an error if the requirement syntax is invalid.
    pub fn parse(input: &str) -> Result<Self, semver::Error> {
        VersionReq::parse(input).map(Self)
    }

    /// A rule that matches every platform version.
    #[must_use]
    pub fn any() -> Self {
        Self(VersionReq::STAR)
    }

    /// Whether the named platform version satisfies the rule.
    ///
    /// Names that do not parse as versions never match.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        parse_lenient(name).is_some_and(|version| self.0.matches(&version))
    }
}

impl fmt::Display for CompatibilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for CompatibilityRule {
    type Err = semver::Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        Self::parse(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient_full() {
        assert_eq!(parse_lenient("1.2.3"), Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_parse_lenient_pads_minor_and_patch() {
        assert_eq!(parse_lenient("1.0"), Some(Version::new(1, 0, 0)));
        assert_eq!(parse_lenient("5"), Some(Version::new(5, 0, 0)));
    }

    #[test]
    fn test_parse_lenient_keeps_prerelease() {
        let version = parse_lenient("2024.2-eap").unwrap();
        assert_eq!(version.major, 2024);
        assert_eq!(version.minor, 2);
        assert_eq!(version.patch, 0);
        assert_eq!(version.pre.as_str(), "eap");
    }

    #[test]
    fn test_parse_lenient_rejects_garbage() {
        assert!(parse_lenient("not-a-version").is_none());
        assert!(parse_lenient("").is_none());
        assert!(parse_lenient("1.2.3.4").is_none());
    }

    #[test]
    fn test_versions_equal_semantic() {
        assert!(versions_equal("1.0", "1.0.0"));
        assert!(versions_equal("1.0.0", "1.0"));
        assert!(versions_equal("2024.2", "2024.2.0"));
    }

    #[test]
    fn test_versions_equal_distinct() {
        assert!(!versions_equal("1.0", "1.0.1"));
        assert!(!versions_equal("1.0", "2.0"));
    }

    #[test]
    fn test_versions_equal_unparseable_falls_back_to_literal() {
        assert!(versions_equal("snapshot", "snapshot"));
        assert!(!versions_equal("snapshot", "nightly"));
    }

    #[test]
    fn test_rule_matches_partial_names() {
        let rule = CompatibilityRule::parse(">=5.0, <6.0").unwrap();
        assert!(rule.matches("5.0"));
        assert!(rule.matches("5.2"));
        assert!(!rule.matches("6.0"));
        assert!(!rule.matches("4.9"));
    }

    #[test]
    fn test_rule_rejects_unparseable_names() {
        let rule = CompatibilityRule::any();
        assert!(rule.matches("1.0"));
        assert!(!rule.matches("whatever"));
    }

    #[test]
    fn test_rule_from_str() {
        let rule: CompatibilityRule = ">=2024.1".parse().unwrap();
        assert!(rule.matches("2024.1"));
        assert!(rule.matches("2024.2"));
    }

    #[test]
    fn test_rule_parse_invalid() {
        assert!(CompatibilityRule::parse(">=>abc").is_err());
    }
}
