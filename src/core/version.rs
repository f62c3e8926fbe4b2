//! tzdb release identifiers
//!
//! A [`TzdbVersion`] names the IANA release to build (e.g. `2021a`) and
//! parameterizes every build path and the download URL.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::config::urls::VERSION_PLACEHOLDER;
use crate::error::ConfigError;

/// Upstream release naming: four-digit year followed by a letter
const RELEASE_PATTERN: &str = r"^\d{4}[a-z]$";

fn release_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(RELEASE_PATTERN).expect("release pattern is valid"))
}

/// A validated tzdb release identifier
///
/// Only non-empty ASCII alphanumeric strings are accepted, since the
/// version becomes a path component. Whether the release actually exists
/// is decided by the upstream server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TzdbVersion(String);

impl TzdbVersion {
    /// Parse and validate a version string
    pub fn parse(version: &str) -> Result<Self, ConfigError> {
        let trimmed = version.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::InvalidVersion {
                version: version.to_string(),
                reason: "version must not be empty".to_string(),
            });
        }
        if let Some(bad) = trimmed.chars().find(|c| !c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidVersion {
                version: version.to_string(),
                reason: format!("unexpected character '{bad}'"),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The version as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the version follows the upstream `YYYYx` release convention
    pub fn is_conventional(&self) -> bool {
        release_regex().is_match(&self.0)
    }

    /// Substitute this version into a URL template
    pub fn url_from_template(&self, template: &str) -> Result<String, ConfigError> {
        if !template.contains(VERSION_PLACEHOLDER) {
            return Err(ConfigError::InvalidUrlTemplate {
                template: template.to_string(),
            });
        }
        Ok(template.replace(VERSION_PLACEHOLDER, &self.0))
    }

    /// File name of the cached release archive
    pub fn archive_file_name(&self) -> String {
        format!("{}.tar.gz", self.0)
    }
}

impl fmt::Display for TzdbVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TzdbVersion {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TzdbVersion> for String {
    fn from(version: TzdbVersion) -> Self {
        version.0
    }
}

impl std::str::FromStr for TzdbVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::urls::TZDATA_RELEASE_TEMPLATE;
    use crate::test_utils::generators::tzdb_version;
    use proptest::prelude::*;

    #[test]
    fn test_parse_valid_version() {
        let version = TzdbVersion::parse("2021a").unwrap();
        assert_eq!(version.as_str(), "2021a");
        assert!(version.is_conventional());
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let version = TzdbVersion::parse("  2024b\n").unwrap();
        assert_eq!(version.as_str(), "2024b");
    }

    #[test]
    fn test_parse_empty_rejected() {
        assert!(matches!(
            TzdbVersion::parse(""),
            Err(ConfigError::InvalidVersion { .. })
        ));
        assert!(TzdbVersion::parse("   ").is_err());
    }

    #[test]
    fn test_parse_path_traversal_rejected() {
        assert!(TzdbVersion::parse("../2021a").is_err());
        assert!(TzdbVersion::parse("2021a/x").is_err());
        assert!(TzdbVersion::parse("2021 a").is_err());
    }

    #[test]
    fn test_unconventional_version_still_parses() {
        let version = TzdbVersion::parse("latest").unwrap();
        assert!(!version.is_conventional());
    }

    #[test]
    fn test_download_url_for_2021a() {
        let version = TzdbVersion::parse("2021a").unwrap();
        assert_eq!(
            version.url_from_template(TZDATA_RELEASE_TEMPLATE).unwrap(),
            "https://data.iana.org/time-zones/releases/tzdata2021a.tar.gz"
        );
    }

    #[test]
    fn test_template_without_placeholder_rejected() {
        let version = TzdbVersion::parse("2021a").unwrap();
        assert!(matches!(
            version.url_from_template("https://example.com/tzdata.tar.gz"),
            Err(ConfigError::InvalidUrlTemplate { .. })
        ));
    }

    #[test]
    fn test_archive_file_name() {
        let version = TzdbVersion::parse("2022g").unwrap();
        assert_eq!(version.archive_file_name(), "2022g.tar.gz");
    }

    #[test]
    fn test_deserialize_validates() {
        #[derive(Deserialize)]
        struct Wrapper {
            version: TzdbVersion,
        }

        let ok: Wrapper = toml::from_str(r#"version = "2023c""#).unwrap();
        assert_eq!(ok.version.as_str(), "2023c");

        let bad: Result<Wrapper, _> = toml::from_str(r#"version = """#);
        assert!(bad.is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The release URL is the fixed template with the version spliced in
        #[test]
        fn prop_release_url_format(version in tzdb_version()) {
            let parsed = TzdbVersion::parse(&version).unwrap();
            let url = parsed.url_from_template(TZDATA_RELEASE_TEMPLATE).unwrap();
            prop_assert_eq!(
                url,
                format!("https://data.iana.org/time-zones/releases/tzdata{version}.tar.gz")
            );
            prop_assert!(parsed.is_conventional());
        }

        /// Anything containing a path separator is rejected
        #[test]
        fn prop_separators_rejected(prefix in "[a-z0-9]{0,5}", suffix in "[a-z0-9]{0,5}") {
            let with_slash = format!("{prefix}/{suffix}");
            prop_assert!(TzdbVersion::parse(&with_slash).is_err());
        }
    }
}
