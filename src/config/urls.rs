//! Upstream URLs

/// Placeholder substituted with the tzdb version in URL templates
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// IANA tzdata release archive
pub const TZDATA_RELEASE_TEMPLATE: &str =
    "https://data.iana.org/time-zones/releases/tzdata{version}.tar.gz";

/// Maven Central base URL
pub const MAVEN_CENTRAL: &str = "https://repo1.maven.org/maven2";

/// URL of the ThreeTen-Backport jar for a release in a Maven repository
pub fn threetenbp_jar(repository: &str, version: &str) -> String {
    let repository = repository.trim_end_matches('/');
    format!("{repository}/org/threeten/threetenbp/{version}/threetenbp-{version}.jar")
}
