//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a conventional tzdb release (`YYYYx`)
    pub fn tzdb_version() -> impl Strategy<Value = String> {
        (1993u32..2100, proptest::char::range('a', 'z'))
            .prop_map(|(year, letter)| format!("{year}{letter}"))
    }

    /// Generate a valid SHA256 hash (64 hex characters)
    pub fn sha256_hash() -> impl Strategy<Value = String> {
        "[0-9a-f]{64}"
    }

    /// Generate a relative file path inside a compiler output directory
    pub fn relative_file_path() -> impl Strategy<Value = String> {
        proptest::collection::vec("[a-z][a-z0-9_]{0,8}", 1..4)
            .prop_map(|parts| format!("{}.dat", parts.join("/")))
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_tzdb_version_generator(version in tzdb_version()) {
            prop_assert_eq!(version.len(), 5);
            prop_assert!(version[..4].chars().all(|c| c.is_ascii_digit()));
            prop_assert!(version[4..].chars().all(|c| c.is_ascii_lowercase()));
        }

        #[test]
        fn test_sha256_generator(hash in sha256_hash()) {
            prop_assert_eq!(hash.len(), 64);
            prop_assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn test_relative_file_path_generator(path in relative_file_path()) {
            prop_assert!(!path.starts_with('/'));
            prop_assert!(path.ends_with(".dat"));
        }
    }
}
