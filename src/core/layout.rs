//! Build directory layout
//!
//! All stage paths are derived from the build directory and the version:
//!
//! ```text
//! <build>/tzdb/<version>/download/<version>.tar.gz
//! <build>/tzdb/<version>/unpacked/<version>/
//! <build>/tzdb/<version>/dat/tzdb.dat
//! <build>/tzdb/compiler/threetenbp-<v>.jar
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::defaults::PUBLISHED_FILE;
use crate::core::version::TzdbVersion;

const TZDB_SUBDIR: &str = "tzdb";
const DOWNLOAD_SUBDIR: &str = "download";
const UNPACKED_SUBDIR: &str = "unpacked";
const DAT_SUBDIR: &str = "dat";
const COMPILER_SUBDIR: &str = "compiler";

/// Paths used by the pipeline for one version
#[derive(Debug, Clone, Serialize)]
pub struct BuildLayout {
    build_dir: PathBuf,
    version: TzdbVersion,
}

impl BuildLayout {
    /// Create a layout rooted at `build_dir`
    pub fn new(build_dir: impl Into<PathBuf>, version: TzdbVersion) -> Self {
        Self {
            build_dir: build_dir.into(),
            version,
        }
    }

    /// The version this layout is keyed by
    pub fn version(&self) -> &TzdbVersion {
        &self.version
    }

    /// `<build>/tzdb`, shared by all versions
    pub fn tzdb_root(&self) -> PathBuf {
        tzdb_root_in(&self.build_dir)
    }

    /// `<build>/tzdb/<version>`, owned by this version only
    pub fn version_root(&self) -> PathBuf {
        self.tzdb_root().join(self.version.as_str())
    }

    /// Cached release archive
    pub fn archive_path(&self) -> PathBuf {
        self.version_root()
            .join(DOWNLOAD_SUBDIR)
            .join(self.version.archive_file_name())
    }

    /// Directory handed to the compiler as `-srcdir`
    ///
    /// In unpacked mode the compiler reads `<srcdir>/<version>/`.
    pub fn unpacked_root(&self) -> PathBuf {
        self.version_root().join(UNPACKED_SUBDIR)
    }

    /// Directory the archive is extracted into
    pub fn unpacked_dir(&self) -> PathBuf {
        self.unpacked_root().join(self.version.as_str())
    }

    /// Compiler output directory (`-dstdir`)
    pub fn dat_dir(&self) -> PathBuf {
        self.version_root().join(DAT_SUBDIR)
    }

    /// Canonical compiled file
    pub fn dat_file(&self) -> PathBuf {
        self.dat_dir().join(PUBLISHED_FILE)
    }

    /// Directory holding fetched compiler jars
    pub fn compiler_dir(&self) -> PathBuf {
        self.tzdb_root().join(COMPILER_SUBDIR)
    }

    /// Cached ThreeTen-Backport jar for a release
    pub fn threetenbp_jar(&self, threetenbp_version: &str) -> PathBuf {
        self.compiler_dir()
            .join(format!("threetenbp-{threetenbp_version}.jar"))
    }
}

/// `<build>/tzdb` for a build directory, independent of any version
pub fn tzdb_root_in(build_dir: &Path) -> PathBuf {
    build_dir.join(TZDB_SUBDIR)
}

/// Resolve `path` against `base` unless it is already absolute
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
