//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

/// Test project context
///
/// Holds a project directory and an isolated global config directory so
/// tests never read the developer's own `config.toml`.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary global config directory
    pub config_home: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            config_home: TempDir::new().expect("Failed to create config directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// A `tzdb` command running in this project
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tzdb"));
        cmd.current_dir(self.path())
            .env("TZDB_CONFIG_DIR", self.config_home.path())
            .env_remove("TZDB_VERSION")
            .env_remove("RUST_LOG")
            .args(args);
        cmd
    }

    /// Run `tzdb` with `args` and wait for it
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute tzdb")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Gzipped tarball holding `files`
pub fn tar_gz(files: &[(&str, &str)]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, content) in files {
        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder
            .append_data(&mut header, name, content.as_bytes())
            .expect("Failed to append tar entry");
    }
    let tar = builder.into_inner().expect("Failed to finish tar");

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&tar).expect("Failed to gzip");
    encoder.finish().expect("Failed to finish gzip")
}

/// A small tzdata-like release
pub fn sample_release() -> Vec<u8> {
    tar_gz(&[
        ("africa", "Zone Africa/Abidjan -0:16:08 - LMT 1912\n"),
        ("europe", "Zone Europe/Paris 0:09:21 - LMT 1891 Mar 16\n"),
        ("version", "2021a\n"),
    ])
}

/// Write an executable shell script
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
    let mut perms = std::fs::metadata(&path)
        .expect("Failed to stat script")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("Failed to chmod script");
    path
}

/// Compiler stand-in that writes `TZDB.dat` like the real one
#[cfg(unix)]
pub fn stub_compiler(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "fake-tzdb-compiler",
        r#"while [ $# -gt 0 ]; do
  case "$1" in
    -srcdir) src="$2"; shift 2 ;;
    -dstdir) dst="$2"; shift 2 ;;
    -version) ver="$2"; shift 2 ;;
    *) shift ;;
  esac
done
[ -f "$src/$ver/europe" ] || { echo "missing $src/$ver" >&2; exit 3; }
printf 'TZDB %s' "$ver" > "$dst/TZDB.dat""#,
    )
}

/// `tzdb.toml` pointing downloads at `server_uri` and compiling with `program`
pub fn project_config(version: &str, server_uri: &str, program: &Path) -> String {
    format!(
        r#"version = "{version}"

[download]
url_template = "{server_uri}/releases/tzdata{{version}}.tar.gz"

[compiler]
program = "{}"
"#,
        program.display()
    )
}
