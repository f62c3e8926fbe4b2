//! Zone-rules compiler invocation
//!
//! Runs an external compiler (ThreeTen-Backport's `TzdbZoneRulesCompiler`
//! by default) as a subprocess. The compiler itself is opaque; this module
//! only builds its argument list and checks its exit status.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::CompileError;

/// A resolved compiler command: program plus leading arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRulesCompiler {
    program: String,
    leading_args: Vec<String>,
}

/// Captured output of a successful compiler run
#[derive(Debug, Default)]
pub struct CompilerOutput {
    /// Arguments the compiler was run with
    pub args: Vec<String>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl ZoneRulesCompiler {
    /// A custom compiler executable
    pub fn custom(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: args,
        }
    }

    /// `java -cp <classpath> <main_class>`
    pub fn java(java: impl Into<String>, classpath: &Path, main_class: impl Into<String>) -> Self {
        Self {
            program: java.into(),
            leading_args: vec![
                "-cp".to_string(),
                classpath.display().to_string(),
                main_class.into(),
            ],
        }
    }

    /// Program that will be executed
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Full argument list for one invocation
    pub fn arguments(&self, src_dir: &Path, dst_dir: &Path, version: &str) -> Vec<String> {
        let mut args = self.leading_args.clone();
        args.extend(compute_arguments(src_dir, dst_dir, version));
        args
    }

    /// Locate the program on `PATH` (or verify an explicit path)
    pub fn resolve_program(&self) -> Result<PathBuf, CompileError> {
        which::which(&self.program).map_err(|_| CompileError::ToolNotFound {
            program: self.program.clone(),
        })
    }

    /// Run the compiler
    ///
    /// Both directories are canonicalized; `dst_dir` is created if missing.
    /// A non-zero exit status is an error carrying the captured stderr.
    pub fn run(
        &self,
        src_dir: &Path,
        dst_dir: &Path,
        version: &str,
    ) -> Result<CompilerOutput, CompileError> {
        let program = self.resolve_program()?;

        let src_dir = src_dir
            .canonicalize()
            .map_err(|_| CompileError::InputNotFound {
                path: src_dir.to_path_buf(),
            })?;
        std::fs::create_dir_all(dst_dir).map_err(|e| CompileError::Io {
            path: dst_dir.to_path_buf(),
            error: e.to_string(),
        })?;
        let dst_dir = dst_dir.canonicalize().map_err(|e| CompileError::Io {
            path: dst_dir.to_path_buf(),
            error: e.to_string(),
        })?;

        let args = self.arguments(&src_dir, &dst_dir, version);
        tracing::debug!("Running {} {}", program.display(), args.join(" "));

        let output = Command::new(&program)
            .args(&args)
            .output()
            .map_err(|e| CompileError::Spawn {
                program: self.program.clone(),
                error: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !stdout.trim().is_empty() {
            tracing::debug!("compiler stdout: {}", stdout.trim());
        }
        if !stderr.trim().is_empty() {
            tracing::debug!("compiler stderr: {}", stderr.trim());
        }

        if !output.status.success() {
            return Err(CompileError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(CompilerOutput {
            args,
            stdout,
            stderr,
        })
    }
}

/// Arguments understood by `TzdbZoneRulesCompiler` in unpacked mode
pub fn compute_arguments(src_dir: &Path, dst_dir: &Path, version: &str) -> Vec<String> {
    vec![
        "-srcdir".to_string(),
        src_dir.display().to_string(),
        "-dstdir".to_string(),
        dst_dir.display().to_string(),
        "-version".to_string(),
        version.to_string(),
        "-unpacked".to_string(),
    ]
}
