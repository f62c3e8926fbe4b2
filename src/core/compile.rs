//! Compile stage
//!
//! Resolves the zone-rules compiler from the settings, fetching the
//! ThreeTen-Backport jar from Maven Central when no classpath is configured,
//! and runs it over the unpacked sources.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::urls;
use crate::core::config::{CompilerCommand, Settings};
use crate::core::fetch::{download_manager, fetch_file};
use crate::error::CompileError;
use crate::infra::compiler::ZoneRulesCompiler;
use crate::infra::filesystem::{list_files, recreate_dir};

/// Outcome of the compile stage
#[derive(Debug, Clone, Serialize)]
pub struct CompileReport {
    /// Program that was run
    pub program: String,
    /// Arguments passed to it
    pub args: Vec<String>,
    /// Compiler output directory
    pub output_dir: PathBuf,
    /// Files the compiler emitted, relative to `output_dir`
    pub files: Vec<PathBuf>,
}

/// Turn the configured command into a runnable compiler
///
/// Fetches the ThreeTen-Backport jar into the build directory if needed.
pub async fn resolve_compiler(settings: &Settings) -> Result<ZoneRulesCompiler, CompileError> {
    match &settings.compiler {
        CompilerCommand::Custom { program, args } => {
            Ok(ZoneRulesCompiler::custom(program.clone(), args.clone()))
        }
        CompilerCommand::Java {
            java,
            classpath: Some(classpath),
            main_class,
            ..
        } => Ok(ZoneRulesCompiler::java(java.clone(), classpath, main_class.clone())),
        CompilerCommand::Java {
            java,
            classpath: None,
            main_class,
            threetenbp_version,
            repository,
        } => {
            let jar = settings.layout().threetenbp_jar(threetenbp_version);
            let report = fetch_file(
                &download_manager(settings),
                &urls::threetenbp_jar(repository, threetenbp_version),
                &jar,
                None,
                false,
                None,
            )
            .await?;
            tracing::debug!("Compiler classpath: {}", report.path.display());
            Ok(ZoneRulesCompiler::java(java.clone(), &jar, main_class.clone()))
        }
    }
}

/// Compile the unpacked sources with an already-resolved compiler
///
/// The output directory is emptied first so its contents reflect only this run.
pub fn compile_with(
    compiler: &ZoneRulesCompiler,
    settings: &Settings,
) -> Result<CompileReport, CompileError> {
    let layout = settings.layout();
    let unpacked = layout.unpacked_dir();
    if !unpacked.is_dir() {
        return Err(CompileError::InputNotFound { path: unpacked });
    }

    let output_dir = layout.dat_dir();
    recreate_dir(&output_dir).map_err(|e| CompileError::Io {
        path: output_dir.clone(),
        error: e.to_string(),
    })?;

    // In unpacked mode the compiler reads <srcdir>/<version>/
    let src_dir = layout.unpacked_root();
    tracing::info!("Compiling tzdb {} with {}", layout.version(), compiler.program());
    let output = compiler.run(&src_dir, &output_dir, layout.version().as_str())?;

    let files = list_files(&output_dir).map_err(|e| CompileError::Io {
        path: output_dir.clone(),
        error: e.to_string(),
    })?;

    Ok(CompileReport {
        program: compiler.program().to_string(),
        args: output.args,
        output_dir,
        files,
    })
}

/// Resolve the compiler and run it
pub async fn compile_sources(settings: &Settings) -> Result<CompileReport, CompileError> {
    let compiler = resolve_compiler(settings).await?;
    compile_with(&compiler, settings)
}
