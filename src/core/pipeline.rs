//! Pipeline orchestration
//!
//! Runs fetch → unpack → compile → publish up to a target [`Stage`].
//! Stages run strictly in order and the first failure aborts the run.

use std::fmt;

use serde::Serialize;

use crate::core::compile::{compile_sources, CompileReport};
use crate::core::config::Settings;
use crate::core::fetch::{fetch_archive, FetchOptions, FetchReport};
use crate::core::publish::{publish_output, PublishReport};
use crate::core::unpack::{unpack_archive, UnpackReport};
use crate::error::TzdbError;
use crate::infra::download::ProgressCallback;

/// A pipeline stage; later stages depend on every earlier one
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Download the release archive
    Fetch,
    /// Extract the archive
    Unpack,
    /// Run the zone-rules compiler
    Compile,
    /// Copy `tzdb.dat` into the resources directory
    Publish,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch => write!(f, "fetch"),
            Self::Unpack => write!(f, "unpack"),
            Self::Compile => write!(f, "compile"),
            Self::Publish => write!(f, "publish"),
        }
    }
}

/// Options for a pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Re-download the archive even if cached
    pub force: bool,
}

/// Callback invoked as each stage starts
pub type StageCallback = Box<dyn Fn(Stage) + Send + Sync>;

/// Progress hooks for a pipeline run
#[derive(Default)]
pub struct PipelineHooks {
    /// Download progress of the release archive
    pub download_progress: Option<ProgressCallback>,
    /// Called before each stage runs
    pub on_stage: Option<StageCallback>,
}

impl PipelineHooks {
    fn enter(&self, stage: Stage) {
        tracing::debug!("Entering stage {stage}");
        if let Some(cb) = &self.on_stage {
            cb(stage);
        }
    }
}

/// What each stage that ran did
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    /// Release that was built
    pub version: String,
    /// Last stage requested
    pub target: Stage,
    /// Fetch outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchReport>,
    /// Unpack outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unpack: Option<UnpackReport>,
    /// Compile outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compile: Option<CompileReport>,
    /// Publish outcome
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publish: Option<PublishReport>,
}

/// Run every stage up to and including `target`
pub async fn run_pipeline(
    settings: &Settings,
    target: Stage,
    options: &PipelineOptions,
    mut hooks: PipelineHooks,
) -> Result<PipelineReport, TzdbError> {
    let layout = settings.layout();
    let mut report = PipelineReport {
        version: settings.version.to_string(),
        target,
        fetch: None,
        unpack: None,
        compile: None,
        publish: None,
    };

    tracing::info!("Running tzdb {} pipeline up to {target}", settings.version);

    let fetch_options = FetchOptions {
        force: options.force,
    };
    hooks.enter(Stage::Fetch);
    let progress = hooks.download_progress.take();
    report.fetch = Some(fetch_archive(settings, &fetch_options, progress).await?);
    if target == Stage::Fetch {
        return Ok(report);
    }

    hooks.enter(Stage::Unpack);
    report.unpack = Some(unpack_archive(&layout)?);
    if target == Stage::Unpack {
        return Ok(report);
    }

    hooks.enter(Stage::Compile);
    report.compile = Some(compile_sources(settings).await?);
    if target == Stage::Compile {
        return Ok(report);
    }

    hooks.enter(Stage::Publish);
    report.publish = Some(publish_output(&layout.dat_dir(), &settings.resources_dir)?);
    Ok(report)
}
