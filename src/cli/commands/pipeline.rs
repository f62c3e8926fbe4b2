//! CLI implementation for the stage commands
//!
//! `fetch`, `unpack`, `compile`, and `publish` run the pipeline up to their
//! stage and print a summary of what each stage did.

use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use indicatif::ProgressBar;

use crate::cli::output::{
    create_download_bar, create_spinner, download_progress, status, status_line, OutputConfig,
};
use crate::core::config::Settings;
use crate::core::pipeline::{run_pipeline, PipelineHooks, PipelineOptions, PipelineReport, Stage};

/// Execute a stage command
pub async fn execute(settings: &Settings, target: Stage, force: bool) -> Result<()> {
    let output = OutputConfig::global();
    let options = PipelineOptions { force };

    let download_bar = create_download_bar(0);
    let spinner: Arc<Mutex<Option<ProgressBar>>> = Arc::new(Mutex::new(None));

    let hooks = PipelineHooks {
        download_progress: Some(download_progress(download_bar.clone())),
        on_stage: Some({
            let download_bar = download_bar.clone();
            let spinner = Arc::clone(&spinner);
            Box::new(move |stage: Stage| {
                if stage == Stage::Fetch {
                    return;
                }
                download_bar.finish_and_clear();
                if let Ok(mut current) = spinner.lock() {
                    if let Some(previous) = current.take() {
                        previous.finish_and_clear();
                    }
                    *current = Some(create_spinner(&format!("Running {stage}...")));
                }
            })
        }),
    };

    let result = run_pipeline(settings, target, &options, hooks).await;

    download_bar.finish_and_clear();
    if let Some(current) = spinner.lock().ok().and_then(|mut s| s.take()) {
        current.finish_and_clear();
    }

    let report = result.with_context(|| format!("tzdb {} failed", settings.version))?;

    if output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

/// Print one line per stage that ran
fn print_summary(report: &PipelineReport) {
    if let Some(fetch) = &report.fetch {
        let how = if fetch.cached {
            "Using cached"
        } else {
            "Downloaded"
        };
        status_line(
            status::SUCCESS,
            &format!(
                "{how} tzdata{} ({} bytes, sha256 {})",
                report.version, fetch.size, fetch.sha256
            ),
        );
    }

    if let Some(unpack) = &report.unpack {
        status_line(
            status::SUCCESS,
            &format!(
                "Unpacked {} entries into {}",
                unpack.entries,
                unpack.dir.display()
            ),
        );
    }

    if let Some(compile) = &report.compile {
        status_line(
            status::SUCCESS,
            &format!(
                "Compiled {} file(s) into {}",
                compile.files.len(),
                compile.output_dir.display()
            ),
        );
    }

    if let Some(publish) = &report.publish {
        status_line(
            status::SUCCESS,
            &format!(
                "Published {} to {}",
                publish.dat_file.display(),
                publish.destination.display()
            ),
        );
    }
}
