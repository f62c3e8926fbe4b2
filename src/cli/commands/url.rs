//! CLI implementation for `tzdb url`

use anyhow::Result;

use crate::cli::output::OutputConfig;
use crate::core::config::Settings;

/// Print the release download URL
pub fn execute(settings: &Settings) -> Result<()> {
    if OutputConfig::global().json {
        println!(
            "{}",
            serde_json::json!({
                "version": settings.version.as_str(),
                "url": settings.download.url,
            })
        );
    } else {
        println!("{}", settings.download.url);
    }
    Ok(())
}
