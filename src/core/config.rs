//! Layered configuration
//!
//! Settings are merged from, lowest precedence first:
//!
//! 1. built-in defaults ([`crate::config::defaults`])
//! 2. the global `config.toml` in the user config directory
//! 3. the project's `tzdb.toml`
//! 4. the `--tzdb-version` flag / `TZDB_VERSION` environment variable
//!
//! Missing config files mean defaults. Invalid TOML is an error.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::config::urls;
use crate::core::layout::{resolve_against, BuildLayout};
use crate::core::version::TzdbVersion;
use crate::error::ConfigError;
use crate::infra::dirs::TzdbDirs;

/// Contents of a `tzdb.toml` or global `config.toml`
///
/// Every field is optional so files can be layered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Release to build
    pub version: Option<TzdbVersion>,

    /// Build directory
    pub build_dir: Option<PathBuf>,

    /// Directory receiving the published `tzdb.dat`
    pub resources_dir: Option<PathBuf>,

    /// Download settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// Compiler settings
    #[serde(default)]
    pub compiler: CompilerConfig,
}

/// `[download]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// URL template with a `{version}` placeholder
    pub url_template: Option<String>,

    /// Expected SHA-256 of the release archive
    pub sha256: Option<String>,

    /// Extra attempts after the first
    pub retries: Option<u32>,

    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// `[compiler]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Custom compiler executable; replaces the Java invocation entirely
    pub program: Option<String>,

    /// Arguments placed before the compiler arguments of a custom program
    pub args: Option<Vec<String>>,

    /// Java launcher
    pub java: Option<String>,

    /// Classpath containing the compiler; fetched from Maven Central if unset
    pub classpath: Option<PathBuf>,

    /// Compiler entry point
    pub main_class: Option<String>,

    /// ThreeTen-Backport release to fetch when no classpath is given
    pub threetenbp_version: Option<String>,

    /// Maven repository the ThreeTen-Backport jar is fetched from
    pub repository: Option<String>,
}

macro_rules! overlay {
    ($base:expr, $over:expr, $($field:ident),+ $(,)?) => {
        $( if $over.$field.is_some() { $base.$field = $over.$field; } )+
    };
}

impl ConfigFile {
    /// Load a config file, returning defaults if it does not exist
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load the global and project files and merge them
    ///
    /// `config_path` replaces `<project_dir>/tzdb.toml` and must exist.
    pub fn load_layers(
        project_dir: &Path,
        config_path: Option<&Path>,
        dirs: &TzdbDirs,
    ) -> Result<Self, ConfigError> {
        let global = Self::load_from_path(&dirs.global_config_path())?;

        let project_path = config_path.map_or_else(
            || project_dir.join(defaults::PROJECT_CONFIG_FILE),
            Path::to_path_buf,
        );
        if config_path.is_some() && !project_path.exists() {
            return Err(ConfigError::ReadError {
                path: project_path,
                error: "file does not exist".to_string(),
            });
        }
        let project = Self::load_from_path(&project_path)?;

        tracing::debug!(
            global = %dirs.global_config_path().display(),
            project = %project_path.display(),
            "Loaded configuration layers"
        );

        Ok(global.merge(project))
    }

    /// Build directory resolved against `project_dir`
    pub fn build_dir_in(&self, project_dir: &Path) -> PathBuf {
        resolve_against(
            project_dir,
            self.build_dir
                .as_deref()
                .unwrap_or(Path::new(defaults::DEFAULT_BUILD_DIR)),
        )
    }

    /// Overlay `over` on top of `self`; fields set in `over` win
    #[must_use]
    pub fn merge(mut self, over: Self) -> Self {
        overlay!(self, over, version, build_dir, resources_dir);
        overlay!(
            self.download,
            over.download,
            url_template,
            sha256,
            retries,
            timeout_secs
        );
        overlay!(
            self.compiler,
            over.compiler,
            program,
            args,
            java,
            classpath,
            main_class,
            threetenbp_version,
            repository
        );
        self
    }
}

/// Fully resolved download settings
#[derive(Debug, Clone)]
pub struct DownloadSettings {
    /// Concrete release URL
    pub url: String,
    /// Expected archive checksum, lowercase hex
    pub sha256: Option<String>,
    /// Extra attempts after the first
    pub retries: u32,
    /// Request timeout
    pub timeout: Duration,
}

/// How the zone-rules compiler is launched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompilerCommand {
    /// A custom executable with leading arguments
    Custom { program: String, args: Vec<String> },

    /// `java -cp <classpath> <main_class>`
    Java {
        java: String,
        classpath: Option<PathBuf>,
        main_class: String,
        threetenbp_version: String,
        repository: String,
    },
}

/// Effective settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    /// Project directory relative paths resolve against
    pub project_dir: PathBuf,
    /// Release to build
    pub version: TzdbVersion,
    /// Build directory
    pub build_dir: PathBuf,
    /// Published resources directory
    pub resources_dir: PathBuf,
    /// Download settings
    pub download: DownloadSettings,
    /// Compiler settings
    pub compiler: CompilerCommand,
}

impl Settings {
    /// Resolve a merged config into concrete settings
    pub fn resolve(
        project_dir: &Path,
        config: ConfigFile,
        version_override: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let build_dir = config.build_dir_in(project_dir);
        let version = match version_override {
            Some(v) => TzdbVersion::parse(v)?,
            None => config.version.ok_or(ConfigError::MissingVersion)?,
        };
        if !version.is_conventional() {
            tracing::warn!(
                "Version '{version}' does not follow the upstream YYYYx release naming"
            );
        }

        let resources_dir = resolve_against(
            project_dir,
            config
                .resources_dir
                .as_deref()
                .unwrap_or(Path::new(defaults::DEFAULT_RESOURCES_DIR)),
        );

        let template = config
            .download
            .url_template
            .as_deref()
            .unwrap_or(urls::TZDATA_RELEASE_TEMPLATE);
        let download = DownloadSettings {
            url: version.url_from_template(template)?,
            sha256: config.download.sha256.map(|s| s.trim().to_lowercase()),
            retries: config
                .download
                .retries
                .unwrap_or(defaults::DEFAULT_DOWNLOAD_RETRIES),
            timeout: Duration::from_secs(
                config
                    .download
                    .timeout_secs
                    .unwrap_or(defaults::DEFAULT_DOWNLOAD_TIMEOUT_SECS),
            ),
        };

        let compiler = match config.compiler.program {
            Some(program) => CompilerCommand::Custom {
                program: resolve_program(project_dir, program),
                args: config.compiler.args.unwrap_or_default(),
            },
            None => CompilerCommand::Java {
                java: config
                    .compiler
                    .java
                    .unwrap_or_else(|| defaults::DEFAULT_JAVA.to_string()),
                classpath: config
                    .compiler
                    .classpath
                    .map(|cp| resolve_against(project_dir, &cp)),
                main_class: config
                    .compiler
                    .main_class
                    .unwrap_or_else(|| defaults::DEFAULT_COMPILER_MAIN_CLASS.to_string()),
                threetenbp_version: config
                    .compiler
                    .threetenbp_version
                    .unwrap_or_else(|| defaults::DEFAULT_THREETENBP_VERSION.to_string()),
                repository: config
                    .compiler
                    .repository
                    .unwrap_or_else(|| urls::MAVEN_CENTRAL.to_string()),
            },
        };

        Ok(Self {
            project_dir: project_dir.to_path_buf(),
            version,
            build_dir,
            resources_dir,
            download,
            compiler,
        })
    }

    /// Build layout for the configured version
    pub fn layout(&self) -> BuildLayout {
        BuildLayout::new(&self.build_dir, self.version.clone())
    }
}

/// Path-like programs resolve against the project; bare names are looked up on `PATH`
fn resolve_program(project_dir: &Path, program: String) -> String {
    if program.contains('/') || program.contains(std::path::MAIN_SEPARATOR) {
        resolve_against(project_dir, Path::new(&program))
            .display()
            .to_string()
    } else {
        program
    }
}
