//! Default configuration values

/// Project config file name
pub const PROJECT_CONFIG_FILE: &str = "tzdb.toml";

/// Global config file name, under the platform config directory
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Default build directory, relative to the project directory
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Default published resources directory, relative to the project directory
pub const DEFAULT_RESOURCES_DIR: &str = "src/main/resources/j$/time/zone";

/// Extra download attempts after the first one
pub const DEFAULT_DOWNLOAD_RETRIES: u32 = 0;

/// Base delay for exponential backoff between download attempts (milliseconds)
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Upper bound on the backoff delay (milliseconds)
pub const MAX_RETRY_DELAY_MS: u64 = 30_000;

/// HTTP request timeout (seconds)
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 300;

/// HTTP connect timeout (seconds)
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Java launcher used for the default compiler
pub const DEFAULT_JAVA: &str = "java";

/// Entry point of the ThreeTen-Backport zone-rules compiler
pub const DEFAULT_COMPILER_MAIN_CLASS: &str = "org.threeten.bp.zone.TzdbZoneRulesCompiler";

/// ThreeTen-Backport release providing the compiler
pub const DEFAULT_THREETENBP_VERSION: &str = "1.4.4";

/// File name the compiler writes
pub const COMPILER_OUTPUT_FILE: &str = "TZDB.dat";

/// Canonical published file name
pub const PUBLISHED_FILE: &str = "tzdb.dat";
