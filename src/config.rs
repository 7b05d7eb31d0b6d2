//! Program constants and runtime configuration.
//!
//! Logging is configured from a log4rs YAML file when one is available,
//! otherwise a built-in stderr appender is used. Settings come from the
//! environment, optionally seeded from a `.env` file.

use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub const PROGRAM_NAME: &str = "terminus";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// IP version reported for every record.
pub const IP_VERSION: u8 = 4;

/// Rendered in place of a missing template key or an unset field.
pub const NO_VALUE: &str = "<no value>";

/// Env var holding the path of a log4rs YAML config.
pub const LOG_CONFIG_ENV: &str = "TERMINUS_LOG_CONFIG";
/// Env var overriding the level of the built-in logger.
pub const LOG_LEVEL_ENV: &str = "TERMINUS_LOG_LEVEL";
/// Config file looked up in the working directory.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Warn;
const STDERR_PATTERN: &str = "{h({l})} {M} - {m}{n}";

/// Load `.env` and initialise log4rs.
///
/// Never fails: a broken config file falls back to the built-in stderr
/// logger, and a failure of that is reported on stderr and ignored.
pub fn init_logging() {
    dotenv::dotenv().ok();

    if let Some(path) = log_config_path() {
        match log4rs::init_file(&path, Default::default()) {
            Ok(()) => {
                log::debug!("logging configured from {}", path.display());
                return;
            }
            Err(e) => eprintln!(
                "{PROGRAM_NAME}: ignoring log config {}: {e}",
                path.display()
            ),
        }
    }

    if let Err(e) = init_stderr_logging(log_level(env::var(LOG_LEVEL_ENV).ok().as_deref())) {
        eprintln!("{PROGRAM_NAME}: unable to initialise logging: {e}");
    }
}

fn log_config_path() -> Option<PathBuf> {
    match env::var(LOG_CONFIG_ENV) {
        Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => {
            let path = Path::new(DEFAULT_LOG_CONFIG);
            path.exists().then(|| path.to_path_buf())
        }
    }
}

/// Parse a level name, falling back to `warn`.
pub fn log_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|v| LevelFilter::from_str(v.trim()).ok())
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

fn init_stderr_logging(level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(STDERR_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    log4rs::init_config(config)?;
    Ok(())
}
