//! Logging System
//!
//! Structured logging via `tracing`, with configurable level, format, and
//! destination. Environment variables override the configuration file:
//! `REEL_LOG`, `REEL_LOG_FORMAT`, `REEL_LOG_OUTPUT`, `REEL_LOG_FILE`, and
//! `REEL_LOG_MODULES`.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::error::ViewerError;

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Whether logging is enabled (default: true)
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text (default: text)
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr, file (default: file; the CLI
    /// owns stdout for command output)
    #[serde(default = "default_output")]
    pub output: String,

    /// Log file path when output is file; None means the platform default
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Enable colored output (text format, terminal destinations only)
    #[serde(default = "default_true")]
    pub color: bool,

    /// Module-specific log levels
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    "file".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            file: None,
            color: default_true(),
            modules: HashMap::new(),
        }
    }
}

/// Resolve the log file path with precedence: CLI, `REEL_LOG_FILE` env,
/// config file, platform default under the state directory.
pub fn resolve_log_file_path(
    cli_file: Option<PathBuf>,
    config_file: Option<PathBuf>,
) -> Result<PathBuf, ViewerError> {
    if let Some(path) = cli_file {
        if !path.as_os_str().is_empty() {
            return Ok(path);
        }
    }
    if let Ok(env_path) = std::env::var("REEL_LOG_FILE") {
        if !env_path.is_empty() {
            return Ok(PathBuf::from(env_path));
        }
    }
    if let Some(path) = config_file {
        if !path.as_os_str().is_empty() {
            return Ok(path);
        }
    }
    default_log_file_path()
}

fn default_log_file_path() -> Result<PathBuf, ViewerError> {
    let project_dirs = directories::ProjectDirs::from("", "reel", "reel").ok_or_else(|| {
        ViewerError::ConfigError(
            "Could not determine platform state directory for log file".to_string(),
        )
    })?;
    let state_dir = project_dirs
        .state_dir()
        .map(|dir| dir.to_path_buf())
        .unwrap_or_else(|| project_dirs.data_local_dir().to_path_buf());
    Ok(state_dir.join("reel.log"))
}

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogDestination {
    Stdout,
    Stderr,
    File,
}

fn parse_destination(output: &str) -> Result<LogDestination, ViewerError> {
    match output {
        "stdout" => Ok(LogDestination::Stdout),
        "stderr" => Ok(LogDestination::Stderr),
        "file" => Ok(LogDestination::File),
        _ => Err(ViewerError::ConfigError(format!(
            "Invalid log output: {} (must be 'stdout', 'stderr', or 'file')",
            output
        ))),
    }
}

/// Initialize the logging system.
///
/// Priority order (highest to lowest): environment variables, configuration
/// file, defaults.
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), ViewerError> {
    let disabled = config.map(|c| !c.enabled).unwrap_or(false);
    if disabled {
        Registry::default()
            .with(EnvFilter::new("off"))
            .with(fmt::layer().with_writer(std::io::sink))
            .init();
        return Ok(());
    }

    let filter = build_env_filter(config)?;
    let format = determine_format(config)?;
    let destination = determine_destination(config)?;
    let use_color = config.map(|c| c.color).unwrap_or(true);
    let base = Registry::default().with(filter);

    match (format.as_str(), destination) {
        ("json", LogDestination::Stdout) => {
            base.with(json_layer().with_writer(std::io::stdout)).init()
        }
        ("json", LogDestination::Stderr) => {
            base.with(json_layer().with_writer(std::io::stderr)).init()
        }
        ("json", LogDestination::File) => {
            let file = open_log_file(config)?;
            base.with(json_layer().with_writer(file)).init()
        }
        (_, LogDestination::Stdout) => base
            .with(text_layer(use_color).with_writer(std::io::stdout))
            .init(),
        (_, LogDestination::Stderr) => base
            .with(text_layer(use_color).with_writer(std::io::stderr))
            .init(),
        (_, LogDestination::File) => {
            let file = open_log_file(config)?;
            base.with(text_layer(false).with_writer(file)).init()
        }
    }

    Ok(())
}

fn json_layer<S>(
) -> fmt::Layer<S, fmt::format::JsonFields, fmt::format::Format<fmt::format::Json, ChronoUtc>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .json()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
}

fn text_layer<S>(
    use_color: bool,
) -> fmt::Layer<S, fmt::format::DefaultFields, fmt::format::Format<fmt::format::Full, ChronoUtc>>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fmt::layer()
        .with_target(true)
        .with_timer(ChronoUtc::rfc_3339())
        .with_ansi(use_color)
}

fn open_log_file(config: Option<&LoggingConfig>) -> Result<std::fs::File, ViewerError> {
    let path = resolve_log_file_path(None, config.and_then(|c| c.file.clone()))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ViewerError::ConfigError(format!("Failed to create log directory: {}", e))
        })?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| ViewerError::ConfigError(format!("Failed to open log file {:?}: {}", path, e)))
}

/// Build environment filter from config or environment variables
fn build_env_filter(config: Option<&LoggingConfig>) -> Result<EnvFilter, ViewerError> {
    if let Ok(filter) = EnvFilter::try_from_env("REEL_LOG") {
        return Ok(filter);
    }

    let level = config.map(|c| c.level.as_str()).unwrap_or("info");
    if level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    let mut filter = EnvFilter::new(level);

    if let Some(config) = config {
        for (module, module_level) in &config.modules {
            let directive = format!("{}={}", module, module_level);
            filter = filter.add_directive(
                directive
                    .parse()
                    .map_err(|e| ViewerError::ConfigError(format!("Invalid log directive: {}", e)))?,
            );
        }
    }

    if let Ok(modules_str) = std::env::var("REEL_LOG_MODULES") {
        for module_spec in modules_str.split(',') {
            let parts: Vec<&str> = module_spec.split('=').collect();
            if parts.len() == 2 {
                let directive = format!("{}={}", parts[0].trim(), parts[1].trim());
                filter = filter.add_directive(directive.parse().map_err(|e| {
                    ViewerError::ConfigError(format!("Invalid log directive from env: {}", e))
                })?);
            }
        }
    }

    Ok(filter)
}

fn determine_format(config: Option<&LoggingConfig>) -> Result<String, ViewerError> {
    if let Ok(format) = std::env::var("REEL_LOG_FORMAT") {
        if format == "json" || format == "text" {
            return Ok(format);
        }
    }

    let format = config.map(|c| c.format.as_str()).unwrap_or("text");
    if format != "json" && format != "text" {
        return Err(ViewerError::ConfigError(format!(
            "Invalid log format: {} (must be 'json' or 'text')",
            format
        )));
    }
    Ok(format.to_string())
}

fn determine_destination(config: Option<&LoggingConfig>) -> Result<LogDestination, ViewerError> {
    if let Ok(output) = std::env::var("REEL_LOG_OUTPUT") {
        return parse_destination(&output);
    }
    parse_destination(config.map(|c| c.output.as_str()).unwrap_or("file"))
}
