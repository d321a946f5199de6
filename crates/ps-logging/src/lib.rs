// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Centralized logging utilities for pageselect
//!
//! This crate provides standardized logging initialization so all
//! pageselect binaries behave the same: TUI binaries log to a file
//! (the terminal is owned by the UI), other binaries log to the console
//! unless a file is requested.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// Re-export clap for convenience when using CliLoggingArgs
pub use clap;

// Re-export Level for convenience
pub use tracing::Level;

/// Output format for log messages
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable plaintext format
    #[default]
    Plaintext,
    /// Structured JSON format
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Plaintext => write!(f, "plaintext"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plaintext" => Ok(LogFormat::Plaintext),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!(
                "Invalid log format: {}. Use 'plaintext' or 'json'",
                s
            )),
        }
    }
}

/// CLI log level enum for clap integration
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CliLogLevel {
    /// Only error conditions
    Error,
    /// Errors and warnings
    Warn,
    /// Errors, warnings, and informational messages
    Info,
    /// All above plus debug information
    Debug,
    /// All above plus detailed tracing
    Trace,
}

impl Default for CliLogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl From<CliLogLevel> for Level {
    fn from(level: CliLogLevel) -> Self {
        match level {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliLogLevel::Error => write!(f, "error"),
            CliLogLevel::Warn => write!(f, "warn"),
            CliLogLevel::Info => write!(f, "info"),
            CliLogLevel::Debug => write!(f, "debug"),
            CliLogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Standardized CLI logging arguments for clap integration
///
/// Use this with `#[command(flatten)]` in your clap structs for a
/// consistent logging CLI across all binaries.
///
/// TUI binaries always log to file. Other binaries log to console by
/// default, but log to file when --log-file is specified.
#[derive(Clone, Debug, Default, clap::Args, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliLoggingArgs {
    /// Log verbosity level
    #[arg(long, value_enum, help = "Log verbosity level (default: info)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<CliLogLevel>,

    /// Log output format
    #[arg(long, value_enum, help = "Log output format (default: plaintext)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_format: Option<LogFormat>,

    /// Log filename
    #[arg(long, help = "Log file path (default: platform specific)")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl CliLoggingArgs {
    /// Initialize logging based on the parsed CLI arguments
    ///
    /// # Arguments
    /// * `component` - The component name (e.g., "pageselect-demo")
    /// * `is_tui` - Whether this is a TUI application (always logs to file)
    pub fn init(self, component: &str, is_tui: bool) -> anyhow::Result<()> {
        self.init_with_default_level(component, is_tui, CliLogLevel::Info)
    }

    pub fn init_with_default_level(
        self,
        component: &str,
        is_tui: bool,
        default_level: CliLogLevel,
    ) -> anyhow::Result<()> {
        let level = self.log_level.unwrap_or(default_level).into();
        let format = self.log_format.unwrap_or(LogFormat::Plaintext);

        if is_tui || self.log_file.is_some() {
            let log_path = self.resolve_log_path(component);
            init_to_file(component, level, format, &log_path)
        } else {
            init(component, level, format)
        }
    }

    /// Resolve the complete log file path based on CLI arguments
    fn resolve_log_path(&self, component: &str) -> PathBuf {
        match &self.log_file {
            Some(log_file) => PathBuf::from(log_file),
            None => get_standard_log_path_for_component(component),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.log_level.is_none() && self.log_format.is_none() && self.log_file.is_none()
    }
}

/// Get the standard log file path for a specific component
pub fn get_standard_log_path_for_component(component: &str) -> PathBuf {
    let base_path = get_standard_log_path();
    let parent = base_path.parent().unwrap_or(std::path::Path::new("/tmp"));
    parent.join(format!("{}.log", component))
}

/// Get the standard log file path for the current OS
///
/// - Windows: %APPDATA%\pageselect\pageselect.log
/// - macOS: ~/Library/Logs/pageselect.log
/// - Linux: ~/.local/share/pageselect/pageselect.log
/// - Other: ~/pageselect.log (fallback)
pub fn get_standard_log_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        let mut path = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("C:\\Users\\Default\\AppData\\Roaming"));
        path.push("pageselect");
        path.push("pageselect.log");
        path
    }

    #[cfg(target_os = "macos")]
    {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        path.push("Library");
        path.push("Logs");
        path.push("pageselect.log");
        path
    }

    #[cfg(target_os = "linux")]
    {
        let mut path = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp")));
        path.push("pageselect");
        path.push("pageselect.log");
        path
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
    {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));
        path.push("pageselect.log");
        path
    }
}

/// Initialize logging with the specified component name, default level, and format
///
/// # Example
/// ```rust
/// use ps_logging::{init, Level, LogFormat};
///
/// fn main() -> anyhow::Result<()> {
///     init("pageselect-demo", Level::INFO, LogFormat::Plaintext)?;
///     tracing::info!("Application started");
///     Ok(())
/// }
/// ```
pub fn init(component: &str, default_level: Level, format: LogFormat) -> anyhow::Result<()> {
    init_with_writer(component, default_level, format, io::stdout)
}

/// Initialize logging to a file
///
/// # Example
/// ```rust,no_run
/// use ps_logging::{init_to_file, Level, LogFormat};
/// use std::path::Path;
///
/// fn main() -> anyhow::Result<()> {
///     let log_path = Path::new("pageselect.log");
///     init_to_file("pageselect-demo", Level::INFO, LogFormat::Json, log_path)?;
///     tracing::info!("Application started");
///     Ok(())
/// }
/// ```
pub fn init_to_file(
    component: &str,
    default_level: Level,
    format: LogFormat,
    log_path: &std::path::Path,
) -> anyhow::Result<()> {
    use std::fs;

    // Create parent directory if it doesn't exist
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let log_file = fs::OpenOptions::new().create(true).append(true).open(log_path)?;

    init_with_writer(component, default_level, format, log_file)
}

/// Initialize logging with a custom writer
pub fn init_with_writer<W>(
    component: &str,
    default_level: Level,
    format: LogFormat,
    writer: W,
) -> anyhow::Result<()>
where
    W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},{}={}", default_level, component, default_level))
    });

    match format {
        LogFormat::Json => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer).json();
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
        LogFormat::Plaintext => {
            let layer = tracing_subscriber::fmt::layer().with_writer(writer);
            #[cfg(debug_assertions)]
            let layer = layer.with_file(true).with_line_number(true);

            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
        }
    }

    Ok(())
}
