//! xtap: print every keyboard and mouse event of an X display.
//!
//! # Usage
//!
//! ```text
//! xtap [OPTIONS]
//!
//! Options:
//!   --display <NAME>     X display to record [default: $DISPLAY]
//!   --config <PATH>      Config file [default: $XDG_CONFIG_HOME/xtap/config.toml]
//!   --format <FORMAT>    text | json
//!   --no-keyboard        Do not print key events
//!   --no-mouse           Do not print button or motion events
//!   --no-motion          Do not print pointer motion
//!   --log-level <LEVEL>  Diagnostics level (overridden by RUST_LOG)
//!   --write-config       Save the effective settings to the config file and exit
//! ```
//!
//! Events go to stdout, one per line; diagnostics go to stderr.  Ctrl-C
//! stops recording cleanly.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ Logger::connect()           -- observer + recorder connections
//!  └─ spawn_blocking(run)         -- recording thread, calls observers
//!  └─ ctrl_c ─▶ StopHandle::stop  -- disables the context, run() returns
//! ```

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use xtap::application::output::{is_captured, render};
use xtap::infrastructure::storage::config::{
    config_file_path, load_config, load_config_from, save_config, save_config_to, AppConfig,
    ConfigError, OutputFormat,
};
use xtap::{InputEvent, Logger};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Global keyboard and mouse event logger for X11.
///
/// Values given here override the configuration file.
#[derive(Debug, Parser)]
#[command(name = "xtap", version)]
struct Cli {
    /// X display to record, e.g. `:0`.
    #[arg(long, env = "XTAP_DISPLAY")]
    display: Option<String>,

    /// Path of the TOML configuration file.
    #[arg(long, env = "XTAP_CONFIG")]
    config: Option<PathBuf>,

    /// Output line format.
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Do not print key events.
    #[arg(long)]
    no_keyboard: bool,

    /// Do not print mouse button or motion events.
    #[arg(long)]
    no_mouse: bool,

    /// Do not print pointer motion.
    #[arg(long)]
    no_motion: bool,

    /// `tracing` level for diagnostics on stderr.
    #[arg(long)]
    log_level: Option<String>,

    /// Save the effective settings to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Loads the config file and applies the command-line overrides.
    fn into_config(self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_from(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => load_config().context("loading config")?,
        };

        if self.display.is_some() {
            config.logger.display = self.display;
        }
        if let Some(level) = self.log_level {
            config.logger.log_level = level;
        }
        if let Some(format) = self.format {
            config.output.format = format.into();
        }
        config.capture.keyboard &= !self.no_keyboard;
        config.capture.mouse &= !self.no_mouse;
        config.capture.motion &= !self.no_motion;
        Ok(config)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let write_config = cli.write_config;
    let config_path = cli.config.clone();
    let config = cli.into_config()?;

    // stdout carries events only.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logger.log_level)),
        )
        .with_writer(io::stderr)
        .init();

    if write_config {
        let path = write_config_file(&config, config_path.as_deref())
            .context("writing config")?;
        info!(path = %path.display(), "config written");
        return Ok(());
    }

    let mut logger = Logger::connect(config.logger.display.as_deref())?;

    let format = config.output.format;
    let capture = config.capture;
    if capture.keyboard {
        logger.on_keyboard(move |key| print_event(&InputEvent::Key(key), format));
    }
    if capture.mouse {
        logger.on_mouse(move |mouse| {
            let event = InputEvent::Mouse(mouse);
            if is_captured(&event, &capture) {
                print_event(&event, format);
            }
        });
    }

    let stop = logger.stop_handle();
    let mut recording = tokio::task::spawn_blocking(move || logger.run());
    info!("recording; press Ctrl-C to stop");

    // ── Ctrl-C handler ────────────────────────────────────────────────────────
    tokio::select! {
        finished = &mut recording => {
            finished??;
            info!("recording ended");
            return Ok(());
        }
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!("failed to listen for Ctrl+C signal: {e}");
            }
            info!("shutdown signal received");
            stop.stop();
        }
    }

    recording.await??;
    info!("recording stopped");
    Ok(())
}

/// Saves `config` to `path`, or to the default location when `None`.
fn write_config_file(config: &AppConfig, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match path {
        Some(path) => {
            save_config_to(config, path)?;
            Ok(path.to_path_buf())
        }
        None => {
            save_config(config)?;
            config_file_path()
        }
    }
}

fn print_event(event: &InputEvent, format: OutputFormat) {
    match render(event, format) {
        Ok(line) => {
            let mut stdout = io::stdout().lock();
            if let Err(e) = writeln!(stdout, "{line}") {
                error!("failed to write event: {e}");
            }
        }
        Err(e) => error!("failed to render event: {e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_config() -> String {
        "/nonexistent/xtap/config.toml".to_string()
    }

    #[test]
    fn test_no_flags_keep_defaults() {
        // Arrange
        let cli = Cli::parse_from(["xtap", "--config", &missing_config()]);

        // Act
        let config = cli.into_config().expect("defaults");

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_flags_override_config() {
        // Arrange
        let cli = Cli::parse_from([
            "xtap",
            "--config",
            &missing_config(),
            "--display",
            ":3",
            "--format",
            "json",
            "--no-motion",
            "--log-level",
            "debug",
        ]);

        // Act
        let config = cli.into_config().expect("overrides");

        // Assert
        assert_eq!(config.logger.display.as_deref(), Some(":3"));
        assert_eq!(config.logger.log_level, "debug");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.capture.motion);
        assert!(config.capture.mouse);
    }

    #[test]
    fn test_write_config_saves_overridden_settings() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("xtap_test_write_{}", std::process::id()));
        let path = dir.join("config.toml");
        let path_arg = path.to_string_lossy().into_owned();
        let cli = Cli::parse_from(["xtap", "--config", &path_arg, "--no-mouse", "--write-config"]);
        assert!(cli.write_config);
        let config = cli.into_config().expect("config");

        // Act
        let written = write_config_file(&config, Some(&path)).expect("write");

        // Assert
        assert_eq!(written, path);
        let loaded = load_config_from(&path).expect("reload");
        assert!(!loaded.capture.mouse);
        assert_eq!(loaded, config);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result = Cli::try_parse_from(["xtap", "--format", "yaml"]);
        assert!(result.is_err());
    }
}
