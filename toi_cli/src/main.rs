//! # toi
//!
//! Command line front end: formula parsing and evaluation, scheme
//! definitions, truth tables and input word simulation.

mod cli;
mod commands;
mod error;

use clap::Parser;
use cli::Cli;
use error::CliError;
use std::process::ExitCode;
use std::sync::Arc;
use toi_compiler::config::build_info;
use toi_compiler::config::runtime::{init_runtime_config, LogLevel, RuntimeConfig};
use toi_compiler::logging::{self, FacadeLogger, LoggingService};
use toi_compiler::log_info;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = init(&cli) {
        eprintln!("error: {}", error);
        return ExitCode::FAILURE;
    }
    log_info!("toi starting", "config" => build_info::source_info());

    let stdout = std::io::stdout();
    match commands::run(&cli.command, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error[{}]: {}", error.error_code(), error);
            ExitCode::FAILURE
        }
    }
}

/// Install runtime preferences and the global logger
///
/// Command line flags override the configuration file, which overrides the
/// `TOI_*` environment defaults. Human readable diagnostics are rendered by
/// env_logger through the `log` facade; JSON diagnostics use the structured
/// logger.
fn init(cli: &Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => RuntimeConfig::load(path)?,
        None => RuntimeConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.min_log_level = level;
    }
    if cli.json_logs {
        config.logging.use_structured_logging = true;
    }

    let preferences = config.logging.clone();
    init_runtime_config(config)?;

    if preferences.use_structured_logging || !preferences.enable_console_logging {
        return logging::init_global_logging().map_err(CliError::Logging);
    }

    env_logger::Builder::new()
        .filter_level(level_filter(preferences.min_log_level))
        .format_timestamp(None)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    let service = LoggingService::new(
        Arc::new(FacadeLogger),
        preferences.min_log_level.to_events_log_level(),
    );
    logging::init_global_logging_with_service(Arc::new(service)).map_err(CliError::Logging)
}

fn level_filter(level: LogLevel) -> log::LevelFilter {
    match level {
        LogLevel::Error => log::LevelFilter::Error,
        LogLevel::Warning => log::LevelFilter::Warn,
        LogLevel::Info => log::LevelFilter::Info,
        LogLevel::Debug => log::LevelFilter::Debug,
    }
}
