//! Loan approval CLI.

use clap::{ColorChoice, Parser};
use loan_cli::logging::{LogConfig, LogFormat, init_logging};
use loan_cli::pipeline::ArtifactPaths;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_doctor, run_encode, run_fields, run_predict, run_schema};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let paths = ArtifactPaths::resolve(
        cli.artifacts.artifacts_dir.as_deref(),
        cli.artifacts.schema.as_deref(),
        cli.artifacts.model.as_deref(),
    );
    let result = match &cli.command {
        Command::Predict(args) => run_predict(&paths, args).map(|()| 0),
        Command::Encode(args) => run_encode(&paths, args).map(|()| 0),
        Command::Schema => run_schema(&paths).map(|()| 0),
        Command::Fields => run_fields().map(|()| 0),
        Command::Doctor => run_doctor(&paths).map(|healthy| if healthy { 0 } else { 1 }),
    };
    let exit_code = match result {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level(level_filter)
        .with_format(format)
        .with_log_file(cli.log_file.clone())
        .with_log_data(cli.log_data)
        .with_timestamps(cli.log_timestamps);
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
