//! loglib CLI
//!
//! Command-line front end for the logging facade

use clap::{Args, Parser, Subcommand};
use loglib::{LogConfig, Severity};
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "loglib")]
#[command(about = "loglib - file and console logging facade", long_about = None)]
struct Cli {
    #[command(flatten)]
    sinks: SinkArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Sink and threshold overrides applied on top of the environment
#[derive(Debug, Args)]
struct SinkArgs {
    /// Output pattern (default: `[%^%L%$][%H:%M:%S.%e] [Thread: %t] %v`)
    #[arg(long, global = true)]
    pattern: Option<String>,

    /// Log file path (default: logfile.log)
    #[arg(long, global = true, conflicts_with = "no_file")]
    file: Option<PathBuf>,

    /// Disable the file sink
    #[arg(long, global = true)]
    no_file: bool,

    /// Disable the console sink
    #[arg(long, global = true)]
    no_console: bool,

    /// Disable console colors
    #[arg(long, global = true)]
    no_color: bool,

    /// Minimum severity to emit (TRACE, DEBUG, INFO, WARN, ERROR, CRITICAL, OFF)
    #[arg(long, global = true, value_parser = commands::parse_severity)]
    threshold: Option<Severity>,
}

impl SinkArgs {
    fn apply(self, mut config: LogConfig) -> LogConfig {
        if let Some(pattern) = self.pattern {
            config = config.with_pattern(pattern);
        }
        if let Some(file) = self.file {
            config = config.with_file(Some(file));
        }
        if self.no_file {
            config = config.with_file(None);
        }
        if let Some(threshold) = self.threshold {
            config = config.with_level(threshold);
        }
        config
            .with_console(!self.no_console)
            .with_color(!self.no_color)
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Emit one record
    Emit(commands::emit::EmitArgs),
    /// Exercise tracing, streams and concurrent writers
    Demo(commands::demo::DemoArgs),
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = cli.sinks.apply(LogConfig::from_env());
    let result: Result<(), Box<dyn std::error::Error>> = loglib::initialize_with(config)
        .map_err(Into::into)
        .and_then(|facade| {
            let result = match cli.command {
                Commands::Emit(args) => commands::emit::execute(facade, args),
                Commands::Demo(args) => commands::demo::execute(facade, args),
            };
            facade.flush()?;
            result
        });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
