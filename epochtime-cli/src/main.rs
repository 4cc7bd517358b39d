//! epochtime CLI - convert human timestamps to epoch seconds
//!
//! This is a thin wrapper around epochtime-core that runs the converter
//! against a stdout/stderr script host, once per invocation or interactively.

mod repl;
mod stdio_host;

use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use epochtime_core::{TimestampConverter, TimezonePolicy};
use log::{LevelFilter, info};

use crate::stdio_host::StdioHost;

const DEFAULT_PARAM: &str = "epoch";

#[derive(Parser, Debug)]
#[command(name = "epochtime", version, about, long_about = None)]
struct Cli {
    /// Verbose mode [default: "warn", -v "info", -vv "debug", -vvv "trace"]
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Zone used to interpret timestamps: local, utc, or an offset like +02:00
    #[arg(long, env = "EPOCHTIME_TZ", default_value_t = TimezonePolicy::Local, global = true)]
    tz: TimezonePolicy,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert one timestamp and print the saved parameter
    Convert {
        /// Timestamp in the form "YYYY-MM-DD HH:MM:SS"
        human_time: String,
        /// Parameter name to save the epoch value under
        #[arg(short, long, default_value = DEFAULT_PARAM)]
        param: String,
    },
    /// Read timestamps interactively (default)
    Repl {
        /// Parameter name for lines without `name =`
        #[arg(short, long, default_value = DEFAULT_PARAM)]
        param: String,
    },
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the -v level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let converter = TimestampConverter::new(cli.tz)?;
    info!("interpreting timestamps as {}", converter.zone().describe());

    let command = cli.command.unwrap_or(Commands::Repl {
        param: DEFAULT_PARAM.to_string(),
    });

    match command {
        Commands::Convert { human_time, param } => {
            let mut host = StdioHost::new();
            converter.convert(&mut host, &human_time, &param);
            if host.has_errors() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::Repl { param } => {
            repl::run_repl(&converter, &param)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert_with_zone() {
        let cli = Cli::try_parse_from([
            "epochtime",
            "--tz",
            "+02:00",
            "convert",
            "2017-07-17 10:00:00",
            "-p",
            "epochVar",
        ])
        .unwrap();

        assert_eq!(cli.tz, TimezonePolicy::Fixed(120));
        match cli.command {
            Some(Commands::Convert { human_time, param }) => {
                assert_eq!(human_time, "2017-07-17 10:00:00");
                assert_eq!(param, "epochVar");
            }
            other => panic!("Expected convert command, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_zone() {
        assert!(Cli::try_parse_from(["epochtime", "--tz", "mars", "repl"]).is_err());
    }
}
