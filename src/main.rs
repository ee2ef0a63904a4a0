//! tasklog entry point.
//!
//! ## CLI Subcommands
//!
//! - `tasklog run <description> [--field k=v]... -- <command> [args...]`
//! - `tasklog config show` / `tasklog config defaults`
//! - `tasklog version`, `tasklog help`

use std::process::ExitCode;

use tasklog::cli::{config_cmd, parse_run_args, run_task};
use tasklog::config as tasklog_config;
use tasklog::telemetry::{init_logging, LogError};
use tasklog::{JsonLogger, TaskLogger};

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match command {
        "run" => ExitCode::from(clamp_code(run(&args[2..]))),
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            match subcommand {
                "show" => {
                    config_cmd::run_show();
                    ExitCode::SUCCESS
                }
                "defaults" => {
                    config_cmd::run_defaults();
                    ExitCode::SUCCESS
                }
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_usage();
                    ExitCode::FAILURE
                }
            }
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("tasklog {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> i32 {
    let run_args = match parse_run_args(args) {
        Ok(run_args) => run_args,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            return e.exit_code();
        }
    };

    let config = tasklog_config::load();
    match init_logging(&config.diagnostics) {
        Ok(()) | Err(LogError::AlreadyInitialized) => {}
        Err(e) => eprintln!("Diagnostics disabled: {}", e),
    }

    let logger = match JsonLogger::from_config(&config.logger) {
        Ok(logger) => TaskLogger::new(logger),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    run_task(&logger, &run_args)
}

fn clamp_code(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "tasklog v{}

USAGE:
    tasklog [COMMAND] [OPTIONS]

COMMANDS:
    run          Run a command as a timed task
    config       Show configuration (show, defaults)
    version      Show version information
    help         Show this help message

RUN:
    tasklog run <DESCRIPTION> [--field KEY=VALUE]... -- <COMMAND> [ARGS]...

EXAMPLES:
    tasklog run \"Nightly backup\" -- rsync -a src/ dst/
    tasklog run \"Import\" --field batch=42 -- ./import.sh
    tasklog config show

ENVIRONMENT:
    TASKLOG_NAME                Logger name (default: tasklog)
    TASKLOG_LEVEL               Minimum record level (default: info)
    TASKLOG_OUTPUT              stdout, stderr or a file path (default: stdout)
    TASKLOG_DIAGNOSTICS         Diagnostics filter (default: warn)
    TASKLOG_DIAGNOSTICS_FORMAT  json or pretty (default: json)

EXIT CODES:
    0    Task completed
    N    Task failed with the child's exit code N
    2    Usage or configuration error
    127  Command could not be started
",
        version
    );
}
