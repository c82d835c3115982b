use std::{path::PathBuf, process::ExitCode};

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use yard_server::config::Config;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Initialization error")]
    Initialization,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli().get_matches();

    if args.get_flag("log-stderr") {
        tracing_subscriber::fmt()
            .compact()
            .with_env_filter(get_env_filter())
            .with_writer(std::io::stderr)
            .init();
    } else {
        let logpath = match get_logging_path() {
            Ok(it) => it,
            Err(err) => {
                eprintln!("yard: {}", err);
                return ExitCode::FAILURE;
            }
        };

        let logfile = tracing_appender::rolling::daily(logpath, "log");
        tracing_subscriber::fmt()
            .compact()
            .with_ansi(false)
            .with_env_filter(get_env_filter())
            .with_writer(logfile)
            .init();
    }

    debug!("starting application");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            error!("closing application with error: {:?}", err);
            return ExitCode::FAILURE;
        }
    };

    let cancellation = CancellationToken::new();
    let shutdown = cancellation.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => debug!("received ctrl-c"),
            Err(err) => error!("listening for ctrl-c failed: {:?}", err),
        }
        shutdown.cancel();
    });

    match yard_server::run(config, cancellation).await {
        Ok(()) => {
            debug!("closing application");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("closing application with error: {:?}", err);
            ExitCode::FAILURE
        }
    }
}

fn cli() -> Command {
    Command::new("yard")
        .about("yard - indexes recycle folders and serves them over http")
        .args([
            // NOTE: arguments
            Arg::new("config")
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .default_value("config.json")
                .help("path to the json configuration"),
            // NOTE: options
            Arg::new("port")
                .long("port")
                .action(ArgAction::Set)
                .value_parser(value_parser!(u16))
                .help("overrides the configured server port"),
            Arg::new("log-stderr")
                .long("log-stderr")
                .action(ArgAction::SetTrue)
                .default_value("false")
                .help("write logs to stderr instead of the log file"),
        ])
}

fn load_config(args: &ArgMatches) -> Result<Config, yard_server::error::AppError> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    map_args_to_config(args, &mut config);

    Ok(config)
}

fn map_args_to_config(args: &ArgMatches, config: &mut Config) {
    if let Some(port) = args.get_one::<u16>("port") {
        config.server_port = *port;
    }
}

fn get_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn get_logging_path() -> Result<String, Error> {
    let cache_dir = match dirs::cache_dir() {
        Some(cache_dir) => match cache_dir.to_str() {
            Some(cache_dir_string) => cache_dir_string.to_string(),
            None => return Err(Error::Initialization),
        },
        None => return Err(Error::Initialization),
    };

    Ok(format!("{}{}", cache_dir, "/yard/logs"))
}
