use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::{error, info};
use statline::config::{self, discovery, AppConfig};
use statline::core::{host_detect, resolve_output_format, ShutdownSignal, UpdateManager};
use std::path::PathBuf;

/// statline - Generates a status line for dzen2, xmobar or any plain-text bar
#[derive(Parser, Debug, Clone)]
#[command(name = "statline")]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Configuration file to use instead of the default search path
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<String>,

    /// Print version information and exit
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Level 0 (default): warn only, stdout belongs to the bar
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting statline v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => discovery::expand_tilde(path, discovery::home_dir().as_deref())
            .with_context(|| format!("cannot resolve {} without a home directory", path)),
        None => Ok(config::default_config_path()?),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let path = config_path(cli)?;
    let config = AppConfig::load(&path)?;

    let registry = statline_sources::registry();
    let format = resolve_output_format(config.general().output_format, host_detect::detect);
    let shutdown = ShutdownSignal::from_termination_signals()?;

    let stdout = std::io::stdout().lock();
    let mut manager = UpdateManager::new(&config, &registry, format, stdout)?;
    manager.run(&shutdown)?;

    info!("statline stopped");
    Ok(())
}
