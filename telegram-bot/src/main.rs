//! Binary for the example bot: parses the CLI, initializes logging, loads the config and runs the
//! selected command. Errors and panics end the process with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use telegram_bot::{init_tracing, list_keys, load_config, run_bot, BotConfig, Cli, Commands, ConfigWatcher};
use tracing::{error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let token = match &cli.command {
        Commands::Run { token, .. } => token.clone(),
        Commands::Keys => None,
    };
    let config = load_config(cli.env.as_deref(), token);

    let debug = config.as_ref().is_ok_and(|c| c.base().telegram_debug);
    let directives: &[&str] = if debug { &["teloxide=debug"] } else { &[] };
    if let Err(e) = init_tracing(cli.log, directives, cli.log_file.as_deref()) {
        eprintln!("Unable to init logging: {e:#}");
        return ExitCode::FAILURE;
    }

    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Unable to load config");
            return ExitCode::FAILURE;
        }
    };

    match tokio::spawn(run(cli.command, cli.env, config)).await {
        Ok(Ok(())) => ExitCode::SUCCESS,
        Ok(Err(e)) => {
            error!(error = %format!("{e:#}"), "Bot failed");
            ExitCode::FAILURE
        }
        Err(e) if e.is_panic() => {
            error!(error = %e, "Bot panicked");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "Bot task cancelled");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, env_file: Option<PathBuf>, config: BotConfig) -> Result<()> {
    match command {
        Commands::Run {
            delete_db_on_exit,
            watch_config,
            ..
        } => {
            let _watcher = match (watch_config, env_file) {
                (true, Some(path)) => {
                    Some(ConfigWatcher::watch(&path).context("unable to watch config file")?)
                }
                (true, None) => {
                    warn!("--watch-config needs --env, not watching");
                    None
                }
                (false, _) => None,
            };
            run_bot(config, delete_db_on_exit).await
        }
        Commands::Keys => {
            for key in list_keys(&config).await? {
                println!("{key}");
            }
            Ok(())
        }
    }
}
