pub mod commands;
pub mod config;
pub mod coordinate;
pub mod errors;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;
use crate::config::AppConfig;

pub fn run() -> ExitCode {
    // Load .env file if present (ignore error if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The log filter comes from the config file, so load it before the subscriber exists.
    let loaded = config::load_config();
    let fallback_filter = loaded
        .as_ref()
        .ok()
        .and_then(Option::as_ref)
        .map_or_else(|| "info".to_string(), |(cfg, _)| cfg.log.filter.clone());

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(fallback_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    // A missing file means defaults; a file that is present but broken would
    // silently change every conversion, so it stops the run.
    let config = match loaded {
        Ok(Some((cfg, path))) => {
            tracing::debug!(path = %path.display(), "config loaded");
            cfg
        }
        Ok(None) => {
            tracing::debug!("no config file found; using built-in defaults");
            AppConfig::default()
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to load config");
            return ExitCode::FAILURE;
        }
    };

    let result = commands::resolve_screen(&cli, &config).and_then(|screen| {
        tracing::debug!(screen = %screen, command = ?cli.command, "executing");
        commands::execute(&cli.command, &screen, &config)
    });

    match result {
        Ok(output) => {
            if cli.json {
                match serde_json::to_string(&output) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        tracing::error!(error = %e, "failed to encode output");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                println!("{}", output.render_plain());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            if cli.json {
                if let Ok(json) = serde_json::to_string(&serde_json::json!({ "error": e })) {
                    println!("{json}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
