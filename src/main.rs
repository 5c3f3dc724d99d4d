//! recordhook - fetch and save records through workflow webhooks
//!
//! Thin binary entry point that delegates to the CLI handlers.

use std::process::ExitCode;

use clap::Parser;
use recordhook::RecordError;
use recordhook_commons::{DisplayErrorFormatter, ErrorFormatter};
use recordhook_config::{DebugConfig, load_dotenv};

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env (non-fatal if missing)
    load_dotenv().ok();

    let args = Cli::parse();
    let env_tracing = initialize_tracing_from_env();

    match run(args, env_tracing).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli, env_tracing: bool) -> anyhow::Result<()> {
    if let Commands::Config { output, force } = &args.command {
        return cli::handle_config_command(output, *force);
    }

    let config = cli::load_config(&args)?;
    if !env_tracing && config.debug.enable_tracing {
        initialize_tracing_from_config(&config.debug);
    }

    match args.command {
        Commands::Get { id, compact } => cli::handle_get_command(&config, &id, compact).await,
        Commands::Save { file, compact } => {
            cli::handle_save_command(&config, file.as_deref(), compact).await
        }
        Commands::Config { .. } => Ok(()),
    }
}

/// `RUST_LOG` takes precedence over the config's debug section.
fn initialize_tracing_from_env() -> bool {
    if std::env::var("RUST_LOG").is_err() {
        return false;
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

fn initialize_tracing_from_config(debug_cfg: &DebugConfig) {
    let filter = debug_cfg.filter_directive();
    let initialized = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&filter))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    if initialized {
        tracing::info!("Debug tracing enabled: {}", filter);
    }
}

fn report_error(err: &anyhow::Error) {
    eprintln!("Error: {}", DisplayErrorFormatter.format_error(err));

    if let Some(record_err) = err.downcast_ref::<RecordError>() {
        let category = record_err.category();
        eprintln!("  {category}");
        for suggestion in category.recovery_suggestions() {
            eprintln!("  - {suggestion}");
        }
    }
}
