//! CLI entry point - the composition root.
//!
//! Logging and `.env` loading are set up here; everything else is wired in
//! [`fukugo_cli::bootstrap`].

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use fukugo_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

/// Log to stderr. `RUST_LOG` wins unless `--verbose` is given; the default
/// level is `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command.as_ref() else {
        // No command provided - show help
        Cli::command().print_help()?;
        return Ok(());
    };

    // Paths needs neither the database nor the synthesis service.
    if matches!(command, Commands::Paths) {
        return handlers::paths::execute();
    }

    let config = CliConfig::with_defaults()?.with_overrides(&cli.settings_update())?;
    let ctx = bootstrap(config).await?;

    match command {
        Commands::Speak { text } => handlers::speak::execute(&ctx, text).await,
        Commands::Fetch { text, out } => handlers::fetch::execute(&ctx, text, out).await,
        Commands::Cached { text } => handlers::cached::execute(&ctx, text).await,
        Commands::Paths => handlers::paths::execute(),
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
