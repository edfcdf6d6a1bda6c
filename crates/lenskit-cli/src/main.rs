//! Lenskit CLI - maintenance jobs for the lens knowledge graph.

use anyhow::Context;
use clap::Parser;
use lenskit_cli::commands::{self, Credentials};
use lenskit_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    // Credentials may live in a local .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = commands::config::load_for_command(cli.config.as_deref(), &cli.command)
        .context("Failed to load configuration")?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let credentials = Credentials {
        url: cli.supabase_url,
        key: cli.supabase_key,
    };

    match cli.command {
        Command::Config(args) => {
            let path = match cli.config {
                Some(path) => path,
                None => Config::default_path()?,
            };
            commands::execute_config(args, &config, &path, &formatter)?;
        }
        Command::Audit => {
            let store = commands::open_store(&config, &credentials)?;
            commands::execute_audit(&store, &formatter).context("Embedding audit failed")?;
        }
        Command::Inspect(args) => {
            let store = commands::open_store(&config, &credentials)?;
            commands::execute_inspect(args, &store, &formatter).context("Format inspection failed")?;
        }
        Command::Reembed(args) => {
            let mut store = commands::open_store(&config, &credentials)?;
            let model = config.embedder().context("Failed to set up embedding model")?;
            commands::execute_reembed(args, &mut store, &model, &config.reembed, &formatter)
                .context("Re-embedding failed")?;
        }
        Command::Contrasts(args) => {
            let store = commands::open_store(&config, &credentials)?;
            commands::execute_contrasts(args, &store, &config.contrast, &formatter)
                .context("Contrast generation failed")?;
        }
        Command::Migration => {
            let store = commands::open_store(&config, &credentials)?;
            commands::execute_migration(&store, &config.store.table, config.embedding.dimension, &formatter)
                .context("Migration report failed")?;
        }
    }

    Ok(())
}
