use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use punch_cli::commands::{edit, log, session, status};
use punch_cli::editor::ExternalEditor;
use punch_cli::paint::{color_enabled, select};
use punch_cli::{Cli, Commands, Config};
use punch_store::FileStore;

/// Load config and open the locked state store.
fn open_store(config_path: Option<&Path>) -> Result<(FileStore, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let store = FileStore::open(&config.state_path)
        .with_context(|| format!("failed to open {}", config.state_path.display()))?;
    Ok((store, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let (mut store, config) = open_store(cli.config.as_deref())?;
    let paint = select(color_enabled(config.color, cli.no_color));
    let paint = paint.as_ref();
    let now = Utc::now();
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Start(args) => session::start(&mut stdout, &mut store, args, paint, now)?,
        Commands::Stop(args) => session::stop(&mut stdout, &mut store, args, paint, now)?,
        Commands::Interrupt(args) => {
            session::interrupt(&mut stdout, &mut store, args, paint, now)?;
        }
        Commands::Tag(args) => session::tag(&mut stdout, &mut store, args, paint)?,
        Commands::Note(args) => session::note(&mut stdout, &mut store, args, paint)?,
        Commands::Status => status::run(&mut stdout, &mut store, paint, now)?,
        Commands::Log(args) => log::run(&mut stdout, &mut store, args, paint, now)?,
        Commands::Edit => {
            let editor = ExternalEditor::resolve(config.editor.as_deref())?;
            tracing::debug!(editor = editor.program(), "resolved editor");
            edit::run(&mut stdout, &mut store, &editor)?;
        }
    }

    Ok(())
}
