use anyhow::{Context, Result};
use kanban::{
    config::Config,
    logging,
    model::ColumnSet,
    tui::{self, AppRouter, BoardController, CrosstermEvents, FormController, TerminalGuard},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut seed_override: Option<bool> = None;
    let mut write_config = false;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                let path = iter.next().context("--config requires a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "--empty" => seed_override = Some(false),
            "--write-config" => write_config = true,
            "-V" | "--version" => {
                println!("kanban {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "-h" | "--help" => {
                print_usage();
                return Ok(());
            }
            other => anyhow::bail!("Unknown argument '{}' (see --help)", other),
        }
    }

    let config = match &config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Write the effective config (defaults filled in) and exit
    if write_config {
        let path = match config_path {
            Some(path) => path,
            None => Config::config_path()?,
        };
        config.save_to(&path)?;
        println!("Wrote config to {}", path.display());
        return Ok(());
    }

    let _log_guard = logging::init(&Config::log_dir()?, &config.log.level)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting kanban");

    let columns = if seed_override.unwrap_or(config.board.seed_tasks) {
        ColumnSet::seeded()
    } else {
        ColumnSet::new()
    };
    let router = AppRouter::new(BoardController::new(columns), FormController::default());
    let theme = config.theme.clone();

    // The board runs on one blocking thread; input is read on another and
    // handed over through the event channel.
    tokio::task::spawn_blocking(move || -> Result<()> {
        let _guard = TerminalGuard::enter()?;
        let terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
        let mut app = tui::App::new(terminal, router, theme)?;
        let mut events = CrosstermEvents::spawn();
        app.run(&mut events)
    })
    .await
    .context("board thread panicked")??;

    info!("kanban exited");
    Ok(())
}

fn print_usage() {
    println!("Terminal kanban board");
    println!();
    println!("Usage: kanban [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Read configuration from PATH");
    println!("      --empty          Start without the example tasks");
    println!("      --write-config   Write the config file with all defaults filled in and exit");
    println!("  -V, --version        Print version");
    println!("  -h, --help           Print help");
}
