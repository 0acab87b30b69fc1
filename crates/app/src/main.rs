use std::env;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crawl_app::config_file::ConfigFile;
use crawl_app::input::parse_line;
use crawl_app::render::{AsciiRenderer, Renderer};
use crawl_app::save_slot::{LoadOutcome, SaveSlot};
use crawl_app::seed::{SEED_ENV, generate_runtime_seed, resolve_seed};
use crawl_app::session::Session;
use crawl_app::ui_mode::QuitRequest;
use crawl_app::{format_seed, format_snapshot_hash};
use crawl_core::content::palette;
use crawl_core::{Game, GameConfig};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for a new run (overrides CRAWL_SEED and the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the save file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Ignore any existing save and start a new run
    #[arg(long)]
    new_game: bool,
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn new_game(args: &Args, config: &GameConfig) -> Result<Game> {
    let env_seed = env::var(SEED_ENV).ok();
    let choice = resolve_seed(args.seed, env_seed.as_deref(), config.seed, generate_runtime_seed())
        .map_err(anyhow::Error::msg)?;
    info!(seed = %format_seed(choice.value()), ?choice, "starting a new run");
    Game::new(config.clone(), choice.value()).context("building the first floor")
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = ConfigFile::resolve(args.config.as_deref())?.game;
    let save_path = args
        .save
        .clone()
        .or_else(SaveSlot::get_default_path)
        .context("no platform data directory; pass --save")?;
    let slot = SaveSlot::at(save_path);

    let game = match (args.new_game, slot.load()) {
        (false, LoadOutcome::Loaded(game)) => {
            info!(hash = %format_snapshot_hash(game.snapshot_hash()), "resuming saved run");
            game
        }
        (_, LoadOutcome::Unreadable(reason)) => {
            warn!(%reason, "starting fresh instead of loading");
            let mut game = new_game(&args, &config)?;
            game.add_message(format!("Could not load the saved game: {reason}"), palette::ERROR);
            game
        }
        _ => new_game(&args, &config)?,
    };

    let mut session = Session::new(game, config);
    let mut renderer = AsciiRenderer::new(io::stdout());
    renderer.render(session.game(), session.mode())?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading input")?;
        for event in parse_line(&line) {
            if let Some(request) = session.handle_event(event) {
                info!(?request, "quitting");
                return session.finish(request, &slot);
            }
        }
        renderer.render(session.game(), session.mode())?;
    }

    // End of input behaves like a save-and-quit.
    session.finish(QuitRequest::SaveAndQuit, &slot)
}
