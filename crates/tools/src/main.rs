use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crawl_core::{Game, load_save};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the save file to inspect
    #[arg(short, long)]
    save: PathBuf,

    /// Print the full snapshot as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

fn monsters_alive(game: &Game) -> usize {
    game.state().actors.values().filter(|a| a.id != game.player_id() && a.is_alive()).count()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let game = load_save(&args.save)
        .with_context(|| format!("Failed to load save file: {}", args.save.display()))?;

    if args.json {
        let body = serde_json::to_string_pretty(&game.snapshot())
            .with_context(|| "Failed to serialize snapshot")?;
        println!("{body}");
        return Ok(());
    }

    let player = game.player();
    println!("Seed: {}", game.seed());
    println!("Turn: {}", game.turn());
    println!("Dungeon level: {}", game.floor());
    println!("Phase: {:?}", game.phase());
    println!("Player HP: {}/{}", player.fighter.hp(), player.fighter.max_hp);
    println!("Player level: {} ({} xp)", player.level.current_level, player.level.current_xp);
    println!("Inventory: {} item(s)", player.inventory.items.len());
    println!("Monsters alive: {}", monsters_alive(&game));
    println!("Snapshot Hash: 0x{:016x}", game.snapshot_hash());

    Ok(())
}
