use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Parser;
use crawl_core::{
    Action, Game, GameConfig, LevelUpChoice, PendingTargetSelection, Pos, TurnResult,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    turns: u32,
}

const DIRECTIONS: [(i32, i32); 8] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn random_action(game: &Game, rng: &mut ChaCha8Rng) -> Action {
    let items = &game.player().inventory.items;
    match rng.next_u64() % 10 {
        0..=4 => {
            let (dx, dy) = choose(rng, &DIRECTIONS);
            Action::Bump { dx, dy }
        }
        5 => Action::PickUp,
        6 if !items.is_empty() => Action::UseItem { item: choose(rng, items), target: None },
        7 if !items.is_empty() => Action::Equip { item: choose(rng, items) },
        8 if !items.is_empty() && rng.next_u64() % 4 == 0 => Action::Drop { item: choose(rng, items) },
        9 => Action::DescendStairs,
        _ => Action::Wait,
    }
}

/// Aims at a visible monster when there is one, otherwise anywhere on the map.
fn pick_target(game: &Game, rng: &mut ChaCha8Rng) -> Pos {
    let map = &game.state().map;
    let visible: Vec<Pos> = game
        .state()
        .actors
        .values()
        .filter(|a| a.is_alive() && a.id != game.player_id() && map.is_visible(a.pos))
        .map(|a| a.pos)
        .collect();
    if !visible.is_empty() && rng.next_u64() % 4 != 0 {
        return choose(rng, &visible);
    }
    Pos {
        y: (rng.next_u64() % map.height as u64) as i32,
        x: (rng.next_u64() % map.width as u64) as i32,
    }
}

fn check_invariants(game: &Game) -> Result<()> {
    let state = game.state();
    let mut occupied = BTreeSet::new();
    for actor in state.actors.values() {
        let hp = actor.fighter.hp();
        if hp < 0 || hp > actor.fighter.max_hp {
            bail!("{} has {hp} hp outside 0..={}", actor.name, actor.fighter.max_hp);
        }
        if !actor.is_alive() {
            continue;
        }
        if !state.map.is_walkable(actor.pos) {
            bail!("{} stands on an unwalkable cell {:?}", actor.name, actor.pos);
        }
        if !occupied.insert(actor.pos) {
            bail!("two living actors share {:?}", actor.pos);
        }
    }
    let carried = game.player().inventory.items.len();
    if carried > game.config().inventory_capacity {
        bail!("inventory holds {carried} items");
    }
    for pos in state.map.positions() {
        if state.map.is_visible(pos) && !state.map.is_explored(pos) {
            bail!("{pos:?} is visible but not explored");
        }
    }
    Ok(())
}

fn run(seed: u64, turns: u32) -> Result<Game> {
    let mut game = Game::new(GameConfig::default(), seed)?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut pending: Option<PendingTargetSelection> = None;

    for step in 0..turns {
        if game.is_game_over() {
            info!(step, turn = game.turn(), floor = game.floor(), "player died");
            break;
        }
        if game.level_up_pending() {
            let choice = choose(
                &mut rng,
                &[LevelUpChoice::Constitution, LevelUpChoice::Strength, LevelUpChoice::Agility],
            );
            game.apply_level_up(choice)?;
            continue;
        }
        let action = match pending.take() {
            Some(selection) => selection.resolve(pick_target(&game, &mut rng)),
            None => random_action(&game, &mut rng),
        };
        match game.play_turn(action)? {
            TurnResult::AwaitingTarget(selection) => pending = Some(selection),
            TurnResult::Rejected(reason) => debug!(%reason, "rejected"),
            TurnResult::Resolved | TurnResult::PlayerDied => {}
        }
        check_invariants(&game)?;
    }
    Ok(game)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} steps...", args.seed, args.turns);
    let first = run(args.seed, args.turns)?;
    let second = run(args.seed, args.turns)?;
    if first.snapshot_hash() != second.snapshot_hash() {
        bail!("same seed produced different runs");
    }

    println!(
        "Fuzzing completed successfully: turn {}, floor {}, hash 0x{:016x}",
        first.turn(),
        first.floor(),
        first.snapshot_hash()
    );
    Ok(())
}
