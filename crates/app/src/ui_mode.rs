//! The screen-level state machine. Each mode handles one raw event against the game
//! and returns the mode that should handle the next one.

use anyhow::Result;
use crawl_core::content::palette;
use crawl_core::{Action, Game, LevelUpChoice, PendingTargetSelection, Pos, TurnResult};
use tracing::debug;

use crate::input::{self, Key, MainCommand, RawEvent};

const INVALID_ENTRY: &str = "Invalid entry.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InventoryPurpose {
    Use,
    Drop,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiMode {
    MainGame,
    Inventory { purpose: InventoryPurpose },
    SelectTarget { pending: PendingTargetSelection, cursor: Pos },
    Look { cursor: Pos },
    /// `cursor` is the newest message index shown.
    History { cursor: usize },
    CharacterScreen,
    LevelUp,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuitRequest {
    SaveAndQuit,
    /// Leave without saving; any stale save is deleted.
    AbandonRun,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Continue(UiMode),
    Quit(QuitRequest),
    NewGame,
}

impl UiMode {
    pub fn handle(&self, game: &mut Game, event: RawEvent) -> Result<Step> {
        let next = match self {
            UiMode::MainGame => return main_game(game, event),
            UiMode::Inventory { purpose } => inventory(game, *purpose, event)?,
            UiMode::SelectTarget { pending, cursor } => select_target(game, *pending, *cursor, event)?,
            UiMode::Look { cursor } => look(game, *cursor, event),
            UiMode::History { cursor } => history(game, *cursor, event),
            UiMode::CharacterScreen => UiMode::MainGame,
            UiMode::LevelUp => level_up(game, event)?,
            UiMode::GameOver => return Ok(game_over(game, event)),
        };
        Ok(Step::Continue(next))
    }
}

fn history_mode(game: &Game) -> UiMode {
    UiMode::History { cursor: game.messages().len().saturating_sub(1) }
}

fn main_game(game: &mut Game, event: RawEvent) -> Result<Step> {
    let RawEvent::Key(key) = event else {
        return Ok(Step::Continue(UiMode::MainGame));
    };
    let Some(command) = input::main_command(key) else {
        return Ok(Step::Continue(UiMode::MainGame));
    };
    let action = match command {
        MainCommand::Bump { dx, dy } => Action::Bump { dx, dy },
        MainCommand::Wait => Action::Wait,
        MainCommand::PickUp => Action::PickUp,
        MainCommand::Descend => Action::DescendStairs,
        MainCommand::OpenUseInventory => {
            return Ok(Step::Continue(UiMode::Inventory { purpose: InventoryPurpose::Use }));
        }
        MainCommand::OpenDropInventory => {
            return Ok(Step::Continue(UiMode::Inventory { purpose: InventoryPurpose::Drop }));
        }
        MainCommand::Look => return Ok(Step::Continue(UiMode::Look { cursor: game.player().pos })),
        MainCommand::History => return Ok(Step::Continue(history_mode(game))),
        MainCommand::CharacterScreen => return Ok(Step::Continue(UiMode::CharacterScreen)),
        MainCommand::Quit => return Ok(Step::Quit(QuitRequest::SaveAndQuit)),
    };
    let result = game.play_turn(action)?;
    Ok(Step::Continue(after_turn(game, result, UiMode::MainGame)))
}

/// The mode that follows a resolved turn; `on_reject` is kept when the action failed.
fn after_turn(game: &Game, result: TurnResult, on_reject: UiMode) -> UiMode {
    match result {
        TurnResult::Rejected(reason) => {
            debug!(%reason, "player action rejected");
            on_reject
        }
        TurnResult::AwaitingTarget(pending) => {
            UiMode::SelectTarget { pending, cursor: game.player().pos }
        }
        TurnResult::PlayerDied => UiMode::GameOver,
        TurnResult::Resolved if game.level_up_pending() => UiMode::LevelUp,
        TurnResult::Resolved => UiMode::MainGame,
    }
}

fn inventory(game: &mut Game, purpose: InventoryPurpose, event: RawEvent) -> Result<UiMode> {
    let stay = UiMode::Inventory { purpose };
    let RawEvent::Key(key) = event else {
        return Ok(UiMode::MainGame);
    };
    let Some(index) = input::letter_index(key) else {
        return Ok(UiMode::MainGame);
    };
    let Some(&item) = game.player().inventory.items.get(index) else {
        game.add_message(INVALID_ENTRY, palette::INVALID);
        return Ok(stay);
    };

    let action = match purpose {
        InventoryPurpose::Drop => Action::Drop { item },
        InventoryPurpose::Use if game.item(item)?.equippable.is_some() => Action::Equip { item },
        InventoryPurpose::Use => Action::UseItem { item, target: None },
    };
    let result = game.play_turn(action)?;
    Ok(after_turn(game, result, stay))
}

fn clamp_to_map(game: &Game, pos: Pos) -> Pos {
    let map = &game.state().map;
    Pos {
        y: pos.y.clamp(0, map.height as i32 - 1),
        x: pos.x.clamp(0, map.width as i32 - 1),
    }
}

fn select_target(
    game: &mut Game,
    pending: PendingTargetSelection,
    cursor: Pos,
    event: RawEvent,
) -> Result<UiMode> {
    let target = match event {
        RawEvent::Click(pos) if game.state().map.in_bounds(pos) => pos,
        RawEvent::Click(_) => return Ok(UiMode::MainGame),
        RawEvent::Key(key) => {
            if let Some((dx, dy)) = input::direction(key) {
                let cursor = clamp_to_map(game, cursor.offset(dx, dy));
                return Ok(UiMode::SelectTarget { pending, cursor });
            }
            if !input::is_confirm(key) {
                return Ok(UiMode::MainGame);
            }
            cursor
        }
    };
    let result = game.play_turn(pending.resolve(target))?;
    Ok(after_turn(game, result, UiMode::SelectTarget { pending, cursor: target }))
}

fn look(game: &Game, cursor: Pos, event: RawEvent) -> UiMode {
    match event {
        RawEvent::Key(key) => match input::direction(key) {
            Some((dx, dy)) => UiMode::Look { cursor: clamp_to_map(game, cursor.offset(dx, dy)) },
            None => UiMode::MainGame,
        },
        RawEvent::Click(_) => UiMode::MainGame,
    }
}

fn history(game: &Game, cursor: usize, event: RawEvent) -> UiMode {
    let RawEvent::Key(key) = event else {
        return UiMode::MainGame;
    };
    let Some(step) = input::history_step(key) else {
        return UiMode::MainGame;
    };
    let last = game.messages().len().saturating_sub(1);
    let cursor = if step < 0 && cursor == 0 {
        last
    } else if step > 0 && cursor == last {
        0
    } else {
        cursor.saturating_add_signed(step).min(last)
    };
    UiMode::History { cursor }
}

fn level_up(game: &mut Game, event: RawEvent) -> Result<UiMode> {
    let choice = match event {
        RawEvent::Key(Key::Char('a')) => LevelUpChoice::Constitution,
        RawEvent::Key(Key::Char('b')) => LevelUpChoice::Strength,
        RawEvent::Key(Key::Char('c')) => LevelUpChoice::Agility,
        _ => {
            game.add_message(INVALID_ENTRY, palette::INVALID);
            return Ok(UiMode::LevelUp);
        }
    };
    game.apply_level_up(choice)?;
    Ok(if game.level_up_pending() { UiMode::LevelUp } else { UiMode::MainGame })
}

fn game_over(game: &Game, event: RawEvent) -> Step {
    match event {
        RawEvent::Key(Key::Char('v')) => Step::Continue(history_mode(game)),
        RawEvent::Key(Key::Char('n')) => Step::NewGame,
        RawEvent::Key(key) if input::is_cancel(key) => Step::Quit(QuitRequest::AbandonRun),
        _ => Step::Continue(UiMode::GameOver),
    }
}

/// Where a mode that hands control back should land, given the game's state.
pub fn resting_mode(game: &Game) -> UiMode {
    if game.is_game_over() {
        UiMode::GameOver
    } else if game.level_up_pending() {
        UiMode::LevelUp
    } else {
        UiMode::MainGame
    }
}
