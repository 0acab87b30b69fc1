//! Text-mode frames. The map is drawn from the visible and explored masks, then
//! entities in render order, then whatever the active mode overlays.

use std::io::Write;

use anyhow::Result;
use crawl_core::{Game, Pos, TargetKind};

use crate::ui_mode::{InventoryPurpose, UiMode};

const LOG_LINES: usize = 5;
const BAR_WIDTH: usize = 20;

pub trait Renderer {
    fn render(&mut self, game: &Game, mode: &UiMode) -> Result<()>;
}

/// Writes each frame as plain lines to any `Write` sink.
pub struct AsciiRenderer<W: Write> {
    out: W,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn render(&mut self, game: &Game, mode: &UiMode) -> Result<()> {
        for line in compose_frame(game, mode) {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// `HP: 25/30 [#################...]`, the bar filled in proportion to `current / max`.
pub fn status_bar(label: &str, current: i32, max: i32, width: usize) -> String {
    let filled = if max > 0 {
        (current.clamp(0, max) as usize * width) / max as usize
    } else {
        0
    };
    format!("{label}: {current}/{max} [{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn map_rows(game: &Game, cursor: Option<Pos>) -> Vec<Vec<char>> {
    let map = &game.state().map;
    let mut rows = vec![vec![' '; map.width]; map.height];
    for pos in map.positions() {
        let glyph = if map.is_visible(pos) {
            map.tile_at(pos).graphic(true).glyph
        } else if map.is_explored(pos) {
            map.tile_at(pos).graphic(false).glyph
        } else {
            continue;
        };
        rows[pos.y as usize][pos.x as usize] = glyph;
    }
    for entity in game.render_entities() {
        if map.in_bounds(entity.pos) {
            rows[entity.pos.y as usize][entity.pos.x as usize] = entity.glyph;
        }
    }
    if let Some(cursor) = cursor.filter(|c| map.in_bounds(*c)) {
        rows[cursor.y as usize][cursor.x as usize] = 'X';
    }
    rows
}

fn cursor_of(mode: &UiMode) -> Option<Pos> {
    match mode {
        UiMode::Look { cursor } | UiMode::SelectTarget { cursor, .. } => Some(*cursor),
        _ => None,
    }
}

pub fn compose_frame(game: &Game, mode: &UiMode) -> Vec<String> {
    let mut lines: Vec<String> =
        map_rows(game, cursor_of(mode)).into_iter().map(|row| row.into_iter().collect()).collect();

    let player = game.player();
    lines.push(status_bar("HP", player.fighter.hp(), player.fighter.max_hp, BAR_WIDTH));
    lines.push(format!("Dungeon level: {}", game.floor()));
    if let Some(cursor) = cursor_of(mode) {
        lines.push(format!("Under cursor: {}", game.names_at(cursor)));
    }
    lines.extend(game.messages().recent(LOG_LINES).iter().map(|m| m.full_text()));
    lines.extend(overlay(game, mode));
    lines
}

fn overlay(game: &Game, mode: &UiMode) -> Vec<String> {
    match mode {
        UiMode::MainGame | UiMode::Look { .. } => vec![],
        UiMode::Inventory { purpose } => inventory_overlay(game, *purpose),
        UiMode::SelectTarget { pending, .. } => match pending.kind {
            TargetKind::Single => vec!["Select a target (Enter to confirm, Esc to cancel).".into()],
            TargetKind::Area { radius } => {
                vec![format!("Select the centre of a radius-{radius} blast (Enter to confirm).")]
            }
        },
        UiMode::History { cursor } => {
            let mut out = vec!["| Message History |".to_string()];
            let shown = &game.messages().messages()[..(*cursor + 1).min(game.messages().len())];
            out.extend(shown.iter().map(|m| m.full_text()));
            out
        }
        UiMode::CharacterScreen => {
            let level = &game.player().level;
            let id = game.player_id();
            vec![
                "Character Information".to_string(),
                format!("Level: {}", level.current_level),
                format!("XP: {}", level.current_xp),
                format!("XP for next Level: {}", level.xp_to_next_level()),
                format!("Attack: {}", game.power(id)),
                format!("Defense: {}", game.defense(id)),
            ]
        }
        UiMode::LevelUp => {
            let player = game.player();
            vec![
                "Level Up".to_string(),
                "Congratulations! You level up!".to_string(),
                "Select an attribute to increase.".to_string(),
                format!("a) Constitution (+20 HP, from {})", player.fighter.max_hp),
                format!("b) Strength (+1 attack, from {})", player.fighter.base_power),
                format!("c) Agility (+1 defense, from {})", player.fighter.base_defense),
            ]
        }
        UiMode::GameOver => {
            vec!["You died. [v] history  [n] new game  [Esc] quit".to_string()]
        }
    }
}

fn inventory_overlay(game: &Game, purpose: InventoryPurpose) -> Vec<String> {
    let title = match purpose {
        InventoryPurpose::Use => "Select an item to use.",
        InventoryPurpose::Drop => "Select an item to drop.",
    };
    let player = game.player();
    let mut out = vec![title.to_string()];
    if player.inventory.items.is_empty() {
        out.push("(Empty)".to_string());
    }
    for (index, item) in game.state().held_items(game.player_id()).enumerate() {
        let key = char::from(b'a' + index as u8);
        let mark = if player.equipment.is_equipped(item.id) { " (E)" } else { "" };
        out.push(format!("({key}) {}{mark}", item.name));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_fills_in_proportion() {
        assert_eq!(status_bar("HP", 30, 30, 10), "HP: 30/30 [##########]");
        assert_eq!(status_bar("HP", 15, 30, 10), "HP: 15/30 [#####.....]");
        assert_eq!(status_bar("HP", 0, 30, 4), "HP: 0/30 [....]");
    }

    #[test]
    fn status_bar_tolerates_zero_max() {
        assert_eq!(status_bar("XP", 0, 0, 3), "XP: 0/0 [...]");
    }
}
