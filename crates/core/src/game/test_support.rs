//! Shared fixtures for the `game` submodule test suites.

use super::*;
use crate::mapgen::{GeneratedFloor, ItemSpawn, MonsterSpawn};

pub(super) const ARENA_ENTRY: Pos = Pos { y: 4, x: 4 };

/// A single corridor along row 5 with one wall cell at x = 6.
pub(super) fn wall_occlusion_fixture() -> (Map, Pos) {
    let mut map = Map::new(11, 11);
    for y in 1..10 {
        for x in 1..10 {
            map.set_tile(Pos { y, x }, if y == 5 { TileKind::Floor } else { TileKind::Wall });
        }
    }
    map.set_tile(Pos { y: 5, x: 6 }, TileKind::Wall);
    (map, Pos { y: 5, x: 3 })
}

pub(super) fn floor_with(
    map: Map,
    entry: Pos,
    monsters: &[(MonsterKind, Pos)],
    items: &[(ItemKind, Pos)],
) -> GeneratedFloor {
    GeneratedFloor {
        map,
        entry,
        monsters: monsters.iter().map(|&(kind, pos)| MonsterSpawn { kind, pos }).collect(),
        items: items.iter().map(|&(kind, pos)| ItemSpawn { kind, pos }).collect(),
    }
}

pub(super) fn game_on(floor: GeneratedFloor) -> Game {
    Game::with_generator(GameConfig::default(), 7, Box::new(floor)).expect("default config is valid")
}

/// A 12x10 walled room, fully lit from the player's cell at (4, 4).
pub(super) fn arena_game(monsters: &[(MonsterKind, Pos)], items: &[(ItemKind, Pos)]) -> Game {
    game_on(floor_with(Map::new(12, 10), ARENA_ENTRY, monsters, items))
}

pub(super) fn monster_at(game: &Game, pos: Pos) -> EntityId {
    game.state
        .actors
        .iter()
        .find(|(id, actor)| *id != game.state.player_id && actor.pos == pos)
        .map(|(id, _)| id)
        .expect("a monster stands on that cell")
}

pub(super) fn kill_outright(game: &mut Game, id: EntityId) {
    game.apply_damage(id, 1_000);
}

pub(super) fn give_item(game: &mut Game, kind: ItemKind) -> ItemId {
    let player = game.state.player_id;
    let item = game.spawn_item(content::item(kind, ItemLocation::Carried(player)));
    game.state.actors[player].inventory.items.push(item);
    item
}
