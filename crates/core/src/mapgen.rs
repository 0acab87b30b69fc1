//! Floor generation behind a pluggable trait.
//! The engine only sees `GeneratedFloor`; how rooms are carved and populated lives here.

mod layout;
mod spawns;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::state::Map;
use crate::types::{ItemKind, MonsterKind, Pos};

/// Inputs for building one floor, with spawn tables already resolved for its depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FloorParams {
    pub floor: u32,
    pub width: usize,
    pub height: usize,
    pub max_rooms: usize,
    pub room_min_size: usize,
    pub room_max_size: usize,
    pub max_monsters_per_room: usize,
    pub max_items_per_room: usize,
    pub monster_weights: Vec<(MonsterKind, u32)>,
    pub item_weights: Vec<(ItemKind, u32)>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterSpawn {
    pub kind: MonsterKind,
    pub pos: Pos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ItemSpawn {
    pub kind: ItemKind,
    pub pos: Pos,
}

/// A fresh floor: tiles with the stairs already placed, the player's entry cell and
/// everything to spawn on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedFloor {
    pub map: Map,
    pub entry: Pos,
    pub monsters: Vec<MonsterSpawn>,
    pub items: Vec<ItemSpawn>,
}

pub trait DungeonGenerator {
    fn generate(&self, params: &FloorParams, seed: u64) -> GeneratedFloor;
}

/// A fixed floor handed back unchanged on every descent. Used for hand-built scenarios.
impl DungeonGenerator for GeneratedFloor {
    fn generate(&self, _params: &FloorParams, _seed: u64) -> GeneratedFloor {
        self.clone()
    }
}

/// Random non-overlapping rectangular rooms joined by L-shaped tunnels.
/// The player enters at the first room's centre; the stairs sit at the last room's centre.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoomsAndCorridors;

impl DungeonGenerator for RoomsAndCorridors {
    fn generate(&self, params: &FloorParams, seed: u64) -> GeneratedFloor {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (map, rooms) = layout::carve_rooms(params, &mut rng);
        let entry = rooms.first().map_or(map.down_stairs, |room| room.center());
        let (monsters, items) = spawns::populate(&rooms, params, entry, &mut rng);
        GeneratedFloor { map, entry, monsters, items }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use super::*;
    use crate::config::GameConfig;
    use crate::types::TileKind;

    fn reachable_from(map: &Map, start: Pos) -> BTreeSet<Pos> {
        let mut seen = BTreeSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for (dx, dy) in [(0, -1), (1, 0), (0, 1), (-1, 0)] {
                let next = current.offset(dx, dy);
                if map.is_walkable(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn same_seed_same_floor() {
        let params = GameConfig::default().floor_params(1);
        let a = RoomsAndCorridors.generate(&params, 42);
        let b = RoomsAndCorridors.generate(&params, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn stairs_and_spawns_are_reachable_from_entry() {
        let config = GameConfig::default();
        for seed in 0..20 {
            let params = config.floor_params(5);
            let floor = RoomsAndCorridors.generate(&params, seed);
            let reachable = reachable_from(&floor.map, floor.entry);

            assert_eq!(floor.map.tile_at(floor.map.down_stairs), TileKind::DownStairs);
            assert!(reachable.contains(&floor.map.down_stairs), "seed {seed}: stairs cut off");
            for spawn in &floor.monsters {
                assert!(reachable.contains(&spawn.pos), "seed {seed}: monster walled in");
                assert_ne!(spawn.pos, floor.entry);
            }
            for spawn in &floor.items {
                assert!(reachable.contains(&spawn.pos), "seed {seed}: item walled in");
            }
        }
    }

    #[test]
    fn spawn_cells_are_unique() {
        let params = GameConfig::default().floor_params(8);
        let floor = RoomsAndCorridors.generate(&params, 9);
        let mut cells = BTreeSet::new();
        for pos in floor.monsters.iter().map(|s| s.pos).chain(floor.items.iter().map(|s| s.pos)) {
            assert!(cells.insert(pos), "two spawns share {pos:?}");
        }
    }

    #[test]
    fn map_border_stays_solid() {
        let params = GameConfig::default().floor_params(1);
        let floor = RoomsAndCorridors.generate(&params, 1234);
        let map = &floor.map;
        for x in 0..map.width as i32 {
            assert_eq!(map.tile_at(Pos { y: 0, x }), TileKind::Wall);
            assert_eq!(map.tile_at(Pos { y: map.height as i32 - 1, x }), TileKind::Wall);
        }
        for y in 0..map.height as i32 {
            assert_eq!(map.tile_at(Pos { y, x: 0 }), TileKind::Wall);
            assert_eq!(map.tile_at(Pos { y, x: map.width as i32 - 1 }), TileKind::Wall);
        }
    }

    #[test]
    fn prebuilt_floor_is_returned_verbatim() {
        let floor = GeneratedFloor {
            map: Map::new(10, 8),
            entry: Pos { y: 2, x: 2 },
            monsters: vec![MonsterSpawn { kind: MonsterKind::Rat, pos: Pos { y: 3, x: 3 } }],
            items: Vec::new(),
        };
        let params = GameConfig::default().floor_params(3);
        assert_eq!(floor.generate(&params, 1), floor);
    }
}
