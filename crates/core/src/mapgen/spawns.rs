//! Per-room monster and item placement from weighted depth tables.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use super::layout::{RoomRect, roll};
use super::{FloorParams, ItemSpawn, MonsterSpawn};
use crate::types::Pos;

pub(super) fn populate(
    rooms: &[RoomRect],
    params: &FloorParams,
    entry: Pos,
    rng: &mut ChaCha8Rng,
) -> (Vec<MonsterSpawn>, Vec<ItemSpawn>) {
    let mut monsters = Vec::new();
    let mut items = Vec::new();
    let mut occupied = vec![entry];

    for room in rooms {
        let monster_count = roll(rng, 0, params.max_monsters_per_room);
        let item_count = roll(rng, 0, params.max_items_per_room);

        for _ in 0..monster_count {
            let Some(kind) = pick_weighted(rng, &params.monster_weights) else { break };
            let pos = room.random_inner_cell(rng);
            if !occupied.contains(&pos) {
                occupied.push(pos);
                monsters.push(MonsterSpawn { kind, pos });
            }
        }
        for _ in 0..item_count {
            let Some(kind) = pick_weighted(rng, &params.item_weights) else { break };
            let pos = room.random_inner_cell(rng);
            if !occupied.contains(&pos) {
                occupied.push(pos);
                items.push(ItemSpawn { kind, pos });
            }
        }
    }

    (monsters, items)
}

pub(super) fn pick_weighted<K: Copy>(rng: &mut ChaCha8Rng, weights: &[(K, u32)]) -> Option<K> {
    let total: u64 = weights.iter().map(|(_, weight)| u64::from(*weight)).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.next_u64() % total;
    for &(kind, weight) in weights {
        let weight = u64::from(weight);
        if roll < weight {
            return Some(kind);
        }
        roll -= weight;
    }
    None
}
