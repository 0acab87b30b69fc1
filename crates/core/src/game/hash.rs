//! Stable snapshot hashing for deterministic verification.
//! Covers everything the simulation reads; the message log is presentation and is left out.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

impl Game {
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.turn);
        hasher.write_u64(self.random_draws);
        hasher.write_u32(self.state.floor);
        hasher.write_u8(match self.phase {
            TurnPhase::AwaitingPlayer => 0,
            TurnPhase::GameOver => 1,
        });
        for tile in &self.state.map.tiles {
            hasher.write_u8(*tile as u8);
        }
        for explored in &self.state.map.explored {
            hasher.write_u8(u8::from(*explored));
        }

        for actor in self.state.actors.values() {
            hasher.write(actor.name.as_bytes());
            hasher.write_i32(actor.pos.x);
            hasher.write_i32(actor.pos.y);
            hasher.write_i32(actor.fighter.hp());
            hasher.write_i32(actor.fighter.max_hp);
            hasher.write_i32(actor.fighter.base_power);
            hasher.write_i32(actor.fighter.base_defense);
            hasher.write_u32(actor.level.current_level);
            hasher.write_u32(actor.level.current_xp);
            match &actor.ai {
                None => hasher.write_u8(0),
                Some(ai) => write_ai(&mut hasher, ai),
            }
            hasher.write_usize(actor.inventory.items.len());
            for slot in [actor.equipment.weapon, actor.equipment.armor] {
                let index = slot.and_then(|id| actor.inventory.items.iter().position(|&held| held == id));
                hasher.write_usize(index.map_or(0, |i| i + 1));
            }
        }

        for item in self.state.items.values() {
            hasher.write_u8(item.kind as u8);
            match item.location {
                ItemLocation::Ground(pos) => {
                    hasher.write_u8(0);
                    hasher.write_i32(pos.x);
                    hasher.write_i32(pos.y);
                }
                ItemLocation::Carried(_) => hasher.write_u8(1),
            }
        }
        hasher.finish()
    }
}

fn write_ai(hasher: &mut Xxh3, ai: &Ai) {
    match ai {
        Ai::Controlled => hasher.write_u8(1),
        Ai::Hostile { path } => {
            hasher.write_u8(2);
            hasher.write_usize(path.len());
            for step in path {
                hasher.write_i32(step.x);
                hasher.write_i32(step.y);
            }
        }
        Ai::Confused { previous, turns_remaining } => {
            hasher.write_u8(3);
            hasher.write_u32(*turns_remaining);
            write_ai(hasher, previous);
        }
    }
}
