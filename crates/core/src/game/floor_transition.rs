//! Floor replacement. Everything on the old floor is discarded except the player
//! and what the player carries.

use super::*;

impl Game {
    pub(super) fn descend(&mut self) {
        self.state.floor += 1;
        self.install_floor();
        info!(floor = self.state.floor, turn = self.turn, "descended to a new floor");
    }

    /// Generates the current floor and moves the player onto its entry cell.
    pub(super) fn install_floor(&mut self) {
        let floor = self.state.floor;
        let params = self.config.floor_params(floor);
        let generated = self.generator.generate(&params, derive_floor_seed(self.seed, floor));

        let player = self.state.player_id;
        self.state.actors.retain(|id, _| id == player);
        self.state.items.retain(|_, item| item.location == ItemLocation::Carried(player));
        self.state.map = generated.map;
        self.state.actors[player].pos = generated.entry;

        let mut occupied = BTreeSet::from([generated.entry]);
        for spawn in generated.monsters {
            if !self.state.map.is_walkable(spawn.pos) || !occupied.insert(spawn.pos) {
                debug!(?spawn, "skipping monster spawn on an unusable cell");
                continue;
            }
            self.spawn_actor(content::monster(spawn.kind, spawn.pos));
        }
        for spawn in generated.items {
            if !self.state.map.is_walkable(spawn.pos) {
                continue;
            }
            self.spawn_item(content::item(spawn.kind, ItemLocation::Ground(spawn.pos)));
        }
        debug!(
            floor,
            actors = self.state.actors.len(),
            items = self.state.items.len(),
            "floor installed"
        );
        self.update_fov();
    }

    pub(super) fn spawn_actor(&mut self, actor: Actor) -> EntityId {
        let id = self.state.actors.insert(actor);
        self.state.actors[id].id = id;
        id
    }

    pub(super) fn spawn_item(&mut self, item: Item) -> ItemId {
        let id = self.state.items.insert(item);
        self.state.items[id].id = id;
        id
    }
}
