//! Occupancy and lookup queries over the active floor.
//! This module answers "what is at this cell"; it never mutates the world.

use super::*;

/// One drawable entity on a visible cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderEntity {
    pub pos: Pos,
    pub glyph: char,
    pub color: Rgb,
    pub order: RenderOrder,
    pub name: String,
}

impl Game {
    pub fn blocking_actor_at(&self, pos: Pos) -> Option<EntityId> {
        self.state
            .actors
            .iter()
            .find(|(_, actor)| actor.blocks_movement && actor.pos == pos)
            .map(|(id, _)| id)
    }

    pub fn living_actor_at(&self, pos: Pos) -> Option<EntityId> {
        self.state
            .actors
            .iter()
            .find(|(_, actor)| actor.is_alive() && actor.pos == pos)
            .map(|(id, _)| id)
    }

    pub fn ground_items_at(&self, pos: Pos) -> Vec<ItemId> {
        self.state
            .items
            .iter()
            .filter(|(_, item)| item.location == ItemLocation::Ground(pos))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.state.map.is_walkable(pos)
    }

    /// Attack strength including equipment bonuses.
    pub fn power(&self, id: EntityId) -> i32 {
        let Some(actor) = self.state.actors.get(id) else { return 0 };
        actor.fighter.base_power + self.equipment_bonus(actor, |bonus| bonus.power_bonus)
    }

    pub fn defense(&self, id: EntityId) -> i32 {
        let Some(actor) = self.state.actors.get(id) else { return 0 };
        actor.fighter.base_defense + self.equipment_bonus(actor, |bonus| bonus.defense_bonus)
    }

    fn equipment_bonus(&self, actor: &Actor, pick: impl Fn(&Equippable) -> i32) -> i32 {
        actor
            .equipment
            .equipped()
            .filter_map(|id| self.state.items.get(id))
            .filter_map(|item| item.equippable.as_ref())
            .map(pick)
            .sum()
    }

    /// Comma-separated names of everything on a visible cell, empty otherwise.
    pub fn names_at(&self, pos: Pos) -> String {
        if !self.state.map.is_visible(pos) {
            return String::new();
        }
        let actor_names = self
            .state
            .actors
            .values()
            .filter(|actor| actor.pos == pos)
            .map(|actor| actor.name.as_str());
        let item_names = self
            .state
            .items
            .values()
            .filter(|item| item.location == ItemLocation::Ground(pos))
            .map(|item| item.name.as_str());
        capitalize(&actor_names.chain(item_names).collect::<Vec<_>>().join(", "))
    }

    /// Entities on visible cells, corpses first and living actors last.
    pub fn render_entities(&self) -> Vec<RenderEntity> {
        let map = &self.state.map;
        let actors = self.state.actors.values().filter(|a| map.is_visible(a.pos)).map(|a| {
            RenderEntity {
                pos: a.pos,
                glyph: a.glyph,
                color: a.color,
                order: a.render_order,
                name: a.name.clone(),
            }
        });
        let items = self.state.items.values().filter_map(|item| match item.location {
            ItemLocation::Ground(pos) if map.is_visible(pos) => Some(RenderEntity {
                pos,
                glyph: item.glyph,
                color: item.color,
                order: RenderOrder::Item,
                name: item.name.clone(),
            }),
            _ => None,
        });
        let mut entities: Vec<RenderEntity> = actors.chain(items).collect();
        entities.sort_by_key(|entity| entity.order);
        entities
    }

    /// Cells holding blocking actors other than `mover`.
    pub(super) fn blocker_cells(&self, mover: EntityId) -> BTreeSet<Pos> {
        self.state
            .actors
            .iter()
            .filter(|(id, actor)| *id != mover && actor.blocks_movement)
            .map(|(_, actor)| actor.pos)
            .collect()
    }
}
