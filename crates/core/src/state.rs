use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::message_log::MessageLog;
use crate::types::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fighter {
    hp: i32,
    pub max_hp: i32,
    pub base_power: i32,
    pub base_defense: i32,
}

impl Fighter {
    pub fn new(hp: i32, defense: i32, power: i32) -> Self {
        Self { hp, max_hp: hp, base_power: power, base_defense: defense }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    /// Stores `value` clamped to `[0, max_hp]` and returns the stored value.
    pub fn set_hp(&mut self, value: i32) -> i32 {
        self.hp = value.clamp(0, self.max_hp.max(0));
        self.hp
    }

    /// Restores up to `amount` hp and returns how much was actually recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.set_hp(before.saturating_add(amount.max(0)));
        self.hp - before
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub current_level: u32,
    pub current_xp: u32,
    pub level_up_base: u32,
    pub level_up_factor: u32,
    pub xp_given: u32,
}

impl Level {
    pub fn new(level_up_base: u32, level_up_factor: u32, xp_given: u32) -> Self {
        Self { current_level: 1, current_xp: 0, level_up_base, level_up_factor, xp_given }
    }

    pub fn xp_to_next_level(&self) -> u32 {
        self.level_up_base + self.current_level * self.level_up_factor
    }

    pub fn requires_level_up(&self) -> bool {
        self.level_up_base > 0 && self.current_xp > self.xp_to_next_level()
    }

    /// Adds experience unless this actor cannot level; returns whether xp was added.
    pub fn add_xp(&mut self, xp: u32) -> bool {
        if xp == 0 || self.level_up_base == 0 {
            return false;
        }
        self.current_xp = self.current_xp.saturating_add(xp);
        true
    }

    /// Spends the current threshold, keeping any overflow.
    pub fn increase_level(&mut self) {
        self.current_xp = self.current_xp.saturating_sub(self.xp_to_next_level());
        self.current_level += 1;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub capacity: usize,
    pub items: Vec<ItemId>,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self { capacity, items: Vec::new() }
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains(&item)
    }

    pub fn remove(&mut self, item: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|held| *held != item);
        self.items.len() != before
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<ItemId>,
    pub armor: Option<ItemId>,
}

impl Equipment {
    pub fn slot(&self, slot: EquipmentSlot) -> Option<ItemId> {
        match slot {
            EquipmentSlot::Weapon => self.weapon,
            EquipmentSlot::Armor => self.armor,
        }
    }

    pub fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<ItemId> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
        }
    }

    pub fn is_equipped(&self, item: ItemId) -> bool {
        self.weapon == Some(item) || self.armor == Some(item)
    }

    pub fn equipped(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.weapon.iter().chain(self.armor.iter()).copied()
    }
}

/// Per-actor decision strategy. An actor without one is dead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ai {
    /// Driven by input; never consulted by the mob phase.
    Controlled,
    /// Chases and attacks the player, remembering the last route it computed.
    Hostile { path: Vec<Pos> },
    /// Stumbles randomly, then restores `previous`.
    Confused { previous: Box<Ai>, turns_remaining: u32 },
}

impl Ai {
    pub fn hostile() -> Self {
        Ai::Hostile { path: Vec::new() }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Consumable {
    Healing { amount: i32 },
    Lightning { damage: i32, max_range: i32 },
    Confusion { turns: u32 },
    Fireball { damage: i32, radius: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equippable {
    pub slot: EquipmentSlot,
    pub power_bonus: i32,
    pub defense_bonus: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub pos: Pos,
    pub blocks_movement: bool,
    pub render_order: RenderOrder,
    pub fighter: Fighter,
    pub inventory: Inventory,
    pub equipment: Equipment,
    pub level: Level,
    pub ai: Option<Ai>,
}

impl Actor {
    pub fn is_alive(&self) -> bool {
        self.ai.is_some()
    }
}

/// Where an item lives. Held items refer to their holder by id only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemLocation {
    Ground(Pos),
    Carried(EntityId),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub kind: ItemKind,
    pub name: String,
    pub glyph: char,
    pub color: Rgb,
    pub location: ItemLocation,
    pub consumable: Option<Consumable>,
    pub equippable: Option<Equippable>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Map {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<TileKind>,
    pub visible: Vec<bool>,
    pub explored: Vec<bool>,
    pub down_stairs: Pos,
}

impl Map {
    /// Open floor surrounded by a wall border, stairs in the bottom-right interior corner.
    pub fn new(width: usize, height: usize) -> Self {
        let mut map = Self::filled(width, height, TileKind::Floor);
        for x in 0..width {
            map.tiles[x] = TileKind::Wall;
            map.tiles[(height - 1) * width + x] = TileKind::Wall;
        }
        for y in 0..height {
            map.tiles[y * width] = TileKind::Wall;
            map.tiles[y * width + (width - 1)] = TileKind::Wall;
        }
        map.set_down_stairs(Pos { y: height as i32 - 2, x: width as i32 - 2 });
        map
    }

    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self {
            width,
            height,
            tiles: vec![tile; width * height],
            visible: vec![false; width * height],
            explored: vec![false; width * height],
            down_stairs: Pos { y: 0, x: 0 },
        }
    }

    pub fn tile_at(&self, pos: Pos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.tile_at(pos).is_walkable()
    }

    pub fn is_transparent(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.tile_at(pos).is_transparent()
    }

    pub fn set_tile(&mut self, pos: Pos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn set_down_stairs(&mut self, pos: Pos) {
        if !self.in_bounds(pos) {
            return;
        }
        if self.tile_at(self.down_stairs) == TileKind::DownStairs {
            self.set_tile(self.down_stairs, TileKind::Floor);
        }
        self.set_tile(pos, TileKind::DownStairs);
        self.down_stairs = pos;
    }

    pub fn is_visible(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.visible[self.index(pos)]
    }

    pub fn set_visible(&mut self, pos: Pos, visible: bool) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.visible[idx] = visible;
    }

    pub fn clear_visible(&mut self) {
        self.visible.fill(false);
    }

    pub fn is_explored(&self, pos: Pos) -> bool {
        self.in_bounds(pos) && self.explored[self.index(pos)]
    }

    /// Folds the current visible set into the explored mask. Never clears a cell.
    pub fn accumulate_explored(&mut self) {
        for (explored, visible) in self.explored.iter_mut().zip(&self.visible) {
            *explored |= *visible;
        }
    }

    /// True when every per-cell array matches `width * height` and the stairs are on the map.
    pub fn is_well_formed(&self) -> bool {
        let cells = self.width.checked_mul(self.height);
        self.width > 0
            && self.height > 0
            && cells.is_some_and(|cells| {
                self.tiles.len() == cells
                    && self.visible.len() == cells
                    && self.explored.len() == cells
            })
            && self.in_bounds(self.down_stairs)
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| Pos { y: y as i32, x: x as i32 }))
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub floor: u32,
    pub map: Map,
    pub actors: SlotMap<EntityId, Actor>,
    pub items: SlotMap<ItemId, Item>,
    pub player_id: EntityId,
    pub messages: MessageLog,
}

impl GameState {
    pub fn player(&self) -> &Actor {
        &self.actors[self.player_id]
    }

    pub fn held_items(&self, holder: EntityId) -> impl Iterator<Item = &Item> + '_ {
        self.actors
            .get(holder)
            .into_iter()
            .flat_map(|actor| actor.inventory.items.iter())
            .filter_map(|id| self.items.get(*id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fighter_hp_is_clamped_to_zero_and_max() {
        let mut fighter = Fighter::new(10, 0, 3);
        assert_eq!(fighter.set_hp(-4), 0);
        assert_eq!(fighter.set_hp(25), 10);
    }

    #[test]
    fn heal_reports_only_recovered_amount() {
        let mut fighter = Fighter::new(30, 2, 5);
        fighter.set_hp(27);
        assert_eq!(fighter.heal(10), 3);
        assert_eq!(fighter.hp(), 30);
        assert_eq!(fighter.heal(10), 0);
    }

    #[test]
    fn level_up_requires_strictly_more_than_threshold_and_keeps_rollover() {
        let mut level = Level::new(200, 150, 0);
        assert_eq!(level.xp_to_next_level(), 350);

        level.add_xp(350);
        assert!(!level.requires_level_up(), "reaching the threshold exactly is not enough");

        level.add_xp(40);
        assert!(level.requires_level_up());
        level.increase_level();
        assert_eq!(level.current_level, 2);
        assert_eq!(level.current_xp, 40);
        assert_eq!(level.xp_to_next_level(), 500);
    }

    #[test]
    fn monsters_never_accumulate_xp() {
        let mut level = Level::new(0, 150, 35);
        assert!(!level.add_xp(100));
        assert_eq!(level.current_xp, 0);
        assert!(!level.requires_level_up());
    }

    #[test]
    fn explored_accumulates_visible_cells_without_clearing() {
        let mut map = Map::new(6, 6);
        let seen = Pos { y: 2, x: 2 };
        map.set_visible(seen, true);
        map.accumulate_explored();
        map.clear_visible();
        map.accumulate_explored();
        assert!(map.is_explored(seen));
        assert!(!map.is_visible(seen));
    }

    #[test]
    fn moving_the_stairs_restores_the_previous_cell_to_floor() {
        let mut map = Map::new(8, 8);
        let old = map.down_stairs;
        map.set_down_stairs(Pos { y: 2, x: 2 });
        assert_eq!(map.tile_at(old), TileKind::Floor);
        assert_eq!(map.tile_at(Pos { y: 2, x: 2 }), TileKind::DownStairs);
    }
}
