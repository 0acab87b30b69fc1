use crate::state::{
    Actor, Ai, Consumable, Equipment, Equippable, Fighter, Inventory, Item, ItemLocation, Level,
};
use crate::types::{EntityId, EquipmentSlot, ItemId, ItemKind, MonsterKind, Pos, RenderOrder, Rgb};

pub mod palette {
    use crate::types::Rgb;

    pub const WHITE: Rgb = Rgb(0xFF, 0xFF, 0xFF);
    pub const PLAYER_ATK: Rgb = Rgb(0xE0, 0xE0, 0xE0);
    pub const ENEMY_ATK: Rgb = Rgb(0xFF, 0xC0, 0xC0);
    pub const NEEDS_TARGET: Rgb = Rgb(0x3F, 0xFF, 0xFF);
    pub const STATUS_EFFECT_APPLIED: Rgb = Rgb(0x3F, 0xFF, 0x3F);
    pub const DESCEND: Rgb = Rgb(0x9F, 0x3F, 0xFF);
    pub const PLAYER_DIE: Rgb = Rgb(0xFF, 0x30, 0x30);
    pub const ENEMY_DIE: Rgb = Rgb(0xFF, 0xA0, 0x30);
    pub const INVALID: Rgb = Rgb(0xFF, 0xFF, 0x00);
    pub const IMPOSSIBLE: Rgb = Rgb(0x80, 0x80, 0x80);
    pub const ERROR: Rgb = Rgb(0xFF, 0x40, 0x40);
    pub const WELCOME_TEXT: Rgb = Rgb(0x20, 0xA0, 0xFF);
    pub const HEALTH_RECOVERED: Rgb = Rgb(0x00, 0xFF, 0x00);
    pub const CORPSE: Rgb = Rgb(0xBF, 0x00, 0x00);
}

pub const PLAYER_NAME: &str = "Player";
pub const CORPSE_GLYPH: char = '%';

/// `(first floor, value)` pairs; the last entry at or below the floor wins.
pub const MAX_ITEMS_BY_FLOOR: &[(u32, usize)] = &[(1, 1), (4, 2)];
pub const MAX_MONSTERS_BY_FLOOR: &[(u32, usize)] = &[(1, 2), (4, 3), (6, 5)];

/// Cumulative weight tables: entries from every key at or below the floor apply,
/// and a later key overrides the weight of an entity named earlier.
pub const ITEM_CHANCES: &[(u32, &[(ItemKind, u32)])] = &[
    (0, &[(ItemKind::HealthPotion, 35), (ItemKind::Stick, 10)]),
    (1, &[(ItemKind::ConfusionScroll, 10), (ItemKind::Shield, 15)]),
    (2, &[(ItemKind::LightningScroll, 25), (ItemKind::Knife, 5)]),
    (3, &[(ItemKind::Bomb, 25), (ItemKind::BigShield, 15)]),
];

pub const MONSTER_CHANCES: &[(u32, &[(MonsterKind, u32)])] = &[
    (0, &[(MonsterKind::Rat, 80)]),
    (2, &[(MonsterKind::Frog, 15)]),
    (4, &[(MonsterKind::Frog, 30)]),
    (6, &[(MonsterKind::DemonRat, 30)]),
    (7, &[(MonsterKind::DemonRat, 40)]),
    (8, &[(MonsterKind::DemonFrog, 30)]),
];

pub fn value_for_floor(table: &[(u32, usize)], floor: u32) -> usize {
    table.iter().take_while(|(min_floor, _)| *min_floor <= floor).last().map_or(0, |(_, v)| *v)
}

pub fn weights_for_floor<K: Copy + Eq>(table: &[(u32, &[(K, u32)])], floor: u32) -> Vec<(K, u32)> {
    let mut weights: Vec<(K, u32)> = Vec::new();
    for (_, entries) in table.iter().take_while(|(min_floor, _)| *min_floor <= floor) {
        for &(kind, weight) in *entries {
            match weights.iter_mut().find(|(existing, _)| *existing == kind) {
                Some(slot) => slot.1 = weight,
                None => weights.push((kind, weight)),
            }
        }
    }
    weights
}

pub fn player(pos: Pos, inventory_capacity: usize) -> Actor {
    Actor {
        id: EntityId::default(),
        name: PLAYER_NAME.to_string(),
        glyph: '@',
        color: Rgb(255, 255, 255),
        pos,
        blocks_movement: true,
        render_order: RenderOrder::Actor,
        fighter: Fighter::new(30, 2, 5),
        inventory: Inventory::new(inventory_capacity),
        equipment: Equipment::default(),
        level: Level::new(200, 150, 0),
        ai: Some(Ai::Controlled),
    }
}

pub fn monster(kind: MonsterKind, pos: Pos) -> Actor {
    let (name, glyph, color, fighter, xp_given) = match kind {
        MonsterKind::Rat => ("Rat", 'R', Rgb(63, 127, 64), Fighter::new(10, 0, 3), 35),
        MonsterKind::Frog => ("Frog", 'F', Rgb(0, 127, 0), Fighter::new(16, 1, 4), 100),
        MonsterKind::DemonRat => ("Demon Rat", 'D', Rgb(160, 40, 40), Fighter::new(20, 2, 6), 150),
        MonsterKind::DemonFrog => {
            ("Demon Frog", 'T', Rgb(120, 0, 60), Fighter::new(30, 3, 8), 250)
        }
    };
    Actor {
        id: EntityId::default(),
        name: name.to_string(),
        glyph,
        color,
        pos,
        blocks_movement: true,
        render_order: RenderOrder::Actor,
        fighter,
        inventory: Inventory::new(0),
        equipment: Equipment::default(),
        level: Level::new(0, 150, xp_given),
        ai: Some(Ai::hostile()),
    }
}

pub fn item(kind: ItemKind, location: ItemLocation) -> Item {
    let (name, glyph, color) = match kind {
        ItemKind::HealthPotion => ("Health Potion", '!', Rgb(127, 0, 255)),
        ItemKind::LightningScroll => ("Lightning Scroll", '~', Rgb(255, 255, 0)),
        ItemKind::ConfusionScroll => ("Confusion Scroll", '~', Rgb(207, 63, 255)),
        ItemKind::Bomb => ("Bomb", '*', Rgb(255, 0, 0)),
        ItemKind::Stick => ("Stick", '/', Rgb(139, 69, 19)),
        ItemKind::Knife => ("Knife", '/', Rgb(0, 191, 255)),
        ItemKind::Shield => ("Shield", '[', Rgb(139, 69, 19)),
        ItemKind::BigShield => ("Big Shield", '[', Rgb(0, 191, 255)),
    };
    let consumable = match kind {
        ItemKind::HealthPotion => Some(Consumable::Healing { amount: 4 }),
        ItemKind::LightningScroll => Some(Consumable::Lightning { damage: 20, max_range: 5 }),
        ItemKind::ConfusionScroll => Some(Consumable::Confusion { turns: 10 }),
        ItemKind::Bomb => Some(Consumable::Fireball { damage: 12, radius: 3 }),
        _ => None,
    };
    let equippable = match kind {
        ItemKind::Stick => Some(weapon(2)),
        ItemKind::Knife => Some(weapon(4)),
        ItemKind::Shield => Some(armor(2)),
        ItemKind::BigShield => Some(armor(4)),
        _ => None,
    };
    Item {
        id: ItemId::default(),
        kind,
        name: name.to_string(),
        glyph,
        color,
        location,
        consumable,
        equippable,
    }
}

fn weapon(power_bonus: i32) -> Equippable {
    Equippable { slot: EquipmentSlot::Weapon, power_bonus, defense_bonus: 0 }
}

fn armor(defense_bonus: i32) -> Equippable {
    Equippable { slot: EquipmentSlot::Armor, power_bonus: 0, defense_bonus }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn floor_caps_use_last_threshold_reached() {
        assert_eq!(value_for_floor(MAX_MONSTERS_BY_FLOOR, 0), 0);
        assert_eq!(value_for_floor(MAX_MONSTERS_BY_FLOOR, 1), 2);
        assert_eq!(value_for_floor(MAX_MONSTERS_BY_FLOOR, 5), 3);
        assert_eq!(value_for_floor(MAX_MONSTERS_BY_FLOOR, 40), 5);
        assert_eq!(value_for_floor(MAX_ITEMS_BY_FLOOR, 3), 1);
        assert_eq!(value_for_floor(MAX_ITEMS_BY_FLOOR, 4), 2);
    }

    #[test]
    fn later_keys_override_earlier_weights() {
        let weights = weights_for_floor(MONSTER_CHANCES, 4);
        assert_eq!(weights, vec![(MonsterKind::Rat, 80), (MonsterKind::Frog, 30)]);
    }

    #[test]
    fn templates_match_stat_sheet() {
        let player = player(Pos { y: 0, x: 0 }, 26);
        assert_eq!(player.fighter.hp(), 30);
        assert_eq!(player.fighter.base_defense, 2);
        assert_eq!(player.fighter.base_power, 5);
        assert_eq!(player.inventory.capacity, 26);

        let rat = monster(MonsterKind::Rat, Pos { y: 0, x: 0 });
        assert_eq!((rat.fighter.hp(), rat.fighter.base_defense, rat.fighter.base_power), (10, 0, 3));
        assert!(rat.is_alive());
        assert!(rat.blocks_movement);
    }

    #[test]
    fn every_monster_has_its_own_glyph() {
        let origin = Pos { y: 0, x: 0 };
        let glyphs: Vec<char> =
            [MonsterKind::Rat, MonsterKind::Frog, MonsterKind::DemonRat, MonsterKind::DemonFrog]
                .into_iter()
                .map(|kind| monster(kind, origin).glyph)
                .collect();
        assert_eq!(glyphs[..2], ['R', 'F']);
        let distinct: BTreeSet<char> = glyphs.iter().copied().collect();
        assert_eq!(distinct.len(), glyphs.len());
    }

    #[test]
    fn items_are_either_consumable_or_equippable() {
        for kind in [
            ItemKind::HealthPotion,
            ItemKind::LightningScroll,
            ItemKind::ConfusionScroll,
            ItemKind::Bomb,
            ItemKind::Stick,
            ItemKind::Knife,
            ItemKind::Shield,
            ItemKind::BigShield,
        ] {
            let item = item(kind, ItemLocation::Ground(Pos { y: 1, x: 1 }));
            assert!(
                item.consumable.is_some() != item.equippable.is_some(),
                "{kind:?} should have exactly one behavior"
            );
        }
    }
}
