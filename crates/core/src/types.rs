use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
    pub struct ItemId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    /// Number of king moves between two cells.
    pub fn chebyshev(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    pub fn distance(self, other: Pos) -> f64 {
        let dx = f64::from(other.x - self.x);
        let dy = f64::from(other.y - self.y);
        dx.hypot(dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileGraphic {
    pub glyph: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    DownStairs,
}

impl TileKind {
    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    pub fn is_transparent(self) -> bool {
        !matches!(self, TileKind::Wall)
    }

    /// Graphic for a lit (visible) or remembered (explored only) tile.
    pub fn graphic(self, lit: bool) -> TileGraphic {
        match (self, lit) {
            (TileKind::Wall, true) => {
                TileGraphic { glyph: '#', fg: Rgb(255, 255, 255), bg: Rgb(130, 110, 50) }
            }
            (TileKind::Wall, false) => {
                TileGraphic { glyph: '#', fg: Rgb(255, 255, 255), bg: Rgb(0, 0, 100) }
            }
            (TileKind::Floor, true) => {
                TileGraphic { glyph: '.', fg: Rgb(255, 255, 255), bg: Rgb(200, 180, 50) }
            }
            (TileKind::Floor, false) => {
                TileGraphic { glyph: '.', fg: Rgb(255, 255, 255), bg: Rgb(50, 50, 150) }
            }
            (TileKind::DownStairs, true) => {
                TileGraphic { glyph: '>', fg: Rgb(255, 255, 255), bg: Rgb(200, 180, 50) }
            }
            (TileKind::DownStairs, false) => {
                TileGraphic { glyph: '>', fg: Rgb(0, 0, 100), bg: Rgb(50, 50, 150) }
            }
        }
    }
}

/// Draw ordering only; later tiers are drawn on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RenderOrder {
    Corpse,
    Item,
    Actor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Rat,
    Frog,
    DemonRat,
    DemonFrog,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    HealthPotion,
    LightningScroll,
    ConfusionScroll,
    Bomb,
    Stick,
    Knife,
    Shield,
    BigShield,
}
