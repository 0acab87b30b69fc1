//! Tunable session parameters, deserializable from the app's config file.

use serde::{Deserialize, Serialize};

use crate::content;
use crate::error::ConfigError;
use crate::mapgen::FloorParams;

pub const DEFAULT_FOV_RADIUS: i32 = 8;
pub const DEFAULT_INVENTORY_CAPACITY: usize = 26;
/// One inventory slot per letter `a`..=`z`.
pub const MAX_INVENTORY_CAPACITY: usize = 26;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub map_width: usize,
    pub map_height: usize,
    pub max_rooms: usize,
    pub room_min_size: usize,
    pub room_max_size: usize,
    pub inventory_capacity: usize,
    pub fov_radius: i32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_width: 80,
            map_height: 43,
            max_rooms: 30,
            room_min_size: 6,
            room_max_size: 10,
            inventory_capacity: DEFAULT_INVENTORY_CAPACITY,
            fov_radius: DEFAULT_FOV_RADIUS,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_min_size < 3 {
            return Err(ConfigError::RoomTooSmall(self.room_min_size));
        }
        if self.room_min_size > self.room_max_size {
            return Err(ConfigError::InvertedRoomSize {
                min: self.room_min_size,
                max: self.room_max_size,
            });
        }
        if self.room_max_size + 2 > self.map_width || self.room_max_size + 2 > self.map_height {
            return Err(ConfigError::RoomsDoNotFit {
                room_max: self.room_max_size,
                width: self.map_width,
                height: self.map_height,
            });
        }
        if self.inventory_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.inventory_capacity > MAX_INVENTORY_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                got: self.inventory_capacity,
                max: MAX_INVENTORY_CAPACITY,
            });
        }
        if self.fov_radius <= 0 {
            return Err(ConfigError::NonPositiveFovRadius(self.fov_radius));
        }
        Ok(())
    }

    /// Generation parameters for `floor`, with the spawn tables resolved for that depth.
    pub fn floor_params(&self, floor: u32) -> FloorParams {
        FloorParams {
            floor,
            width: self.map_width,
            height: self.map_height,
            max_rooms: self.max_rooms,
            room_min_size: self.room_min_size,
            room_max_size: self.room_max_size,
            max_monsters_per_room: content::value_for_floor(content::MAX_MONSTERS_BY_FLOOR, floor),
            max_items_per_room: content::value_for_floor(content::MAX_ITEMS_BY_FLOOR, floor),
            monster_weights: content::weights_for_floor(content::MONSTER_CHANCES, floor),
            item_weights: content::weights_for_floor(content::ITEM_CHANCES, floor),
        }
    }
}
