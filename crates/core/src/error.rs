//! Error types surfaced by the simulation.

use thiserror::Error;

use crate::types::{EntityId, ItemId};

/// An action's precondition failed. Nothing was mutated; the text is shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Impossible {
    #[error("That way is blocked.")]
    Blocked,
    #[error("Nothing to attack.")]
    NothingToAttack,
    #[error("There is nothing here to pick up.")]
    NothingToPickUp,
    #[error("Your inventory is full.")]
    InventoryFull,
    #[error("There are no stairs here.")]
    NoStairs,
    #[error("You are not carrying that item.")]
    NotCarried,
    #[error("That item cannot be used.")]
    NotUsable,
    #[error("That item cannot be equipped.")]
    NotEquippable,
    #[error("Your health is already full.")]
    HealthFull,
    #[error("No enemy is close enough to strike.")]
    NoEnemyInRange,
    #[error("You cannot target an area that you cannot see.")]
    TargetNotVisible,
    #[error("You must select an enemy to target.")]
    NoEnemyAtTarget,
    #[error("You cannot confuse yourself!")]
    CannotConfuseSelf,
    #[error("There are no targets in the radius.")]
    NoTargetsInRadius,
    #[error("You cannot act right now.")]
    CannotAct,
}

/// Misuse of the engine API, as opposed to an in-game failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,
    #[error("no level-up is pending")]
    NoLevelUpPending,
    #[error("unknown actor {0:?}")]
    UnknownActor(EntityId),
    #[error("unknown item {0:?}")]
    UnknownItem(ItemId),
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("map masks do not cover its {width}x{height} grid")]
    MalformedMap { width: usize, height: usize },
    #[error("actor {0:?} stands outside the map")]
    ActorOutOfBounds(EntityId),
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("room size bounds are inverted: min {min} > max {max}")]
    InvertedRoomSize { min: usize, max: usize },
    #[error("rooms of size {room_max} do not fit in a {width}x{height} map")]
    RoomsDoNotFit { room_max: usize, width: usize, height: usize },
    #[error("room size must be at least 3, got {0}")]
    RoomTooSmall(usize),
    #[error("inventory capacity must be positive")]
    ZeroCapacity,
    #[error("inventory capacity is at most {max}, got {got}")]
    CapacityTooLarge { got: usize, max: usize },
    #[error("fov radius must be positive, got {0}")]
    NonPositiveFovRadius(i32),
}
