//! The closed set of intents an actor can perform, and their dispatch.
//! Each handler validates every precondition before it mutates anything, so a
//! returned `Impossible` always means the world is untouched.

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Move { dx: i32, dy: i32 },
    Melee { dx: i32, dy: i32 },
    /// Attacks a living actor at the destination, otherwise moves there.
    Bump { dx: i32, dy: i32 },
    PickUp,
    Drop { item: ItemId },
    Equip { item: ItemId },
    UseItem { item: ItemId, target: Option<Pos> },
    Wait,
    DescendStairs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Single,
    Area { radius: i32 },
}

/// A consumable that needs a cell before it can activate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTargetSelection {
    pub item: ItemId,
    pub kind: TargetKind,
}

impl PendingTargetSelection {
    /// The same `UseItem`, now carrying the chosen cell.
    pub fn resolve(self, target: Pos) -> Action {
        Action::UseItem { item: self.item, target: Some(target) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Performed,
    NeedsTarget(PendingTargetSelection),
}

impl Game {
    pub fn perform(&mut self, actor: EntityId, action: Action) -> Result<ActionOutcome, Impossible> {
        if !self.state.actors.get(actor).is_some_and(Actor::is_alive) {
            return Err(Impossible::CannotAct);
        }
        let performed = |result: Result<(), Impossible>| result.map(|()| ActionOutcome::Performed);
        match action {
            Action::Move { dx, dy } => performed(self.perform_move(actor, dx, dy)),
            Action::Melee { dx, dy } => performed(self.perform_melee(actor, dx, dy)),
            Action::Bump { dx, dy } => performed(self.perform_bump(actor, dx, dy)),
            Action::PickUp => performed(self.pick_up(actor)),
            Action::Drop { item } => performed(self.drop_item(actor, item)),
            Action::Equip { item } => performed(self.toggle_equip(actor, item)),
            Action::UseItem { item, target } => self.use_item(actor, item, target),
            Action::Wait => Ok(ActionOutcome::Performed),
            Action::DescendStairs => performed(self.descend_stairs(actor)),
        }
    }
}
