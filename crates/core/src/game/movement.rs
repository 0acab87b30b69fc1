//! Directional movement, bump dispatch and stair descent.

use super::*;

impl Game {
    pub(super) fn perform_move(&mut self, actor: EntityId, dx: i32, dy: i32) -> Result<(), Impossible> {
        let dest = self.state.actors[actor].pos.offset(dx, dy);
        if !self.state.map.is_walkable(dest) || self.blocking_actor_at(dest).is_some() {
            return Err(Impossible::Blocked);
        }
        self.state.actors[actor].pos = dest;
        Ok(())
    }

    pub(super) fn perform_bump(&mut self, actor: EntityId, dx: i32, dy: i32) -> Result<(), Impossible> {
        // A null bump is standing still, not an attack on oneself.
        if dx == 0 && dy == 0 {
            return Ok(());
        }
        let dest = self.state.actors[actor].pos.offset(dx, dy);
        if self.living_actor_at(dest).is_some() {
            self.perform_melee(actor, dx, dy)
        } else {
            self.perform_move(actor, dx, dy)
        }
    }

    pub(super) fn descend_stairs(&mut self, actor: EntityId) -> Result<(), Impossible> {
        if actor != self.state.player_id {
            return Err(Impossible::CannotAct);
        }
        if self.state.actors[actor].pos != self.state.map.down_stairs {
            return Err(Impossible::NoStairs);
        }
        self.descend();
        self.add_message("You descend the staircase.", palette::DESCEND);
        Ok(())
    }
}
