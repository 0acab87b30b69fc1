//! Turn sequencing: one player action, then the mob phase, then a fresh field of view.
//! A rejected player action is logged and costs nothing.

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingPlayer,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnResult {
    /// The action and the mob phase both ran.
    Resolved,
    /// Precondition failure; the world is unchanged and no turn passed.
    Rejected(Impossible),
    /// The item needs a target cell; resubmit via `PendingTargetSelection::resolve`.
    AwaitingTarget(PendingTargetSelection),
    PlayerDied,
}

impl Game {
    pub fn play_turn(&mut self, action: Action) -> Result<TurnResult, GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        let player = self.state.player_id;
        match self.perform(player, action) {
            Err(reason) => {
                self.add_message(reason.to_string(), palette::IMPOSSIBLE);
                Ok(TurnResult::Rejected(reason))
            }
            Ok(ActionOutcome::NeedsTarget(pending)) => Ok(TurnResult::AwaitingTarget(pending)),
            Ok(ActionOutcome::Performed) => {
                self.update_fov();
                if !self.is_game_over() {
                    self.run_mob_phase();
                    self.update_fov();
                }
                self.turn += 1;
                if self.is_game_over() {
                    Ok(TurnResult::PlayerDied)
                } else {
                    Ok(TurnResult::Resolved)
                }
            }
        }
    }

    fn run_mob_phase(&mut self) {
        let player = self.state.player_id;
        let mobs: Vec<EntityId> = self
            .state
            .actors
            .iter()
            .filter(|(id, actor)| *id != player && actor.is_alive())
            .map(|(id, _)| id)
            .collect();

        for id in mobs {
            if self.is_game_over() {
                break;
            }
            // An earlier mob may have killed this one (e.g. a confused bump).
            if !self.state.actors.get(id).is_some_and(Actor::is_alive) {
                continue;
            }
            let action = self.decide(id);
            if let Err(reason) = self.perform(id, action) {
                debug!(?id, ?action, %reason, "mob action rejected");
            }
        }
    }
}
