//! Experience and level-up choices for the player.

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelUpChoice {
    /// +20 max hp, healing the same amount.
    Constitution,
    /// +1 power.
    Strength,
    /// +1 defense.
    Agility,
}

impl Game {
    pub fn level_up_pending(&self) -> bool {
        self.player().level.requires_level_up()
    }

    pub fn apply_level_up(&mut self, choice: LevelUpChoice) -> Result<(), GameError> {
        if self.is_game_over() {
            return Err(GameError::GameOver);
        }
        if !self.level_up_pending() {
            return Err(GameError::NoLevelUpPending);
        }
        let player = self.state.player_id;
        let actor = &mut self.state.actors[player];
        let text = match choice {
            LevelUpChoice::Constitution => {
                actor.fighter.max_hp += 20;
                actor.fighter.heal(20);
                "Your health improves!"
            }
            LevelUpChoice::Strength => {
                actor.fighter.base_power += 1;
                "You feel stronger!"
            }
            LevelUpChoice::Agility => {
                actor.fighter.base_defense += 1;
                "Your movements are getting swifter!"
            }
        };
        actor.level.increase_level();
        let level = actor.level.current_level;
        self.add_message(text, palette::WHITE);
        info!(?choice, level, "player levelled up");
        Ok(())
    }

    pub(super) fn award_xp(&mut self, xp: u32) {
        let player = self.state.player_id;
        if !self.state.actors[player].level.add_xp(xp) {
            return;
        }
        self.add_message(format!("You gain {xp} experience points."), palette::WHITE);
        let level = &self.state.actors[player].level;
        if level.requires_level_up() {
            let next = level.current_level + 1;
            self.add_message(format!("You advance to level {next}!"), palette::WHITE);
        }
    }
}
