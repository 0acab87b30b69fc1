//! Monster decision making. Deciding may update the actor's own AI memory
//! (remembered route, confusion counter) but never touches the rest of the world;
//! the chosen `Action` goes through the normal dispatch.

use super::*;

/// The eight neighbours plus standing still.
const STUMBLE_OFFSETS: [(i32, i32); 9] =
    [(-1, -1), (0, -1), (1, -1), (-1, 0), (0, 0), (1, 0), (-1, 1), (0, 1), (1, 1)];

impl Game {
    pub(super) fn decide(&mut self, id: EntityId) -> Action {
        let Some(ai) = self.state.actors.get(id).and_then(|actor| actor.ai.clone()) else {
            return Action::Wait;
        };
        match ai {
            Ai::Controlled => Action::Wait,
            Ai::Hostile { path } => self.decide_hostile(id, path),
            Ai::Confused { previous, turns_remaining } => {
                self.decide_confused(id, previous, turns_remaining)
            }
        }
    }

    fn decide_hostile(&mut self, id: EntityId, mut path: Vec<Pos>) -> Action {
        let pos = self.state.actors[id].pos;
        let target = self.player().pos;

        // Visibility is symmetric: standing in the player's view means seeing the player.
        if self.state.map.is_visible(pos) {
            if pos.chebyshev(target) <= 1 {
                return Action::Melee { dx: target.x - pos.x, dy: target.y - pos.y };
            }
            path = self.path_for(id, target).unwrap_or_default();
        }

        let action = match path.first().copied() {
            Some(next) if pos.chebyshev(next) == 1 => {
                path.remove(0);
                Action::Move { dx: next.x - pos.x, dy: next.y - pos.y }
            }
            _ => {
                path.clear();
                Action::Wait
            }
        };
        self.state.actors[id].ai = Some(Ai::Hostile { path });
        action
    }

    fn decide_confused(&mut self, id: EntityId, previous: Box<Ai>, turns_remaining: u32) -> Action {
        let (dx, dy) = STUMBLE_OFFSETS[(self.next_random() % STUMBLE_OFFSETS.len() as u64) as usize];
        let remaining = turns_remaining.saturating_sub(1);

        if remaining == 0 {
            let name = self.state.actors[id].name.clone();
            self.state.actors[id].ai = Some(*previous);
            self.add_message(format!("The {name} is no longer confused."), palette::WHITE);
        } else {
            self.state.actors[id].ai = Some(Ai::Confused { previous, turns_remaining: remaining });
        }
        debug!(?id, dx, dy, remaining, "confused actor stumbles");
        Action::Bump { dx, dy }
    }

    pub(super) fn path_for(&self, mover: EntityId, goal: Pos) -> Option<Vec<Pos>> {
        let start = self.state.actors.get(mover)?.pos;
        pathfinding::path_between(&self.state.map, &self.blocker_cells(mover), start, goal)
    }
}
