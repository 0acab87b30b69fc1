//! Room placement and corridor carving for the base floor topology.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use super::FloorParams;
use crate::state::Map;
use crate::types::{Pos, TileKind};

/// Rectangle whose outer ring stays wall; only the interior is carved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct RoomRect {
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
}

impl RoomRect {
    pub(super) fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x1: x, y1: y, x2: x + width, y2: y + height }
    }

    pub(super) fn center(self) -> Pos {
        Pos { y: (self.y1 + self.y2) / 2, x: (self.x1 + self.x2) / 2 }
    }

    pub(super) fn inner(self) -> impl Iterator<Item = Pos> {
        ((self.y1 + 1)..self.y2).flat_map(move |y| ((self.x1 + 1)..self.x2).map(move |x| Pos { y, x }))
    }

    pub(super) fn random_inner_cell(self, rng: &mut ChaCha8Rng) -> Pos {
        let x = roll(rng, (self.x1 + 1) as usize, (self.x2 - 1) as usize) as i32;
        let y = roll(rng, (self.y1 + 1) as usize, (self.y2 - 1) as usize) as i32;
        Pos { y, x }
    }

    pub(super) fn intersects(self, other: &Self) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1 && self.y1 <= other.y2 && self.y2 >= other.y1
    }
}

/// Uniform draw from the inclusive range `[min_value, max_value]`.
pub(super) fn roll(rng: &mut ChaCha8Rng, min_value: usize, max_value: usize) -> usize {
    debug_assert!(min_value <= max_value);
    let range_size = max_value - min_value + 1;
    min_value + (rng.next_u64() as usize % range_size)
}

pub(super) fn carve_rooms(params: &FloorParams, rng: &mut ChaCha8Rng) -> (Map, Vec<RoomRect>) {
    let mut map = Map::filled(params.width, params.height, TileKind::Wall);
    let mut rooms: Vec<RoomRect> = Vec::new();

    for _ in 0..params.max_rooms.max(1) {
        let width = roll(rng, params.room_min_size, params.room_max_size);
        let height = roll(rng, params.room_min_size, params.room_max_size);
        let x = roll(rng, 0, params.width - width - 1);
        let y = roll(rng, 0, params.height - height - 1);
        let room = RoomRect::new(x as i32, y as i32, width as i32, height as i32);

        if rooms.iter().any(|other| room.intersects(other)) {
            continue;
        }
        for pos in room.inner() {
            map.set_tile(pos, TileKind::Floor);
        }
        if let Some(previous) = rooms.last() {
            tunnel_between(&mut map, previous.center(), room.center(), rng);
        }
        rooms.push(room);
    }

    if let Some(last) = rooms.last() {
        map.set_down_stairs(last.center());
    }
    (map, rooms)
}

fn tunnel_between(map: &mut Map, start: Pos, end: Pos, rng: &mut ChaCha8Rng) {
    let corner = if rng.next_u64() % 2 == 0 {
        Pos { y: start.y, x: end.x }
    } else {
        Pos { y: end.y, x: start.x }
    };
    carve_line(map, start, corner);
    carve_line(map, corner, end);
}

/// Carves an axis-aligned segment, both ends included.
fn carve_line(map: &mut Map, from: Pos, to: Pos) {
    let (dx, dy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
    let mut current = from;
    loop {
        map.set_tile(current, TileKind::Floor);
        if current == to {
            break;
        }
        current = current.offset(dx, dy);
    }
}
