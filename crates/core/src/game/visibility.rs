//! Field-of-view via recursive shadowcasting with a Euclidean radius.
//! A line-of-sight pass afterwards removes cells that leak through wall corners.
//! Recomputing folds the result into the explored mask, which only ever grows.

use super::*;

impl Game {
    pub fn update_fov(&mut self) {
        let origin = self.player().pos;
        compute_fov(&mut self.state.map, origin, self.config.fov_radius);
    }
}

fn transform_octant(orig: Pos, x: i32, y: i32, oct: u8) -> Pos {
    match oct {
        0 => Pos { y: orig.y - y, x: orig.x + x },
        1 => Pos { y: orig.y - x, x: orig.x + y },
        2 => Pos { y: orig.y - x, x: orig.x - y },
        3 => Pos { y: orig.y - y, x: orig.x - x },
        4 => Pos { y: orig.y + y, x: orig.x - x },
        5 => Pos { y: orig.y + x, x: orig.x - y },
        6 => Pos { y: orig.y + x, x: orig.x + y },
        7 => Pos { y: orig.y + y, x: orig.x + x },
        _ => orig,
    }
}

pub(super) fn compute_fov(map: &mut Map, origin: Pos, radius: i32) {
    map.clear_visible();
    map.set_visible(origin, true);
    for octant in 0..8 {
        scan_octant(map, origin, radius, 1, Slope::new(1, 1), Slope::new(0, 1), octant);
    }

    let min_y = (origin.y - radius).max(0);
    let max_y = (origin.y + radius + 1).min(map.height as i32);
    let min_x = (origin.x - radius).max(0);
    let max_x = (origin.x + radius + 1).min(map.width as i32);
    for y in min_y..max_y {
        for x in min_x..max_x {
            let p = Pos { y, x };
            if p != origin && map.is_visible(p) && !has_direct_line_of_sight(map, origin, p) {
                map.set_visible(p, false);
            }
        }
    }

    map.accumulate_explored();
}

fn within_radius(origin: Pos, p: Pos, radius: i32) -> bool {
    let dx = p.x - origin.x;
    let dy = p.y - origin.y;
    dx * dx + dy * dy <= radius * radius
}

#[derive(Clone, Copy)]
struct Slope {
    y: i32,
    x: i32,
}

impl Slope {
    fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    fn greater_or_equal(&self, other: &Slope) -> bool {
        self.y * other.x >= other.y * self.x
    }

    fn greater_than(&self, other: &Slope) -> bool {
        self.y * other.x > other.y * self.x
    }
}

fn scan_octant(map: &mut Map, orig: Pos, radius: i32, dist: i32, start: Slope, end: Slope, oct: u8) {
    if dist > radius {
        return;
    }
    let mut blocked = false;
    let mut cur_start = start;
    for y in (0..=dist).rev() {
        let top = Slope::new(2 * y + 1, 2 * dist - 1);
        let bot = Slope::new(2 * y - 1, 2 * dist + 1);
        if cur_start.greater_or_equal(&bot) && top.greater_than(&end) {
            let p = transform_octant(orig, dist, y, oct);
            if within_radius(orig, p, radius) {
                map.set_visible(p, true);
            }
            if !map.is_transparent(p) {
                if !blocked {
                    scan_octant(map, orig, radius, dist + 1, cur_start, top, oct);
                    blocked = true;
                }
                cur_start = bot;
            } else if blocked {
                blocked = false;
            }
        }
    }
    if !blocked {
        scan_octant(map, orig, radius, dist + 1, cur_start, end, oct);
    }
}

fn has_direct_line_of_sight(map: &Map, origin: Pos, target: Pos) -> bool {
    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let sx = dx.signum();
    let sy = dy.signum();
    let total_dist_x = dx.abs();
    let total_dist_y = dy.abs();

    let mut x = origin.x;
    let mut y = origin.y;
    let mut current_step_x = 0;
    let mut current_step_y = 0;

    while current_step_x < total_dist_x || current_step_y < total_dist_y {
        let lhs = (1 + 2 * current_step_x) * total_dist_y;
        let rhs = (1 + 2 * current_step_y) * total_dist_x;

        if lhs == rhs {
            x += sx;
            y += sy;
            current_step_x += 1;
            current_step_y += 1;
        } else if lhs < rhs {
            x += sx;
            current_step_x += 1;
        } else {
            y += sy;
            current_step_y += 1;
        }

        if x == target.x && y == target.y {
            break;
        }
        if !map.is_transparent(Pos { y, x }) {
            return false;
        }
    }
    true
}
