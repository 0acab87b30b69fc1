//! Deterministic weighted A* over the tile grid.
//! Walls are impassable; cells holding blocking actors are expensive rather than
//! forbidden, so crowds are routed around when a detour exists. Cardinal steps
//! cost twice the cell cost and diagonal steps three times.

use std::collections::BTreeMap;

use super::*;

const OCCUPIED_PENALTY: u32 = 10;
const CARDINAL_STEP: u32 = 2;
const DIAGONAL_STEP: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// Cheapest route from `start` to `goal`, excluding `start` and ending on `goal`.
pub(super) fn path_between(
    map: &Map,
    blockers: &BTreeSet<Pos>,
    start: Pos,
    goal: Pos,
) -> Option<Vec<Pos>> {
    if !map.is_walkable(start) || !map.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![]);
    }
    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = heuristic(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0);

    while let Some(current) = open_set.pop_first() {
        let p = Pos { y: current.y, x: current.x };
        if p == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        let Some(&cur_g) = g_score.get(&p) else { continue };
        for (n, step) in neighbors(p) {
            let Some(cell) = cell_cost(map, blockers, n) else { continue };
            let tentative = cur_g + cell * step;
            if tentative < *g_score.get(&n).unwrap_or(&u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tentative);
                let h = heuristic(n, goal);
                open_set.insert(OpenNode { f: tentative + h, h, y: n.y, x: n.x });
            }
        }
    }
    None
}

fn cell_cost(map: &Map, blockers: &BTreeSet<Pos>, pos: Pos) -> Option<u32> {
    if !map.is_walkable(pos) {
        return None;
    }
    Some(if blockers.contains(&pos) { 1 + OCCUPIED_PENALTY } else { 1 })
}

/// Octile distance under the 2:3 step model; never overestimates since every cell costs at least 1.
fn heuristic(a: Pos, b: Pos) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    let diagonal = dx.min(dy);
    let straight = dx.max(dy) - diagonal;
    diagonal * DIAGONAL_STEP + straight * CARDINAL_STEP
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while let Some(&previous) = came.get(&p) {
        if previous == start {
            break;
        }
        p = previous;
        result.push(p);
    }
    result.reverse();
    result
}

fn neighbors(p: Pos) -> [(Pos, u32); 8] {
    [
        (Pos { y: p.y - 1, x: p.x }, CARDINAL_STEP),
        (Pos { y: p.y, x: p.x + 1 }, CARDINAL_STEP),
        (Pos { y: p.y + 1, x: p.x }, CARDINAL_STEP),
        (Pos { y: p.y, x: p.x - 1 }, CARDINAL_STEP),
        (Pos { y: p.y - 1, x: p.x - 1 }, DIAGONAL_STEP),
        (Pos { y: p.y - 1, x: p.x + 1 }, DIAGONAL_STEP),
        (Pos { y: p.y + 1, x: p.x + 1 }, DIAGONAL_STEP),
        (Pos { y: p.y + 1, x: p.x - 1 }, DIAGONAL_STEP),
    ]
}
