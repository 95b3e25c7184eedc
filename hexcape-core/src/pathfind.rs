//! Uniform-cost pathfinding over the hex grid
//!
//! Every step costs 1, so the search behaves like breadth-first search; the
//! frontier is still a min-heap so equal-cost entries pop in discovery order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use crate::grid::HexGrid;
use crate::hex::Hex;

/// Node in the open set
#[derive(Clone, Copy, Debug)]
struct Frontier {
    cost: u32,
    /// Discovery sequence, breaks cost ties first-in-first-out
    seq: u64,
    hex: Hex,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path from `start` to `goal`.
///
/// Returns the hexes after `start` up to and including `goal` (empty when
/// they coincide), or `None` if either end is off-board or the goal cannot be
/// reached. Only pathable cells are expanded, except `start` and `goal`
/// themselves which are always eligible.
pub fn find_path(grid: &HexGrid, start: Hex, goal: Hex) -> Option<Vec<Hex>> {
    if !grid.contains(start) || !grid.contains(goal) {
        return None;
    }
    if start == goal {
        return Some(Vec::new());
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: FxHashMap<Hex, Hex> = FxHashMap::default();
    let mut cost_so_far: FxHashMap<Hex, u32> = FxHashMap::default();
    let mut seq = 0u64;

    cost_so_far.insert(start, 0);
    open_set.push(Frontier { cost: 0, seq, hex: start });

    while let Some(current) = open_set.pop() {
        if current.hex == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }

        // Stale heap entry
        if cost_so_far
            .get(&current.hex)
            .is_some_and(|&best| current.cost > best)
        {
            continue;
        }

        for cell in grid.neighbors(current.hex) {
            let next = cell.hex();
            if !(cell.is_pathable() || next == start || next == goal) {
                continue;
            }

            let new_cost = current.cost + 1;
            let improved = cost_so_far
                .get(&next)
                .map_or(true, |&known| new_cost < known);

            if improved {
                cost_so_far.insert(next, new_cost);
                came_from.insert(next, current.hex);
                seq += 1;
                open_set.push(Frontier { cost: new_cost, seq, hex: next });
            }
        }
    }

    None
}

/// Whether any path connects `start` to `goal`
pub fn reachable(grid: &HexGrid, start: Hex, goal: Hex) -> bool {
    find_path(grid, start, goal).is_some()
}

fn reconstruct_path(came_from: &FxHashMap<Hex, Hex>, start: Hex, goal: Hex) -> Vec<Hex> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        if prev == start {
            break;
        }
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
