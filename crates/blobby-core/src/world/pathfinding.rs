//! A* over walkable voxels
//!
//! Walkers move between horizontally adjacent columns (8-neighborhood) and
//! may climb or drop one voxel per step.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;
use glam::IVec3;

use super::volume::Volume;

/// Node expansions before a search gives up
pub const MAX_EXPANSIONS: usize = 65_536;

const STRAIGHT_COST: i32 = 10;
const DIAGONAL_COST: i32 = 14;
const CLIMB_COST: i32 = 5;

const DIRECTIONS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

#[derive(Clone, Copy, PartialEq, Eq)]
struct PathNode {
    position: IVec3,
    f_cost: i32,
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap
        other.f_cost.cmp(&self.f_cost)
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Octile distance on the horizontal plane plus climb cost
fn heuristic(a: IVec3, b: IVec3) -> i32 {
    let dx = (a.x - b.x).abs();
    let dz = (a.z - b.z).abs();
    let (short, long) = if dx < dz { (dx, dz) } else { (dz, dx) };
    short * DIAGONAL_COST + (long - short) * STRAIGHT_COST + (a.y - b.y).abs() * CLIMB_COST
}

/// Walkable cell reachable from `position` in one step towards (dx, dz).
///
/// A climb needs one extra voxel of headroom above the walker in its own
/// column, a drop the same above the walker in the target column.
fn step(volume: &Volume, position: IVec3, dx: i32, dz: i32, clearance: i32) -> Option<IVec3> {
    let height = clearance.max(1);
    let base = position + IVec3::new(dx, 0, dz);
    [0, 1, -1]
        .into_iter()
        .filter(|&dy| match dy {
            1 => !volume.is_solid(position + IVec3::Y * height),
            -1 => !volume.is_solid(base + IVec3::Y * (height - 1)),
            _ => true,
        })
        .map(|dy| base + IVec3::Y * dy)
        .find(|&candidate| volume.is_walkable(candidate, clearance))
}

/// Whether a diagonal move may squeeze between its two side columns
fn can_cut_corner(volume: &Volume, position: IVec3, dx: i32, dz: i32, clearance: i32) -> bool {
    step(volume, position, dx, 0, clearance).is_some()
        && step(volume, position, 0, dz, clearance).is_some()
}

/// Snap a voxel onto the walkable cell at or just below it
fn snap(volume: &Volume, position: IVec3, clearance: i32) -> Option<IVec3> {
    if volume.is_walkable(position, clearance) {
        return Some(position);
    }
    volume
        .ground(position + IVec3::Y, clearance)
        .map(|y| IVec3::new(position.x, y, position.z))
}

/// Find a walkable corridor from `from` to `to`, both included.
///
/// Returns an empty list when either end is not standable or the goal is
/// out of reach within `max_expansions`.
pub fn find_path(
    volume: &Volume,
    from: IVec3,
    to: IVec3,
    clearance: i32,
    max_expansions: usize,
) -> Vec<IVec3> {
    let (Some(start), Some(goal)) = (snap(volume, from, clearance), snap(volume, to, clearance))
    else {
        return Vec::new();
    };

    let mut open_set = BinaryHeap::new();
    let mut came_from: AHashMap<IVec3, IVec3> = AHashMap::new();
    let mut g_score: AHashMap<IVec3, i32> = AHashMap::new();

    g_score.insert(start, 0);
    open_set.push(PathNode {
        position: start,
        f_cost: heuristic(start, goal),
    });

    let mut expansions = 0;
    while let Some(current) = open_set.pop() {
        if current.position == goal {
            let mut path = vec![goal];
            let mut position = goal;
            while let Some(&previous) = came_from.get(&position) {
                path.push(previous);
                position = previous;
            }
            path.reverse();
            return path;
        }

        expansions += 1;
        if expansions > max_expansions {
            log::debug!(
                "Pathfinding gave up after {} expansions towards {:?}",
                max_expansions,
                goal
            );
            break;
        }

        let current_g = g_score.get(&current.position).copied().unwrap_or(i32::MAX);
        for &(dx, dz) in &DIRECTIONS {
            let diagonal = dx != 0 && dz != 0;
            if diagonal && !can_cut_corner(volume, current.position, dx, dz, clearance) {
                continue;
            }
            let Some(neighbor) = step(volume, current.position, dx, dz, clearance) else {
                continue;
            };

            let horizontal = if diagonal {
                DIAGONAL_COST
            } else {
                STRAIGHT_COST
            };
            let tentative_g =
                current_g + horizontal + (neighbor.y - current.position.y).abs() * CLIMB_COST;

            if tentative_g < g_score.get(&neighbor).copied().unwrap_or(i32::MAX) {
                came_from.insert(neighbor, current.position);
                g_score.insert(neighbor, tentative_g);
                open_set.push(PathNode {
                    position: neighbor,
                    f_cost: tentative_g + heuristic(neighbor, goal),
                });
            }
        }
    }

    Vec::new()
}
