use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::infra::{Point, Vector};
use crate::state::{Grid, Sprite};

/// Returned by `real_distance_to` when the goal cannot be reached.
pub const INFINITE_DISTANCE: i32 = i32::MAX;

#[derive(Clone, Eq, PartialEq)]
struct Node {
    pos: Point,
    f_score: i32,
}

// f = cost + heuristic is the only ordering key.
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_score.cmp(&self.f_score)
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct Search {
    came_from: HashMap<Point, Point>,
    goal: Point,
    cost: i32,
}

/// Static-map queries. Only walls block; players and minions are ignored.
pub struct PathFinder;

impl PathFinder {
    /// Cells from the step after `start` up to and including `goal`.
    /// `Some(vec![])` when start equals goal, `None` when the goal is unreachable.
    #[tracing::instrument(
        level = "trace",
        skip(grid),
        fields(start_x = start.x, start_y = start.y, goal_x = goal.x, goal_y = goal.y)
    )]
    pub fn find_path(grid: &Grid, start: Point, goal: Point) -> Option<Vec<Point>> {
        let search = astar(grid, start, goal)?;
        Some(reconstruct_path(&search.came_from, start, search.goal))
    }

    pub fn find_path_between(
        grid: &Grid,
        start: &impl Sprite,
        goal: &impl Sprite,
    ) -> Option<Vec<Point>> {
        Self::find_path(grid, start.position(), goal.position())
    }

    /// Path cost only, or `INFINITE_DISTANCE` if unreachable.
    pub fn real_distance_to(grid: &Grid, start: Point, goal: Point) -> i32 {
        astar(grid, start, goal)
            .map(|search| search.cost)
            .unwrap_or(INFINITE_DISTANCE)
    }

    pub fn real_distance_between(grid: &Grid, start: &impl Sprite, goal: &impl Sprite) -> i32 {
        Self::real_distance_to(grid, start.position(), goal.position())
    }

    /// Straight horizontal or vertical visibility. Walks from `to` towards
    /// `from` and fails on the first wall; diagonal pairs never see each other.
    pub fn direct_line_path(grid: &Grid, from: Point, to: Point) -> bool {
        if from == to {
            return true;
        }
        if from.x != to.x && from.y != to.y {
            return false;
        }
        if grid.is_wall(to) {
            return false;
        }

        let step = Vector::between(to, from).signum();
        let mut current = to;
        loop {
            let next = current + step;
            if next == from {
                return true;
            }
            if !grid.in_bounds(&next) || grid.is_wall(next) {
                return false;
            }
            current = next;
        }
    }

    pub fn direct_line_between(grid: &Grid, from: &impl Sprite, to: &impl Sprite) -> bool {
        Self::direct_line_path(grid, from.position(), to.position())
    }
}

fn astar(grid: &Grid, start: Point, goal: Point) -> Option<Search> {
    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<Point, Point> = HashMap::new();
    let mut g_score: HashMap<Point, i32> = HashMap::new();
    let mut closed_set: HashSet<Point> = HashSet::new();

    g_score.insert(start, 0);
    open_set.push(Node {
        pos: start,
        f_score: heuristic(start, goal),
    });

    let mut expansions = 0;

    while let Some(Node { pos: current, .. }) = open_set.pop() {
        let current_g = *g_score.get(&current).unwrap_or(&0);

        if current == goal {
            tracing::trace!(expansions, cost = current_g, "Path found");
            return Some(Search {
                came_from,
                goal,
                cost: current_g,
            });
        }

        if !closed_set.insert(current) {
            continue;
        }
        expansions += 1;

        for neighbor in current.neighbors() {
            if closed_set.contains(&neighbor) || !grid.is_walkable(&neighbor) {
                continue;
            }

            let tentative_g = current_g + 1;
            if tentative_g < *g_score.get(&neighbor).unwrap_or(&i32::MAX) {
                came_from.insert(neighbor, current);
                g_score.insert(neighbor, tentative_g);
                open_set.push(Node {
                    pos: neighbor,
                    f_score: tentative_g + heuristic(neighbor, goal),
                });
            }
        }
    }

    tracing::trace!(expansions, "No path found");
    None
}

fn heuristic(a: Point, b: Point) -> i32 {
    a.distance(&b)
}

fn reconstruct_path(
    came_from: &HashMap<Point, Point>,
    start: Point,
    mut current: Point,
) -> Vec<Point> {
    let mut path = Vec::new();
    while current != start {
        path.push(current);
        match came_from.get(&current) {
            Some(&prev) => current = prev,
            None => break,
        }
    }
    path.reverse();
    path
}
