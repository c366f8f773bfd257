use std::time::{Duration, Instant};

use crate::config::EngineConfig;
use crate::infra::Point;
use crate::state::WorldState;

use super::evaluator::select_best;
use super::simulator::WorldSimulator;

/// A simulated future: the positions my player walks through and the world
/// after the last of them.
#[derive(Debug, Clone)]
pub struct Solution {
    pub world: WorldState,
    pub path: Vec<Point>,
}

impl Solution {
    fn root(world: &WorldState) -> Self {
        Self {
            world: world.clone(),
            path: Vec::new(),
        }
    }

    pub fn first_step(&self) -> Option<Point> {
        self.path.first().copied()
    }

    fn children(&self) -> impl Iterator<Item = Solution> + '_ {
        let grid = &self.world.grid;
        self.world
            .my_player
            .position
            .moves()
            .into_iter()
            .filter(move |destination| grid.is_walkable(destination))
            .map(move |destination| {
                let mut path = Vec::with_capacity(self.path.len() + 1);
                path.extend_from_slice(&self.path);
                path.push(destination);
                Solution {
                    world: WorldSimulator::simulate(&self.world, destination),
                    path,
                }
            })
    }
}

/// Exhaustive fixed-depth search over every move sequence of my player.
pub struct Explorator {
    pub depth: usize,
    pub time_budget: Duration,
}

impl Explorator {
    pub fn new(depth: usize, time_budget: Duration) -> Self {
        Self { depth, time_budget }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.search_depth, config.time_budget)
    }

    pub fn generate_best_solution(&self, world: &WorldState) -> Solution {
        let start_time = Instant::now();
        self.generate_best_solution_until(world, |_| start_time.elapsed() > self.time_budget)
    }

    /// Expands one full level at a time. `should_stop` receives the last
    /// completed depth; when it fires mid-level the partial level is dropped and
    /// the best leaf of the completed level is returned. Depth 1 always completes.
    pub fn generate_best_solution_until<F>(
        &self,
        world: &WorldState,
        mut should_stop: F,
    ) -> Solution
    where
        F: FnMut(usize) -> bool,
    {
        let mut solutions = vec![Solution::root(world)];
        let mut completed_depth = 0;

        'levels: while completed_depth < self.depth {
            let mut next_level = Vec::with_capacity(solutions.len() * 5);
            for solution in &solutions {
                if completed_depth > 0 && should_stop(completed_depth) {
                    tracing::warn!(
                        completed_depth,
                        target_depth = self.depth,
                        "Search budget exhausted, using last completed depth"
                    );
                    break 'levels;
                }
                next_level.extend(solution.children());
            }
            solutions = next_level;
            completed_depth += 1;
            tracing::trace!(completed_depth, leaves = solutions.len(), "Level expanded");
        }

        let best = select_best(solutions).unwrap_or_else(|| Solution::root(world));
        tracing::info!(
            health = best.world.my_player.health,
            depth = completed_depth,
            path = ?best.path.iter().map(|p| (p.x, p.y)).collect::<Vec<_>>(),
            "Selected solution"
        );
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planners::explorator::hunting_wanderer_distance;
    use crate::state::{Grid, Minion, MinionState, Player, Rules, Wanderer};
    use std::sync::Arc;

    fn corridor_world(player: Point) -> WorldState {
        let grid = Arc::new(
            Grid::from_ascii(&["################", "#..............#", "################"])
                .unwrap(),
        );
        WorldState::new(grid, Player::new(0, player), Rules::default())
    }

    fn unbounded() -> Explorator {
        Explorator::new(5, Duration::from_secs(60))
    }

    #[test]
    fn test_search_flees_chasing_wanderer() {
        let world = corridor_world(Point::new(7, 1)).with_minions([Minion::Wanderer(
            Wanderer::new(1, Point::new(3, 1), 40)
                .with_state(MinionState::Wandering)
                .with_target(0),
        )]);

        let best = unbounded().generate_best_solution_until(&world, |_| false);
        assert_eq!(
            best.path,
            (8..13).map(|x| Point::new(x, 1)).collect::<Vec<_>>()
        );
        assert_eq!(best.world.my_player.health, 250 - 5 * 3);
        assert_eq!(best.first_step(), Some(Point::new(8, 1)));
    }

    #[test]
    fn test_plan_stays_on_grid_without_border_walls() {
        let grid = Arc::new(Grid::from_ascii(&["....", "....", "...."]).unwrap());
        let world = WorldState::new(grid, Player::new(0, Point::new(0, 1)), Rules::default())
            .with_minions([Minion::Wanderer(
                Wanderer::new(1, Point::new(2, 1), 40)
                    .with_state(MinionState::Wandering)
                    .with_target(0),
            )]);

        let best = unbounded().generate_best_solution_until(&world, |_| false);
        assert_eq!(best.path.len(), 5);
        let mut previous = world.my_player.position;
        for step in &best.path {
            assert!(world.grid.is_walkable(step));
            assert!(step.distance(&previous) <= 1);
            previous = *step;
        }
        assert!(world.grid.in_bounds(&best.world.my_player.position));
    }

    #[test]
    fn test_equal_health_plans_prefer_distant_hunter() {
        let mut world = corridor_world(Point::new(7, 1)).with_minions([Minion::Wanderer(
            Wanderer::new(1, Point::new(3, 1), 40)
                .with_state(MinionState::Wandering)
                .with_target(0),
        )]);
        world.rules.sanity_loss_lonely = 4;

        // Waiting one turn first ends just as healthy but with the hunter closer.
        let waiting_plan = [(7, 1), (8, 1), (9, 1), (10, 1), (11, 1)];
        let waited = waiting_plan.iter().fold(world.clone(), |current, &(x, y)| {
            WorldSimulator::simulate(&current, Point::new(x, y))
        });
        assert_eq!(waited.my_player.health, 230);
        assert_eq!(hunting_wanderer_distance(&waited), 3);

        let best = unbounded().generate_best_solution_until(&world, |_| false);
        assert_eq!(best.world.my_player.health, 230);
        assert_eq!(hunting_wanderer_distance(&best.world), 4);
        assert_eq!(
            best.path,
            (8..13).map(|x| Point::new(x, 1)).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_boxed_in_player_stays() {
        let grid = Arc::new(Grid::from_ascii(&["###", "#.#", "###"]).unwrap());
        let world = WorldState::new(grid, Player::new(0, Point::new(1, 1)), Rules::default());
        let best = unbounded().generate_best_solution_until(&world, |_| false);
        assert_eq!(best.path, vec![Point::new(1, 1); 5]);
        assert_eq!(best.world.my_player.health, 250 - 15);
    }

    #[test]
    fn test_cutoff_returns_last_completed_depth() {
        let world = corridor_world(Point::new(5, 1));
        let mut checks = Vec::new();
        let best = unbounded().generate_best_solution_until(&world, |completed| {
            checks.push(completed);
            completed >= 2
        });
        assert_eq!(best.path.len(), 2);
        assert!(checks.iter().all(|&completed| completed <= 2));
    }

    #[test]
    fn test_zero_budget_still_plans_one_step() {
        let world = corridor_world(Point::new(5, 1));
        let best = Explorator::new(5, Duration::ZERO).generate_best_solution(&world);
        assert!(!best.path.is_empty());
        assert!(best.path[0].distance(&Point::new(5, 1)) <= 1);
    }

    #[test]
    fn test_search_does_not_touch_real_world() {
        let world = corridor_world(Point::new(5, 1)).with_minions([Minion::Wanderer(
            Wanderer::new(1, Point::new(2, 1), 40)
                .with_state(MinionState::Wandering)
                .with_target(0),
        )]);
        let before = world.clone();
        unbounded().generate_best_solution_until(&world, |_| false);
        assert_eq!(world, before);
    }
}
